//! Board state store and its column projection.

use super::{ColumnId, ProjectId, TaskId, TaskRecord};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Ordered task collection for one project's board.
///
/// Board state lives only as long as the viewing session. Mutation goes
/// through [`BoardState::replace_all`] and [`BoardState::set_status`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardState {
    project_id: ProjectId,
    tasks: Vec<TaskRecord>,
}

impl BoardState {
    /// Creates an empty board for a project.
    #[must_use]
    pub const fn new(project_id: ProjectId) -> Self {
        Self {
            project_id,
            tasks: Vec::new(),
        }
    }

    /// Creates a board already holding the given tasks.
    #[must_use]
    pub const fn with_tasks(project_id: ProjectId, tasks: Vec<TaskRecord>) -> Self {
        Self { project_id, tasks }
    }

    /// Returns the project this board belongs to.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the tasks in board order.
    #[must_use]
    pub fn tasks(&self) -> &[TaskRecord] {
        &self.tasks
    }

    /// Returns the number of tasks on the board.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns `true` when the board holds no tasks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Finds a task by id.
    #[must_use]
    pub fn find(&self, task_id: TaskId) -> Option<&TaskRecord> {
        self.tasks.iter().find(|task| task.task_id() == task_id)
    }

    /// Returns `true` when the task is on the board.
    #[must_use]
    pub fn contains(&self, task_id: TaskId) -> bool {
        self.find(task_id).is_some()
    }

    /// Returns the current raw status of a task.
    #[must_use]
    pub fn status_of(&self, task_id: TaskId) -> Option<&str> {
        self.find(task_id).map(TaskRecord::status)
    }

    /// Replaces every task on the board. No merge is attempted.
    pub fn replace_all(&mut self, tasks: Vec<TaskRecord>) {
        self.tasks = tasks;
    }

    /// Overwrites a task's status and returns the status it replaced.
    ///
    /// Returns `None` without touching the board when the task is unknown.
    pub fn set_status(&mut self, task_id: TaskId, new_status: impl Into<String>) -> Option<String> {
        self.tasks
            .iter_mut()
            .find(|task| task.task_id() == task_id)
            .map(|task| task.replace_status(new_status.into()))
    }

    /// Partitions the board into its four columns.
    ///
    /// The partition borrows the board and is recomputed on every call, so
    /// it cannot go stale.
    #[must_use]
    pub fn columns(&self) -> BoardColumns<'_> {
        let mut columns = BoardColumns::empty();
        for task in &self.tasks {
            columns.column_mut(task.column()).tasks.push(task);
        }
        columns
    }
}

/// Tasks of a single column, in board order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnView<'a> {
    id: ColumnId,
    tasks: Vec<&'a TaskRecord>,
}

impl<'a> ColumnView<'a> {
    const fn new(id: ColumnId) -> Self {
        Self {
            id,
            tasks: Vec::new(),
        }
    }

    /// Returns the column identifier.
    #[must_use]
    pub const fn id(&self) -> ColumnId {
        self.id
    }

    /// Returns the column's tasks in board order.
    #[must_use]
    pub fn tasks(&self) -> &[&'a TaskRecord] {
        &self.tasks
    }

    /// Returns the number of tasks in the column.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns `true` when the column is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Returns the column's tasks ordered by deadline, earliest first.
    ///
    /// Tasks without a deadline go last; ties keep board order.
    #[must_use]
    pub fn by_deadline(&self) -> Vec<&'a TaskRecord> {
        let mut ordered = self.tasks.clone();
        ordered.sort_by_key(|task| (task.deadline().is_none(), task.deadline()));
        ordered
    }
}

/// Four-column projection of a board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardColumns<'a> {
    pending: ColumnView<'a>,
    in_progress: ColumnView<'a>,
    review: ColumnView<'a>,
    closed: ColumnView<'a>,
}

impl<'a> BoardColumns<'a> {
    const fn empty() -> Self {
        Self {
            pending: ColumnView::new(ColumnId::Pending),
            in_progress: ColumnView::new(ColumnId::InProgress),
            review: ColumnView::new(ColumnId::Review),
            closed: ColumnView::new(ColumnId::Closed),
        }
    }

    const fn column_mut(&mut self, id: ColumnId) -> &mut ColumnView<'a> {
        match id {
            ColumnId::Pending => &mut self.pending,
            ColumnId::InProgress => &mut self.in_progress,
            ColumnId::Review => &mut self.review,
            ColumnId::Closed => &mut self.closed,
        }
    }

    /// Returns one column.
    #[must_use]
    pub const fn column(&self, id: ColumnId) -> &ColumnView<'a> {
        match id {
            ColumnId::Pending => &self.pending,
            ColumnId::InProgress => &self.in_progress,
            ColumnId::Review => &self.review,
            ColumnId::Closed => &self.closed,
        }
    }

    /// Iterates the columns in board order.
    pub fn iter(&self) -> impl Iterator<Item = &ColumnView<'a>> {
        ColumnId::ALL.into_iter().map(|id| self.column(id))
    }

    /// Returns the task count of each column in board order.
    #[must_use]
    pub fn counts(&self) -> [(ColumnId, usize); 4] {
        ColumnId::ALL.map(|id| (id, self.column(id).len()))
    }

    /// Returns the total number of tasks across all columns.
    #[must_use]
    pub fn total(&self) -> usize {
        self.iter().map(ColumnView::len).sum()
    }
}

/// Board state shared between a session and its in-flight transitions.
///
/// One mutex guards the whole board. Closures passed to [`SharedBoard::read`]
/// and [`SharedBoard::write`] run synchronously, so the lock is never held
/// across an `.await`.
#[derive(Debug, Clone)]
pub struct SharedBoard {
    inner: Arc<Mutex<BoardState>>,
}

impl SharedBoard {
    /// Wraps a board for shared access.
    #[must_use]
    pub fn new(state: BoardState) -> Self {
        Self {
            inner: Arc::new(Mutex::new(state)),
        }
    }

    /// Runs a read-only closure against the board.
    pub fn read<T>(&self, f: impl FnOnce(&BoardState) -> T) -> T {
        f(&self.lock())
    }

    /// Runs a mutating closure against the board.
    pub fn write<T>(&self, f: impl FnOnce(&mut BoardState) -> T) -> T {
        f(&mut self.lock())
    }

    /// Returns a copy of the current board.
    #[must_use]
    pub fn snapshot(&self) -> BoardState {
        self.read(Clone::clone)
    }

    // Every mutation is a single field assignment, so a poisoned board is
    // still consistent.
    fn lock(&self) -> MutexGuard<'_, BoardState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
