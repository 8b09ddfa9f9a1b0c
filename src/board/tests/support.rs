//! Shared fixtures for board unit tests.

use std::{
    sync::atomic::{AtomicI64, Ordering},
    time::Duration,
};

use chrono::{DateTime, Local, TimeDelta, Utc};
use mockable::Clock;
use tokio::time::timeout;

use crate::board::{
    adapters::memory::InMemoryStatusUpdater,
    domain::{BoardState, ProjectId, TaskId, TaskRecord},
};

pub const PROJECT: ProjectId = ProjectId::new(7);

/// Builds a task with a name derived from its id.
pub fn task(id: u64, status: &str) -> TaskRecord {
    TaskRecord::new(TaskId::new(id), format!("Task {id}"), status)
}

/// Builds a board holding `tasks` in the given order.
pub fn board_of(tasks: &[(u64, &str)]) -> BoardState {
    BoardState::with_tasks(
        PROJECT,
        tasks.iter().map(|(id, status)| task(*id, status)).collect(),
    )
}

/// Waits until `updater` has received `count` requests.
///
/// Pins the order in which spawned transitions reach the updater.
pub async fn wait_for_requests(
    updater: &InMemoryStatusUpdater,
    count: usize,
) -> eyre::Result<()> {
    timeout(Duration::from_secs(5), async {
        while updater.requests().map_or(0, |requests| requests.len()) < count {
            tokio::task::yield_now().await;
        }
    })
    .await
    .map_err(|_| eyre::eyre!("updater never received {count} requests"))
}

/// Clock that starts at `start` and advances one second per reading.
pub struct SteppingClock {
    start: DateTime<Utc>,
    readings: AtomicI64,
}

impl SteppingClock {
    pub const fn new(start: DateTime<Utc>) -> Self {
        Self {
            start,
            readings: AtomicI64::new(0),
        }
    }
}

impl Clock for SteppingClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        let step = self.readings.fetch_add(1, Ordering::SeqCst);
        self.start + TimeDelta::seconds(step)
    }
}
