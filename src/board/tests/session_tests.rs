//! Session tests covering drag-and-drop through to settlement.

use std::sync::Arc;

use super::support::{PROJECT, task, wait_for_requests};
use crate::board::{
    adapters::memory::{InMemoryStatusUpdater, InMemoryTaskSource, RecordingNotifier},
    domain::{ColumnId, DragState, TaskId},
    ports::{Notification, StatusUpdateError, StatusUpdateRequest, TaskSourceError},
    services::{BoardSession, BoardSessionError, DispatchedTransition, DragEndOutcome},
};
use eyre::{bail, ensure};
use mockable::DefaultClock;
use rstest::{fixture, rstest};

type Session = BoardSession<InMemoryStatusUpdater, RecordingNotifier, DefaultClock>;

struct Harness {
    session: Session,
    updater: Arc<InMemoryStatusUpdater>,
    notifier: Arc<RecordingNotifier>,
}

impl Harness {
    fn status(&self, task_id: u64) -> Option<String> {
        self.session
            .board()
            .read(|board| board.status_of(TaskId::new(task_id)).map(str::to_owned))
    }
}

#[fixture]
fn harness() -> Harness {
    let updater = Arc::new(InMemoryStatusUpdater::new());
    let notifier = Arc::new(RecordingNotifier::new());
    let session = BoardSession::new(
        PROJECT,
        Arc::clone(&updater),
        Arc::clone(&notifier),
        Arc::new(DefaultClock),
    );
    session.load(vec![task(1, "pending"), task(2, "review")]);
    Harness {
        session,
        updater,
        notifier,
    }
}

fn dispatched(outcome: DragEndOutcome) -> eyre::Result<DispatchedTransition> {
    match outcome {
        DragEndOutcome::Dispatched(transition) => Ok(transition),
        other => bail!("expected a dispatched transition, got {other:?}"),
    }
}

#[rstest]
#[case::remote_success(true, "closed")]
#[case::remote_failure(false, "pending")]
#[tokio::test(flavor = "multi_thread")]
async fn dropping_pending_task_on_closed_column(
    mut harness: Harness,
    #[case] accepted: bool,
    #[case] expected_final: &str,
) -> eyre::Result<()> {
    let held = harness.updater.hold_next()?;

    ensure!(harness.session.drag_start(TaskId::new(1)));
    let transition = dispatched(harness.session.drag_end(Some("closed")))?;

    ensure!(harness.session.drag_state() == DragState::Idle);
    ensure!(harness.status(1).as_deref() == Some("closed"));
    ensure!(transition.from == "pending" && transition.to == "closed");

    wait_for_requests(&harness.updater, 1).await?;
    ensure!(
        harness.updater.requests()? == vec![StatusUpdateRequest::new(TaskId::new(1), "closed")]
    );

    if accepted {
        held.succeed();
    } else {
        held.fail(StatusUpdateError::rejected(Some(500), "Failed to update status"));
    }
    let outcome = transition.wait().await?;

    ensure!(outcome.is_committed() == accepted);
    ensure!(harness.status(1).as_deref() == Some(expected_final));
    ensure!(harness.status(2).as_deref() == Some("review"));
    let Some(notification) = harness.notifier.last() else {
        bail!("a notification should have been delivered");
    };
    ensure!(notification.is_failure() != accepted);
    ensure!(notification.task_id() == TaskId::new(1));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn dropping_review_task_on_pending_task_reassigns_to_pending(
    mut harness: Harness,
) -> eyre::Result<()> {
    ensure!(harness.session.drag_start(TaskId::new(2)));
    let transition = dispatched(harness.session.drag_end(Some("1")))?;

    ensure!(transition.to == "pending");
    let outcome = transition.wait().await?;

    ensure!(outcome.is_committed());
    ensure!(harness.status(2).as_deref() == Some("pending"));
    let in_pending = harness
        .session
        .with_columns(|columns| columns.column(ColumnId::Pending).len());
    ensure!(in_pending == 2);
    Ok(())
}

#[rstest]
#[case::onto_own_column("review")]
#[case::onto_itself("2")]
#[tokio::test(flavor = "multi_thread")]
async fn same_column_drop_makes_no_remote_call(
    mut harness: Harness,
    #[case] over_id: &str,
) -> eyre::Result<()> {
    let before = harness.session.snapshot();

    ensure!(harness.session.drag_start(TaskId::new(2)));
    let outcome = harness.session.drag_end(Some(over_id));

    ensure!(matches!(outcome, DragEndOutcome::Unchanged { task_id } if task_id == TaskId::new(2)));
    ensure!(harness.session.snapshot() == before);
    ensure!(harness.updater.requests()?.is_empty());
    ensure!(harness.notifier.notifications().is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_task_and_target_leave_board_untouched(mut harness: Harness) -> eyre::Result<()> {
    let before = harness.session.snapshot();

    ensure!(!harness.session.drag_start(TaskId::new(99)));
    ensure!(matches!(
        harness.session.drag_end(Some("closed")),
        DragEndOutcome::NotDragging
    ));

    ensure!(harness.session.drag_start(TaskId::new(1)));
    ensure!(matches!(
        harness.session.drag_end(Some("99")),
        DragEndOutcome::Cancelled { .. }
    ));
    ensure!(harness.session.drag_start(TaskId::new(1)));
    ensure!(matches!(
        harness.session.drag_end(None),
        DragEndOutcome::Cancelled { .. }
    ));

    ensure!(harness.session.snapshot() == before);
    ensure!(harness.updater.requests()?.is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn new_drag_can_start_while_a_transition_is_in_flight(
    mut harness: Harness,
) -> eyre::Result<()> {
    let held = harness.updater.hold_next()?;

    ensure!(harness.session.drag_start(TaskId::new(1)));
    let first = dispatched(harness.session.drag_end(Some("review")))?;
    wait_for_requests(&harness.updater, 1).await?;

    ensure!(harness.session.drag_start(TaskId::new(2)));
    let second = dispatched(harness.session.drag_end(Some("closed")))?;
    second.wait().await?;
    ensure!(harness.status(2).as_deref() == Some("closed"));

    held.succeed();
    first.wait().await?;
    ensure!(harness.status(1).as_deref() == Some("review"));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn load_from_walks_every_page(harness: Harness) -> eyre::Result<()> {
    let source = InMemoryTaskSource::new();
    let tasks: Vec<_> = (1..=5).map(|id| task(id, "in-progress")).collect();
    source.set_project_tasks(PROJECT, tasks)?;

    let loaded = harness.session.load_from(&source, 2).await?;

    ensure!(loaded == 5);
    let ids: Vec<_> = harness
        .session
        .snapshot()
        .tasks()
        .iter()
        .map(|record| record.task_id().value())
        .collect();
    ensure!(ids == [1, 2, 3, 4, 5]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failed_load_keeps_current_board(harness: Harness) -> eyre::Result<()> {
    let source = InMemoryTaskSource::new();
    source.fail_with(TaskSourceError::Rejected {
        code: Some(401),
        title: Some("Unauthorized".to_owned()),
        message: "Session expired".to_owned(),
    })?;
    let before = harness.session.snapshot();

    let result = harness.session.load_from(&source, 50).await;

    ensure!(matches!(result, Err(BoardSessionError::Source(_))));
    ensure!(harness.session.snapshot() == before);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failure_notification_carries_backend_message(mut harness: Harness) -> eyre::Result<()> {
    harness.updater.fail_next(StatusUpdateError::rejected(
        Some(403),
        "You are not authorized to update this task",
    ))?;

    ensure!(harness.session.drag_start(TaskId::new(1)));
    dispatched(harness.session.drag_end(Some("in-progress")))?
        .wait()
        .await?;

    ensure!(
        harness.notifier.notifications()
            == vec![Notification::Failed {
                task_id: TaskId::new(1),
                message: "You are not authorized to update this task".to_owned(),
            }]
    );
    ensure!(harness.status(1).as_deref() == Some("pending"));
    Ok(())
}
