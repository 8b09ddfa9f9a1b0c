//! In-memory status updater for board tests and offline sessions.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, RwLock};
use tokio::sync::oneshot;

use crate::board::ports::{
    StatusUpdateError, StatusUpdateRequest, StatusUpdateResult, TaskStatusUpdater,
};

/// Scripted in-memory status updater.
///
/// Every call is recorded. Responses are taken from a script in call order;
/// once the script is exhausted, calls succeed. A scripted response can be
/// held open with [`InMemoryStatusUpdater::hold_next`] so tests can observe
/// the board while a transition is still in flight and decide the order in
/// which overlapping calls resolve.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStatusUpdater {
    state: Arc<RwLock<InMemoryUpdaterState>>,
}

#[derive(Debug, Default)]
struct InMemoryUpdaterState {
    requests: Vec<StatusUpdateRequest>,
    script: VecDeque<ScriptedResponse>,
}

#[derive(Debug)]
enum ScriptedResponse {
    Ready(StatusUpdateResult<()>),
    Held(oneshot::Receiver<StatusUpdateResult<()>>),
}

/// Response for a held call, released by the test.
#[derive(Debug)]
pub struct HeldResponse {
    sender: oneshot::Sender<StatusUpdateResult<()>>,
}

impl HeldResponse {
    /// Lets the held call succeed.
    pub fn succeed(self) {
        self.release(Ok(()));
    }

    /// Lets the held call fail with `error`.
    pub fn fail(self, error: StatusUpdateError) {
        self.release(Err(error));
    }

    fn release(self, result: StatusUpdateResult<()>) {
        // The receiver is gone only when the call future was dropped.
        let _dropped = self.sender.send(result);
    }
}

fn lock_error(err: impl ToString) -> StatusUpdateError {
    StatusUpdateError::transport(std::io::Error::other(err.to_string()))
}

impl InMemoryStatusUpdater {
    /// Creates an updater that accepts every call.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the next unscripted call fail with `error`.
    ///
    /// # Errors
    ///
    /// Returns a transport error when lock acquisition fails.
    pub fn fail_next(&self, error: StatusUpdateError) -> StatusUpdateResult<()> {
        self.push(ScriptedResponse::Ready(Err(error)))
    }

    /// Holds the next unscripted call open until the returned handle is
    /// released.
    ///
    /// A held call whose handle is dropped fails with a transport error.
    ///
    /// # Errors
    ///
    /// Returns a transport error when lock acquisition fails.
    pub fn hold_next(&self) -> StatusUpdateResult<HeldResponse> {
        let (sender, receiver) = oneshot::channel();
        self.push(ScriptedResponse::Held(receiver))?;
        Ok(HeldResponse { sender })
    }

    /// Returns every request received, in call order.
    ///
    /// # Errors
    ///
    /// Returns a transport error when lock acquisition fails.
    pub fn requests(&self) -> StatusUpdateResult<Vec<StatusUpdateRequest>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.requests.clone())
    }

    fn push(&self, response: ScriptedResponse) -> StatusUpdateResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.script.push_back(response);
        Ok(())
    }
}

#[async_trait]
impl TaskStatusUpdater for InMemoryStatusUpdater {
    async fn update_status(&self, request: &StatusUpdateRequest) -> StatusUpdateResult<()> {
        let scripted = {
            let mut state = self.state.write().map_err(lock_error)?;
            state.requests.push(request.clone());
            state.script.pop_front()
        };

        match scripted {
            None => Ok(()),
            Some(ScriptedResponse::Ready(result)) => result,
            Some(ScriptedResponse::Held(receiver)) => {
                receiver.await.map_err(StatusUpdateError::transport)?
            }
        }
    }
}
