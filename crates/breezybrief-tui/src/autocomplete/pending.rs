use std::sync::Arc;
use std::time::Duration;

use breezybrief_api::AirportSearch;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::trace;

use super::{FieldId, SearchOutcome};
use crate::app::async_tasks::AsyncResult;

/// The one live search operation of a field: debounce timer plus fetch.
///
/// Cancelling (or dropping) the handle cancels its token and aborts the
/// task, so a superseded operation can never deliver a usable outcome.
#[derive(Debug)]
pub struct PendingSearch {
    token: CancellationToken,
    task: JoinHandle<()>,
}

impl PendingSearch {
    /// Wait `delay`, then run `search` for `query` and report to `tx`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(
        field: FieldId,
        query: String,
        delay: Duration,
        search: Arc<dyn AirportSearch>,
        tx: UnboundedSender<AsyncResult>,
    ) -> Self {
        let token = CancellationToken::new();
        let task_token = token.clone();

        let task = tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = task_token.cancelled() => return,
                _ = tokio::time::sleep(delay) => {}
            }

            trace!(?field, %query, "debounce elapsed, searching");
            let results = search.search(&query, &task_token).await;
            if task_token.is_cancelled() {
                return;
            }

            let _ = tx.send(AsyncResult::Suggestions(SearchOutcome {
                field,
                query,
                token: task_token,
                results,
            }));
        });

        Self { token, task }
    }

    pub fn cancel(&self) {
        self.token.cancel();
        self.task.abort();
    }
}

impl Drop for PendingSearch {
    fn drop(&mut self) {
        self.cancel();
    }
}
