use std::sync::{Arc, Mutex, PoisonError};

use feed_core::{update, Effect, FeedState, FeedViewModel, Msg, PageRequest, RequestId};
use feed_logging::{feed_debug, feed_info, feed_warn};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::fetch::PageFetcher;
use crate::{AdvanceOutcome, ApiKey};

/// Owns the feed state for one screen and drives page fetches.
///
/// The state lives behind a mutex that is never held across an await, so the
/// loading latch holds even when `advance` is called from several threads.
/// Every transition publishes a fresh [`FeedViewModel`] to subscribers.
pub struct FeedController {
    fetcher: Arc<dyn PageFetcher>,
    api_key: ApiKey,
    state: Mutex<FeedState>,
    snapshots: watch::Sender<FeedViewModel>,
}

impl FeedController {
    pub fn new(fetcher: Arc<dyn PageFetcher>, api_key: ApiKey, page_size: u32) -> Self {
        let state = FeedState::with_page_size(page_size);
        let (snapshots, _) = watch::channel(state.view());
        Self {
            fetcher,
            api_key,
            state: Mutex::new(state),
            snapshots,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<FeedViewModel> {
        self.snapshots.subscribe()
    }

    pub fn snapshot(&self) -> FeedViewModel {
        self.snapshots.borrow().clone()
    }

    /// Fetch the next page and merge it. Runs the fetch to completion.
    pub async fn advance(&self) -> AdvanceOutcome {
        self.advance_with_cancel(&CancellationToken::new()).await
    }

    /// Like [`advance`](Self::advance), but gives up when `cancel` fires.
    ///
    /// Cancellation clears the loading latch without touching the failure flag.
    pub async fn advance_with_cancel(&self, cancel: &CancellationToken) -> AdvanceOutcome {
        let Some(request) = self.begin() else {
            feed_debug!("advance ignored: a page request is already in flight");
            return AdvanceOutcome::Skipped;
        };
        let mut pending = PendingRequest::new(self, request.request_id);

        let result = tokio::select! {
            biased;
            () = cancel.cancelled() => None,
            result = self.fetcher.fetch_page(&self.api_key, request.limit, request.offset) => Some(result),
        };

        let request_id = request.request_id;
        let (msg, outcome) = match result {
            None => {
                feed_info!("page request {} cancelled", request_id);
                (Msg::PageCancelled { request_id }, AdvanceOutcome::Cancelled)
            }
            Some(Ok(page)) => {
                let received = page.len();
                feed_debug!(
                    "page request {} at offset {} appended {} items",
                    request_id,
                    request.offset,
                    received
                );
                (
                    Msg::PageLoaded { request_id, page },
                    AdvanceOutcome::Appended(received),
                )
            }
            Some(Err(err)) => {
                feed_warn!(
                    "page request {} at offset {} failed: {}",
                    request_id,
                    request.offset,
                    err
                );
                (Msg::PageFailed { request_id }, AdvanceOutcome::Failed)
            }
        };
        pending.settle(msg);
        outcome
    }

    fn begin(&self) -> Option<PageRequest> {
        self.dispatch(Msg::AdvanceRequested)
            .into_iter()
            .find_map(|effect| match effect {
                Effect::FetchPage(request) => Some(request),
            })
    }

    fn dispatch(&self, msg: Msg) -> Vec<Effect> {
        let mut guard = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let state = std::mem::take(&mut *guard);
        let (mut state, effects) = update(state, msg);
        if state.consume_dirty() {
            self.snapshots.send_replace(state.view());
        }
        *guard = state;
        effects
    }
}

/// Releases the loading latch if the `advance` future is dropped mid-flight.
struct PendingRequest<'a> {
    controller: &'a FeedController,
    request_id: RequestId,
    settled: bool,
}

impl<'a> PendingRequest<'a> {
    fn new(controller: &'a FeedController, request_id: RequestId) -> Self {
        Self {
            controller,
            request_id,
            settled: false,
        }
    }

    fn settle(&mut self, msg: Msg) {
        self.settled = true;
        self.controller.dispatch(msg);
    }
}

impl Drop for PendingRequest<'_> {
    fn drop(&mut self) {
        if !self.settled {
            feed_debug!("page request {} dropped before completion", self.request_id);
            self.controller.dispatch(Msg::PageCancelled {
                request_id: self.request_id,
            });
        }
    }
}
