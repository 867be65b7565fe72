use crate::{Effect, FeedState, Msg};

/// Pure update function: applies a message to state and returns any effects.
///
/// Completions for a request that is not in flight are ignored, so every
/// `FetchPage` effect produces exactly one transition out of loading.
pub fn update(mut state: FeedState, msg: Msg) -> (FeedState, Vec<Effect>) {
    let effects = match msg {
        Msg::AdvanceRequested => {
            if state.is_loading() {
                Vec::new()
            } else {
                vec![Effect::FetchPage(state.begin_request())]
            }
        }
        Msg::PageLoaded { request_id, page } => {
            state.apply_page(request_id, page);
            Vec::new()
        }
        Msg::PageFailed { request_id } => {
            state.apply_failure(request_id);
            Vec::new()
        }
        Msg::PageCancelled { request_id } => {
            state.apply_cancel(request_id);
            Vec::new()
        }
    };

    (state, effects)
}
