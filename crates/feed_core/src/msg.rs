#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User (or infinite scroll) asked for the next page, or a retry.
    AdvanceRequested,
    /// The fetch for `request_id` returned a page.
    PageLoaded {
        request_id: crate::RequestId,
        page: crate::Page,
    },
    /// The fetch for `request_id` failed for any reason.
    PageFailed { request_id: crate::RequestId },
    /// The fetch for `request_id` was abandoned before it completed.
    PageCancelled { request_id: crate::RequestId },
}
