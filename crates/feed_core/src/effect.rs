use crate::RequestId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Fetch one page from the remote feed and answer with a completion `Msg`
    /// carrying the same `request_id`.
    FetchPage(PageRequest),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub request_id: RequestId,
    pub limit: u32,
    pub offset: u64,
}
