use crate::effect::PageRequest;
use crate::view_model::{FeedViewModel, ScreenLayout, TrailingControl};

pub type RequestId = u64;

/// Page size used when none is configured.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// One trending image as the feed sees it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FeedItem {
    pub id: String,
    pub title: String,
    pub image_url: String,
}

/// One batch of items returned by a single fetch, in server order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Page {
    pub items: Vec<FeedItem>,
    /// Size of the whole feed as reported by the server, if it said.
    pub total_count: Option<u64>,
}

impl Page {
    pub fn new(items: Vec<FeedItem>) -> Self {
        Self {
            items,
            total_count: None,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedState {
    items: Vec<FeedItem>,
    cursor: u64,
    page_size: u32,
    in_flight: Option<RequestId>,
    failed: bool,
    next_request_id: RequestId,
    total_count: Option<u64>,
    last_page_len: Option<usize>,
    dirty: bool,
}

impl Default for FeedState {
    fn default() -> Self {
        Self::with_page_size(DEFAULT_PAGE_SIZE)
    }
}

impl FeedState {
    pub fn new() -> Self {
        Self::default()
    }

    /// A page size of zero is raised to one; the feed must be able to make
    /// progress.
    pub fn with_page_size(page_size: u32) -> Self {
        Self {
            items: Vec::new(),
            cursor: 0,
            page_size: page_size.max(1),
            in_flight: None,
            failed: false,
            next_request_id: 1,
            total_count: None,
            last_page_len: None,
            dirty: false,
        }
    }

    pub fn items(&self) -> &[FeedItem] {
        &self.items
    }

    pub fn cursor(&self) -> u64 {
        self.cursor
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn has_failed(&self) -> bool {
        self.failed
    }

    pub fn in_flight(&self) -> Option<RequestId> {
        self.in_flight
    }

    pub fn view(&self) -> FeedViewModel {
        let loading = self.is_loading();
        FeedViewModel {
            items: self.items.clone(),
            cursor: self.cursor,
            page_size: self.page_size,
            loading,
            failed: self.failed,
            total_count: self.total_count,
            last_page_len: self.last_page_len,
            layout: ScreenLayout::for_state(self.items.is_empty(), loading),
            trailing: TrailingControl::for_state(loading, self.failed),
        }
    }

    /// Returns whether anything changed since the last call and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Latches the state into loading and describes the page to fetch.
    pub(crate) fn begin_request(&mut self) -> PageRequest {
        let request_id = self.next_request_id;
        self.next_request_id += 1;
        self.in_flight = Some(request_id);
        self.dirty = true;
        PageRequest {
            request_id,
            limit: self.page_size,
            offset: self.cursor,
        }
    }

    /// Returns false when `request_id` is not the request in flight.
    pub(crate) fn apply_page(&mut self, request_id: RequestId, page: Page) -> bool {
        if !self.settle(request_id) {
            return false;
        }
        let received = page.items.len();
        self.items.extend(page.items);
        self.cursor += received as u64;
        self.failed = false;
        self.last_page_len = Some(received);
        if page.total_count.is_some() {
            self.total_count = page.total_count;
        }
        true
    }

    pub(crate) fn apply_failure(&mut self, request_id: RequestId) -> bool {
        if !self.settle(request_id) {
            return false;
        }
        self.failed = true;
        true
    }

    pub(crate) fn apply_cancel(&mut self, request_id: RequestId) -> bool {
        self.settle(request_id)
    }

    fn settle(&mut self, request_id: RequestId) -> bool {
        if self.in_flight != Some(request_id) {
            return false;
        }
        self.in_flight = None;
        self.dirty = true;
        true
    }
}
