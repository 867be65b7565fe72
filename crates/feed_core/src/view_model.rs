use crate::FeedItem;

/// Immutable snapshot of the feed handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedViewModel {
    pub items: Vec<FeedItem>,
    pub cursor: u64,
    pub page_size: u32,
    pub loading: bool,
    pub failed: bool,
    pub total_count: Option<u64>,
    /// Number of items in the most recent successful page.
    pub last_page_len: Option<usize>,
    pub layout: ScreenLayout,
    pub trailing: TrailingControl,
}

impl Default for FeedViewModel {
    fn default() -> Self {
        crate::FeedState::new().view()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenLayout {
    /// Nothing to show yet and the first page is on its way.
    CenteredSpinner,
    /// The item list followed by the trailing control.
    List,
}

impl ScreenLayout {
    pub fn for_state(items_empty: bool, loading: bool) -> Self {
        if items_empty && loading {
            ScreenLayout::CenteredSpinner
        } else {
            ScreenLayout::List
        }
    }
}

/// What sits below the last item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrailingControl {
    Spinner,
    Retry,
    LoadMore,
}

impl TrailingControl {
    /// Loading wins over a previous failure.
    pub fn for_state(loading: bool, failed: bool) -> Self {
        if loading {
            TrailingControl::Spinner
        } else if failed {
            TrailingControl::Retry
        } else {
            TrailingControl::LoadMore
        }
    }

    /// Whether activating the control should request another page.
    pub fn requests_advance(self) -> bool {
        !matches!(self, TrailingControl::Spinner)
    }
}
