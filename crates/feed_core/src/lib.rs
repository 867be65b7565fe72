//! Feed core: pure pagination state machine and view-model helpers.
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::{Effect, PageRequest};
pub use msg::Msg;
pub use state::{FeedItem, FeedState, Page, RequestId, DEFAULT_PAGE_SIZE};
pub use update::update;
pub use view_model::{FeedViewModel, ScreenLayout, TrailingControl};
