//! Feed engine: page fetching, the pagination controller and its background driver.
mod controller;
mod decode;
mod engine;
mod fetch;
mod types;

pub use controller::FeedController;
pub use decode::{decode_page, DecodeError};
pub use engine::EngineHandle;
pub use fetch::{trending_endpoint, FetchSettings, PageFetcher, ReqwestFetcher, DEFAULT_BASE_URL};
pub use types::{AdvanceOutcome, ApiKey, EngineError, FailureKind, FetchError};
