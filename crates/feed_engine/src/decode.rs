use feed_core::{FeedItem, Page};
use serde::Deserialize;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("malformed trending response at line {line}, column {column}: {message}")]
    Malformed {
        line: usize,
        column: usize,
        message: String,
    },
}

impl From<serde_json::Error> for DecodeError {
    fn from(err: serde_json::Error) -> Self {
        DecodeError::Malformed {
            line: err.line(),
            column: err.column(),
            message: err.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct TrendingResponse {
    data: Vec<GifRecord>,
    #[serde(default)]
    pagination: Option<Pagination>,
}

#[derive(Debug, Deserialize)]
struct GifRecord {
    #[serde(default)]
    id: String,
    #[serde(default)]
    title: String,
    images: Images,
}

#[derive(Debug, Deserialize)]
struct Images {
    original: Rendition,
}

#[derive(Debug, Deserialize)]
struct Rendition {
    url: String,
}

#[derive(Debug, Deserialize)]
struct Pagination {
    #[serde(default)]
    total_count: Option<u64>,
}

/// Decode a trending response body into a page, preserving server order.
///
/// A record without `images.original.url` makes the whole body malformed.
pub fn decode_page(bytes: &[u8]) -> Result<Page, DecodeError> {
    let response: TrendingResponse = serde_json::from_slice(bytes)?;
    let items = response
        .data
        .into_iter()
        .map(|record| FeedItem {
            id: record.id,
            title: record.title,
            image_url: record.images.original.url,
        })
        .collect();
    Ok(Page {
        items,
        total_count: response.pagination.and_then(|p| p.total_count),
    })
}
