//! Normalization of the two list-response shapes.
//!
//! Some endpoints paginate (`{count, results, next}`), others return a bare
//! array. The ambiguity is resolved here, once: everything downstream sees
//! a uniform [`PageChunk`].

use serde::Deserialize;

use crate::error::{ApiError, ApiResult};

/// Raw wire shape of a list endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ListResponse<T> {
    Paginated {
        count: u64,
        #[serde(default)]
        next: Option<String>,
        results: Vec<T>,
    },
    Plain(Vec<T>),
}

/// Uniform list shape: the items plus an opaque continuation token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageChunk<T> {
    pub items: Vec<T>,
    /// Present when the server reports another page.
    pub next_page_token: Option<String>,
}

impl<T> ListResponse<T> {
    pub fn normalize(self) -> PageChunk<T> {
        match self {
            ListResponse::Paginated { next, results, .. } => PageChunk {
                items: results,
                next_page_token: next,
            },
            ListResponse::Plain(items) => PageChunk {
                items,
                next_page_token: None,
            },
        }
    }
}

impl<T> PageChunk<T> {
    pub fn from_items(items: Vec<T>) -> Self {
        Self {
            items,
            next_page_token: None,
        }
    }
}

/// Accumulate every page of a paginated listing.
///
/// `fetch_page` is called with 1-indexed page numbers until a chunk arrives
/// without a continuation token. Any failing page fails the whole
/// accumulation. The page cap is a runaway guard, not a real limit.
pub async fn fetch_all<T, F>(mut fetch_page: F) -> ApiResult<Vec<T>>
where
    F: AsyncFnMut(u32) -> ApiResult<PageChunk<T>>,
{
    const MAX_PAGES: u32 = 1000;

    let mut items = Vec::new();
    let mut page = 1;

    loop {
        let chunk = fetch_page(page).await?;
        items.extend(chunk.items);

        if chunk.next_page_token.is_none() {
            return Ok(items);
        }

        page += 1;
        if page > MAX_PAGES {
            return Err(ApiError::Transport(anyhow::anyhow!(
                "listing exceeded {MAX_PAGES} pages"
            )));
        }
    }
}
