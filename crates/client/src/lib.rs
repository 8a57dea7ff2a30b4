//! `stockdesk-client` — collaborator boundary and view composition.
//!
//! Everything here is single-threaded and cooperative: data fetches are the
//! only suspension points, views own their fetched collections exclusively,
//! and action results are applied by replacing local entries with the
//! server's returned representation.

pub mod api;
pub mod context;
pub mod error;
pub mod http;
pub mod page;
pub mod views;

pub use api::{Backend, ListQuery};
pub use context::{AppContext, Role, Session, SessionUser};
pub use error::{ApiError, ApiResult, FieldErrors, FormErrors};
pub use http::HttpBackend;
pub use page::{ListResponse, PageChunk, fetch_all};
