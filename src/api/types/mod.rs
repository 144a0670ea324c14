//! HTTP request and response types

pub mod ask;
pub mod error;
pub mod json;
pub mod stats;

pub use ask::{AskMeta, AskRequest, AskResponse};
pub use error::{ApiError, ApiErrorResponse};
pub use json::Json;
pub use stats::{
    CacheEntriesResponse, CacheEntryResponse, RecentHitResponse, SessionListResponse, SessionQuery, StatsResponse,
};
