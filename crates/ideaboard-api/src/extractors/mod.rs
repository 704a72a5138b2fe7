//! Axum extractors for request handling
//!
//! Custom extractors for authentication, validation, and pagination.

mod auth;
mod pagination;
mod path;
mod validated;

pub use auth::{AuthUser, OptionalAuthUser};
pub use pagination::{FeedSort, Pagination, PaginationParams};
pub use path::{CommentIdPath, IdeaIdPath, SnowflakePath};
pub use validated::ValidatedJson;
