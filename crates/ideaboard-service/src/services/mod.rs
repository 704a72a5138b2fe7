//! Business logic services
//!
//! Each service borrows the [`ServiceContext`] and orchestrates validation,
//! repository calls, and DTO mapping for one area.

pub mod comment;
pub mod context;
pub mod error;
pub mod idea;
pub mod vote;

pub use comment::CommentService;
pub use context::ServiceContext;
pub use error::{ServiceError, ServiceResult};
pub use idea::IdeaService;
pub use vote::VoteService;
