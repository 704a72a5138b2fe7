//! # ideaboard-service
//!
//! Application layer: comment, vote and idea use cases, DTOs, and the
//! dependency container they run against.

pub mod dto;
pub mod services;

pub use dto::{
    CommentListResponse, CommentResponse, CreateCommentRequest, CreateCommentResponse,
    CreateIdeaRequest, CreateIdeaResponse, DeleteCommentResponse, HealthResponse, IdeaEnvelope,
    IdeaListResponse, IdeaResponse, IdeaSort, ListQuery, ReadinessResponse, ReplyListResponse,
    UpdateCommentRequest, UpdateCommentResponse, VoteRequest, VoteResponse,
};
pub use services::{
    CommentService, IdeaService, ServiceContext, ServiceError, ServiceResult,
    VoteService,
};
