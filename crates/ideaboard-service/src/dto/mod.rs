//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{
    CreateCommentRequest, CreateIdeaRequest, IdeaSort, ListQuery, UpdateCommentRequest,
    VoteRequest,
};

pub use responses::{
    CommentListResponse, CommentResponse, CreateCommentResponse, CreateIdeaResponse,
    DeleteCommentResponse, HealthChecks, HealthResponse, IdeaEnvelope, IdeaListResponse,
    IdeaResponse, ReadinessResponse, ReplyListResponse, UpdateCommentResponse, VoteResponse,
};
