//! HTTP request handlers
//!
//! Handlers are organized by resource.

pub mod comments;
pub mod health;
pub mod ideas;
