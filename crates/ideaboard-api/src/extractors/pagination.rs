//! Pagination extractor
//!
//! Extracts opaque cursor pagination parameters from query strings. Limits are
//! clamped per listing by the service layer.

use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use ideaboard_service::{IdeaSort, ListQuery};
use serde::Deserialize;

use crate::response::ApiError;

/// Raw pagination query parameters
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    /// Cursor returned as `nextCursor` by the previous page
    #[serde(default)]
    pub cursor: Option<String>,
    /// Maximum number of items to return
    #[serde(default)]
    pub limit: Option<i64>,
}

/// Pagination parameters for a listing
#[derive(Debug, Clone, Default)]
pub struct Pagination {
    pub cursor: Option<String>,
    pub limit: Option<i64>,
}

impl From<PaginationParams> for Pagination {
    fn from(params: PaginationParams) -> Self {
        Self {
            cursor: params.cursor.filter(|c| !c.trim().is_empty()),
            limit: params.limit,
        }
    }
}

impl From<Pagination> for ListQuery {
    fn from(pagination: Pagination) -> Self {
        ListQuery::new(pagination.cursor, pagination.limit)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Pagination
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<PaginationParams>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_query(e.to_string()))?;

        Ok(Pagination::from(params))
    }
}

#[derive(Debug, Default, Deserialize)]
struct SortParams {
    #[serde(default)]
    sort: Option<String>,
}

/// `?sort=new|top` for the idea feed, defaulting to `new`
#[derive(Debug, Clone, Copy, Default)]
pub struct FeedSort(pub IdeaSort);

#[async_trait]
impl<S> FromRequestParts<S> for FeedSort
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<SortParams>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_query(e.to_string()))?;

        match params.sort.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => Ok(FeedSort(raw.parse()?)),
            None => Ok(FeedSort::default()),
        }
    }
}
