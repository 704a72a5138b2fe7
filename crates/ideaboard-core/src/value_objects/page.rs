//! Page request and page result for cursor pagination

use serde::Serialize;

use crate::error::DomainError;
use crate::value_objects::{Cursor, ListingKind, SortKey};

/// A validated request for one page of a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub kind: ListingKind,
    pub cursor: Option<Cursor>,
    pub limit: u32,
}

impl PageRequest {
    /// Build a request from raw client input.
    ///
    /// A missing limit takes the listing's default; any other value is clamped
    /// into `1..=max`. A cursor issued for a different listing is rejected.
    pub fn new(
        kind: ListingKind,
        cursor: Option<&str>,
        limit: Option<i64>,
    ) -> Result<Self, DomainError> {
        let cursor = match cursor.map(str::trim).filter(|c| !c.is_empty()) {
            Some(token) => Some(Cursor::decode(token, kind)?),
            None => None,
        };

        let max = i64::from(kind.max_limit());
        let limit = match limit {
            Some(requested) => requested.clamp(1, max) as u32,
            None => kind.default_limit(),
        };

        Ok(Self {
            kind,
            cursor,
            limit,
        })
    }

    /// First page with the default size
    pub fn first(kind: ListingKind) -> Self {
        Self {
            kind,
            cursor: None,
            limit: kind.default_limit(),
        }
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit.clamp(1, self.kind.max_limit());
        self
    }

    pub fn after(mut self, cursor: Cursor) -> Self {
        self.cursor = Some(cursor);
        self
    }

    /// Rows to fetch: one extra to learn whether another page exists
    #[inline]
    pub fn fetch_limit(&self) -> i64 {
        i64::from(self.limit) + 1
    }
}

/// One page of results
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub next_cursor: Option<String>,
    pub has_more: bool,
}

impl<T> Page<T> {
    /// Build a page from rows fetched with [`PageRequest::fetch_limit`].
    ///
    /// The extra row is dropped; when present, the cursor points at the last
    /// row kept.
    pub fn from_overfetch<F>(mut rows: Vec<T>, request: &PageRequest, key: F) -> Self
    where
        F: Fn(&T) -> SortKey,
    {
        let limit = request.limit as usize;
        let has_more = rows.len() > limit;
        rows.truncate(limit);

        let next_cursor = if has_more {
            rows.last()
                .map(|last| Cursor::new(request.kind, key(last)).encode())
        } else {
            None
        };

        Self {
            items: rows,
            next_cursor,
            has_more,
        }
    }

    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            next_cursor: None,
            has_more: false,
        }
    }

    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            items: self.items.into_iter().map(f).collect(),
            next_cursor: self.next_cursor,
            has_more: self.has_more,
        }
    }
}
