//! Opaque continuation cursors for keyset pagination
//!
//! A cursor carries the sort key of the last row a page returned, tagged with the
//! listing it was issued for. Resuming selects rows strictly after that key in the
//! listing's order, so a page never repeats or skips rows of an unchanged dataset.
//! Tokens are URL-safe base64 of a small JSON document; callers only echo them back.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// A paginated listing and its fixed ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ListingKind {
    /// Top-level comments of an idea: votes DESC, created DESC, id DESC
    #[serde(rename = "c")]
    TopLevelComments,
    /// Direct replies of a comment: votes DESC, created ASC, id ASC
    #[serde(rename = "r")]
    Replies,
    /// Idea feed, newest first: created DESC, id DESC
    #[serde(rename = "n")]
    IdeasNew,
    /// Idea feed, best first: votes DESC, created DESC, id DESC
    #[serde(rename = "t")]
    IdeasTop,
}

impl ListingKind {
    pub const fn default_limit(self) -> u32 {
        match self {
            Self::TopLevelComments | Self::IdeasNew | Self::IdeasTop => 20,
            Self::Replies => 10,
        }
    }

    pub const fn max_limit(self) -> u32 {
        match self {
            Self::TopLevelComments => 100,
            Self::Replies | Self::IdeasNew | Self::IdeasTop => 50,
        }
    }

    /// Whether vote totals are the leading sort key
    pub const fn ranks_by_votes(self) -> bool {
        !matches!(self, Self::IdeasNew)
    }

    /// Whether ties on votes resolve oldest first
    pub const fn oldest_first(self) -> bool {
        matches!(self, Self::Replies)
    }

    /// Position of `a` relative to `b` in this listing. `Less` means `a` is listed first.
    pub fn compare(self, a: &SortKey, b: &SortKey) -> Ordering {
        let by_votes = if self.ranks_by_votes() {
            b.votes_count.cmp(&a.votes_count)
        } else {
            Ordering::Equal
        };
        let by_age = if self.oldest_first() {
            (a.created_at, a.id).cmp(&(b.created_at, b.id))
        } else {
            (b.created_at, b.id).cmp(&(a.created_at, a.id))
        };
        by_votes.then(by_age)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TopLevelComments => "top-level comments",
            Self::Replies => "replies",
            Self::IdeasNew => "newest ideas",
            Self::IdeasTop => "top ideas",
        }
    }
}

/// The ordering key of a listed row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortKey {
    #[serde(rename = "i")]
    pub id: Snowflake,
    #[serde(rename = "v")]
    pub votes_count: i64,
    #[serde(rename = "t")]
    pub created_at: DateTime<Utc>,
}

impl SortKey {
    pub fn new(id: Snowflake, votes_count: i64, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            votes_count,
            created_at,
        }
    }
}

/// Position in a listing, resumable from the row after it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cursor {
    #[serde(rename = "k")]
    pub kind: ListingKind,
    #[serde(flatten)]
    pub key: SortKey,
}

impl Cursor {
    pub fn new(kind: ListingKind, key: SortKey) -> Self {
        Self { kind, key }
    }

    /// Encode into the opaque token handed to clients
    pub fn encode(&self) -> String {
        // Serializing plain fields into a Vec cannot fail
        let json = serde_json::to_vec(self).unwrap_or_default();
        URL_SAFE_NO_PAD.encode(json)
    }

    /// Decode a client-echoed token, rejecting tokens issued for another listing
    pub fn decode(token: &str, expected: ListingKind) -> Result<Self, DomainError> {
        let bytes = URL_SAFE_NO_PAD
            .decode(token.trim())
            .map_err(|_| DomainError::InvalidCursor("malformed token".to_string()))?;
        let cursor: Cursor = serde_json::from_slice(&bytes)
            .map_err(|_| DomainError::InvalidCursor("malformed token".to_string()))?;

        if cursor.kind != expected {
            return Err(DomainError::InvalidCursor(format!(
                "cursor was issued for {}, not {}",
                cursor.kind.as_str(),
                expected.as_str()
            )));
        }

        Ok(cursor)
    }

    /// Whether a row with `key` is listed strictly after this cursor
    #[inline]
    pub fn precedes(&self, key: &SortKey) -> bool {
        self.kind.compare(&self.key, key) == Ordering::Less
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn key(id: i64, votes: i64, minute: i64) -> SortKey {
        let base = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        SortKey::new(Snowflake::new(id), votes, base + Duration::minutes(minute))
    }

    #[test]
    fn test_top_level_order_prefers_votes_then_newest() {
        let kind = ListingKind::TopLevelComments;
        let mut rows = vec![key(1, 0, 0), key(2, 5, 1), key(3, 0, 2), key(4, 5, 3)];
        rows.sort_by(|a, b| kind.compare(a, b));
        let ids: Vec<i64> = rows.iter().map(|k| k.id.into_inner()).collect();
        assert_eq!(ids, vec![4, 2, 3, 1]);
    }

    #[test]
    fn test_reply_order_prefers_votes_then_oldest() {
        let kind = ListingKind::Replies;
        let mut rows = vec![key(1, 0, 0), key(2, 5, 1), key(3, 0, 2), key(4, 5, 3)];
        rows.sort_by(|a, b| kind.compare(a, b));
        let ids: Vec<i64> = rows.iter().map(|k| k.id.into_inner()).collect();
        assert_eq!(ids, vec![2, 4, 1, 3]);
    }

    #[test]
    fn test_new_ideas_ignore_votes() {
        let kind = ListingKind::IdeasNew;
        assert_eq!(kind.compare(&key(1, 100, 0), &key(2, 0, 1)), Ordering::Greater);
    }

    #[test]
    fn test_id_breaks_timestamp_ties() {
        let kind = ListingKind::TopLevelComments;
        assert_eq!(kind.compare(&key(9, 0, 0), &key(8, 0, 0)), Ordering::Less);
        let kind = ListingKind::Replies;
        assert_eq!(kind.compare(&key(8, 0, 0), &key(9, 0, 0)), Ordering::Less);
    }

    #[test]
    fn test_token_round_trip() {
        let cursor = Cursor::new(ListingKind::Replies, key(77, -3, 4));
        let token = cursor.encode();
        assert!(!token.contains('='));
        assert_eq!(Cursor::decode(&token, ListingKind::Replies).unwrap(), cursor);
    }

    #[test]
    fn test_token_for_other_listing_is_rejected() {
        let token = Cursor::new(ListingKind::Replies, key(1, 0, 0)).encode();
        let err = Cursor::decode(&token, ListingKind::TopLevelComments).unwrap_err();
        assert!(matches!(err, DomainError::InvalidCursor(_)));
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        assert!(Cursor::decode("not a cursor!", ListingKind::IdeasNew).is_err());
        let not_json = URL_SAFE_NO_PAD.encode(b"hello");
        assert!(Cursor::decode(&not_json, ListingKind::IdeasNew).is_err());
    }

    #[test]
    fn test_precedes_is_strict() {
        let cursor = Cursor::new(ListingKind::TopLevelComments, key(5, 2, 0));
        assert!(!cursor.precedes(&key(5, 2, 0)));
        assert!(cursor.precedes(&key(4, 2, 0)));
        assert!(cursor.precedes(&key(6, 1, 9)));
        assert!(!cursor.precedes(&key(6, 3, 0)));
    }

    #[test]
    fn test_limits() {
        assert_eq!(ListingKind::TopLevelComments.default_limit(), 20);
        assert_eq!(ListingKind::TopLevelComments.max_limit(), 100);
        assert_eq!(ListingKind::Replies.default_limit(), 10);
        assert_eq!(ListingKind::Replies.max_limit(), 50);
    }
}
