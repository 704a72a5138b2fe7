//! Keyset predicates and orderings per listing
//!
//! Every listing binds its cursor as three consecutive parameters
//! `(votes_count, created_at, id)`, all NULL on the first page.

use ideaboard_core::value_objects::{ListingKind, PageRequest};

/// Cursor bind values for a request
pub struct CursorBinds {
    pub votes_count: Option<i64>,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub id: Option<i64>,
}

impl CursorBinds {
    pub fn of(request: &PageRequest) -> Self {
        let key = request.cursor.map(|c| c.key);
        Self {
            votes_count: key.map(|k| k.votes_count),
            created_at: key.map(|k| k.created_at),
            id: key.map(|k| k.id.into_inner()),
        }
    }
}

/// `WHERE` fragment selecting rows strictly after the cursor, with the cursor
/// bound at `$first`, `$first+1`, `$first+2`
pub fn after_cursor(kind: ListingKind, alias: &str, first: usize) -> String {
    let (v, t, i) = (first, first + 1, first + 2);
    let strictly_after = match kind {
        ListingKind::TopLevelComments | ListingKind::IdeasTop => format!(
            "({alias}.votes_count, {alias}.created_at, {alias}.id) \
             < (${v}::BIGINT, ${t}::TIMESTAMPTZ, ${i}::BIGINT)"
        ),
        ListingKind::Replies => format!(
            "({alias}.votes_count < ${v}::BIGINT OR ({alias}.votes_count = ${v}::BIGINT \
             AND ({alias}.created_at, {alias}.id) > (${t}::TIMESTAMPTZ, ${i}::BIGINT)))"
        ),
        ListingKind::IdeasNew => format!(
            "(${v}::BIGINT IS NOT NULL \
             AND ({alias}.created_at, {alias}.id) < (${t}::TIMESTAMPTZ, ${i}::BIGINT))"
        ),
    };
    format!("(${i}::BIGINT IS NULL OR {strictly_after})")
}

/// `ORDER BY` list for a listing
pub fn order_by(kind: ListingKind, alias: &str) -> String {
    match kind {
        ListingKind::TopLevelComments | ListingKind::IdeasTop => format!(
            "{alias}.votes_count DESC, {alias}.created_at DESC, {alias}.id DESC"
        ),
        ListingKind::Replies => {
            format!("{alias}.votes_count DESC, {alias}.created_at ASC, {alias}.id ASC")
        }
        ListingKind::IdeasNew => format!("{alias}.created_at DESC, {alias}.id DESC"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_level_predicate() {
        let sql = after_cursor(ListingKind::TopLevelComments, "c", 2);
        assert!(sql.starts_with("($4::BIGINT IS NULL OR"));
        assert!(sql.contains("(c.votes_count, c.created_at, c.id) < ($2::BIGINT, $3::TIMESTAMPTZ, $4::BIGINT)"));
    }

    #[test]
    fn test_replies_mix_directions() {
        let sql = after_cursor(ListingKind::Replies, "c", 2);
        assert!(sql.contains("c.votes_count < $2::BIGINT"));
        assert!(sql.contains("(c.created_at, c.id) > ($3::TIMESTAMPTZ, $4::BIGINT)"));
        assert_eq!(
            order_by(ListingKind::Replies, "c"),
            "c.votes_count DESC, c.created_at ASC, c.id ASC"
        );
    }

    #[test]
    fn test_new_ideas_skip_votes() {
        assert_eq!(order_by(ListingKind::IdeasNew, "i"), "i.created_at DESC, i.id DESC");
        let sql = after_cursor(ListingKind::IdeasNew, "i", 1);
        assert!(sql.contains("(i.created_at, i.id) < ($2::TIMESTAMPTZ, $3::BIGINT)"));
    }
}
