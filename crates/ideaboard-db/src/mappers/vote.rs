//! Vote type <-> ledger column mapper

use ideaboard_core::error::DomainError;
use ideaboard_core::value_objects::VoteType;

/// Parse the `vote_type` column. The table's CHECK constraint makes any other
/// value a data integrity failure.
pub fn parse_vote_type(raw: &str) -> Result<VoteType, DomainError> {
    raw.parse::<VoteType>()
        .map_err(|_| DomainError::DatabaseError(format!("unexpected vote_type {raw:?} in ledger")))
}
