//! Value objects - immutable types that represent domain concepts

mod cursor;
mod page;
mod snowflake;
mod vote_type;

pub use cursor::{Cursor, ListingKind, SortKey};
pub use page::{Page, PageRequest};
pub use snowflake::{Snowflake, SnowflakeGenerator, SnowflakeParseError};
pub use vote_type::{LedgerOp, VoteTarget, VoteTargetKind, VoteType};
