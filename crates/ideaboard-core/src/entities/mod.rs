//! Domain entities - core business objects

mod comment;
mod idea;
mod vote;

use chrono::{DateTime, SubsecRound, Utc};

pub use comment::{
    is_listable, normalize_comment_content, Comment, ThreadedComment, DELETED_PLACEHOLDER,
    MAX_COMMENT_LENGTH,
};
pub use idea::{
    normalize_idea_description, normalize_idea_title, Idea, MAX_IDEA_DESCRIPTION_LENGTH,
    MAX_IDEA_TITLE_LENGTH,
};
pub use vote::{Vote, VoteOutcome, VoteTransition};

/// Current time at the precision PostgreSQL stores (microseconds), so that
/// timestamps used as cursor keys survive a round trip unchanged.
pub fn now_micros() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}
