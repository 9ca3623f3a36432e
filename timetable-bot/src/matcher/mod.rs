//! Point matching for free-text place names.
//!
//! The directory supplies candidates for a query; this module ranks them
//! into match tiers and cuts the result into pages of choice buttons.

mod config;
mod error;
mod normalize;
mod rank;

pub use config::MatchConfig;
pub use error::MatchError;
pub use normalize::{fold_letters, normalize_query, normalize_title};
pub use rank::{
    MatchTier, PageAction, RankedPoints, Strictness, classify, lookup_strictness, paginate,
    prepare_query, rank, select,
};
