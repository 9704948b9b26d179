//! Ranking use cases.

mod rank_parties;

pub use rank_parties::{RankParties, RankingError};
