//! Use cases - User story orchestration.
//!
//! Use cases read snapshots through the port traits and hand them to the
//! pure domain functions.

pub mod ranking;
pub mod refresh;

pub use ranking::{RankParties, RankingError};
pub use refresh::{RefreshError, RefreshParties, RefreshQuests};
