//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - Party and filter snapshots (could swap in-memory -> SQLite)
//! - The live party feed and quest compendium (transport lives outside this crate)
//! - Clock (for testing)

mod error;
mod external;
mod repos;
mod testing;

// =============================================================================
// Repository Ports
// =============================================================================
pub use repos::*;

// =============================================================================
// External Service Ports
// =============================================================================
pub use external::{PartyFeedPort, QuestFeedPort};

// =============================================================================
// Testability Ports
// =============================================================================
pub use testing::ClockPort;

// =============================================================================
// Error Types
// =============================================================================
pub use error::{FeedError, RepoError};

// =============================================================================
// Mock re-exports for tests
// =============================================================================
#[cfg(test)]
pub use external::{MockPartyFeedPort, MockQuestFeedPort};
#[cfg(test)]
pub use testing::MockClockPort;
