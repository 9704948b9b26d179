//! External service port traits.

use async_trait::async_trait;

use super::error::FeedError;
use crate::infrastructure::feed::{CompendiumDto, ServerGroupDto};

// =============================================================================
// Party Feed Port
// =============================================================================

/// Source of live party listings, grouped by game server.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PartyFeedPort: Send + Sync {
    async fn fetch_server_groups(&self) -> Result<Vec<ServerGroupDto>, FeedError>;
}

// =============================================================================
// Quest Compendium Port
// =============================================================================

/// Source of the quest compendium, one entry list per game server.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuestFeedPort: Send + Sync {
    async fn fetch_compendium(&self) -> Result<Vec<CompendiumDto>, FeedError>;
}
