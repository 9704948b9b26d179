//! Repository port traits for party and filter snapshots.

use assemble_domain::{Filter, Party, Quest};
use async_trait::async_trait;

use super::error::RepoError;

// =============================================================================
// Party Storage
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PartyRepo: Send + Sync {
    /// Current snapshot of known parties, in storage order.
    async fn list_all(&self) -> Result<Vec<Party>, RepoError>;

    /// Replace the stored set: parties absent from `parties` are deleted,
    /// the rest are inserted or overwritten by id.
    async fn replace_all(&self, parties: Vec<Party>) -> Result<(), RepoError>;
}

// =============================================================================
// Filter Storage
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FilterRepo: Send + Sync {
    /// Current snapshot of user filters, each with its owned conditions.
    async fn list_with_conditions(&self) -> Result<Vec<Filter>, RepoError>;
}

// =============================================================================
// Quest Compendium Storage
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuestRepo: Send + Sync {
    async fn list_all(&self) -> Result<Vec<Quest>, RepoError>;

    /// Insert quests, replacing any stored quest with the same name.
    async fn upsert_all(&self, quests: Vec<Quest>) -> Result<(), RepoError>;
}
