//! Refresh quests use case - pulls the quest compendium into the quest store.

use std::sync::Arc;

use assemble_domain::Quest;

use super::RefreshError;
use crate::infrastructure::feed::into_quests;
use crate::infrastructure::network_state::NetworkStatus;
use crate::infrastructure::ports::{QuestFeedPort, QuestRepo};

/// Shares the network status with party refreshes, so the two never overlap.
pub struct RefreshQuests {
    feed: Arc<dyn QuestFeedPort>,
    quest_repo: Arc<dyn QuestRepo>,
    network: Arc<NetworkStatus>,
}

impl RefreshQuests {
    pub fn new(
        feed: Arc<dyn QuestFeedPort>,
        quest_repo: Arc<dyn QuestRepo>,
        network: Arc<NetworkStatus>,
    ) -> Self {
        Self {
            feed,
            quest_repo,
            network,
        }
    }

    /// Fetch the compendium and upsert it by quest name.
    ///
    /// Returns the whole stored compendium afterwards.
    pub async fn execute(&self) -> Result<Vec<Quest>, RefreshError> {
        let Some(loading) = self.network.try_begin() else {
            return Err(RefreshError::InProgress);
        };

        match self.refresh().await {
            Ok(quests) => {
                loading.finish();
                tracing::info!(count = quests.len(), "Refreshed quest compendium");
                Ok(quests)
            }
            Err(e) => {
                tracing::error!(error = %e, "Quest refresh failed");
                loading.fail(e.reason());
                Err(e)
            }
        }
    }

    async fn refresh(&self) -> Result<Vec<Quest>, RefreshError> {
        let quests = into_quests(self.feed.fetch_compendium().await?);
        tracing::debug!(count = quests.len(), "Fetched compendium entries");

        self.quest_repo.upsert_all(quests).await?;
        Ok(self.quest_repo.list_all().await?)
    }
}
