//! Application state and composition.

use std::sync::Arc;

use crate::infrastructure::{
    config::EngineConfig,
    network_state::NetworkStatus,
    ports::{ClockPort, FilterRepo, PartyFeedPort, PartyRepo, QuestFeedPort, QuestRepo},
};
use crate::use_cases::{RankParties, RefreshParties, RefreshQuests};

/// Main application state.
///
/// Holds the storage ports, the shared network status and the use cases
/// built on top of them.
pub struct App {
    pub repositories: Repositories,
    pub network: Arc<NetworkStatus>,
    pub use_cases: UseCases,
}

/// Container for the storage ports.
pub struct Repositories {
    pub party: Arc<dyn PartyRepo>,
    pub filter: Arc<dyn FilterRepo>,
    pub quest: Arc<dyn QuestRepo>,
}

/// Container for all use cases.
pub struct UseCases {
    pub rank: Arc<RankParties>,
    pub refresh: Arc<RefreshParties>,
    pub refresh_quests: Arc<RefreshQuests>,
}

impl App {
    /// Create a new App with all dependencies wired up.
    pub fn new(
        config: &EngineConfig,
        party_feed: Arc<dyn PartyFeedPort>,
        quest_feed: Arc<dyn QuestFeedPort>,
        party_repo: Arc<dyn PartyRepo>,
        quest_repo: Arc<dyn QuestRepo>,
        filter_repo: Arc<dyn FilterRepo>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        let network = Arc::new(NetworkStatus::new());

        let rank = Arc::new(RankParties::new(
            party_repo.clone(),
            filter_repo.clone(),
            clock.clone(),
            config.max_party_age_minutes,
        ));
        let refresh = Arc::new(RefreshParties::new(
            party_feed,
            party_repo.clone(),
            clock,
            network.clone(),
        ));
        let refresh_quests = Arc::new(RefreshQuests::new(
            quest_feed,
            quest_repo.clone(),
            network.clone(),
        ));

        Self {
            repositories: Repositories {
                party: party_repo,
                filter: filter_repo,
                quest: quest_repo,
            },
            network,
            use_cases: UseCases {
                rank,
                refresh,
                refresh_quests,
            },
        }
    }
}
