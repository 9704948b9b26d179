//! Refresh parties use case - pulls the live feed into the party store.
//!
//! Every fetched party is stamped with the clock's current time, screened for
//! feed outages and hardcore groups, then replaces the stored snapshot. The
//! shared [`NetworkStatus`] tracks the request so only one refresh runs at a
//! time.

use std::sync::Arc;

use assemble_domain::Party;

use crate::infrastructure::feed::{into_parties, screen_parties};
use crate::infrastructure::network_state::NetworkStatus;
use crate::infrastructure::ports::{ClockPort, FeedError, PartyFeedPort, PartyRepo, RepoError};

#[derive(Debug, thiserror::Error)]
pub enum RefreshError {
    #[error("A refresh is already in progress")]
    InProgress,
    #[error("Feed error: {0}")]
    Feed(#[from] FeedError),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

impl RefreshError {
    /// Short reason shown to observers of the network status.
    pub(crate) fn reason(&self) -> String {
        match self {
            RefreshError::Feed(e) => e.reason(),
            other => other.to_string(),
        }
    }
}

pub struct RefreshParties {
    feed: Arc<dyn PartyFeedPort>,
    party_repo: Arc<dyn PartyRepo>,
    clock: Arc<dyn ClockPort>,
    network: Arc<NetworkStatus>,
}

impl RefreshParties {
    pub fn new(
        feed: Arc<dyn PartyFeedPort>,
        party_repo: Arc<dyn PartyRepo>,
        clock: Arc<dyn ClockPort>,
        network: Arc<NetworkStatus>,
    ) -> Self {
        Self {
            feed,
            party_repo,
            clock,
            network,
        }
    }

    /// Fetch the feed and replace the stored parties.
    ///
    /// Returns the stored snapshot after the refresh. On failure the stored
    /// parties are left untouched and the network status records the reason.
    /// Dropping the future mid-flight leaves the status `Failed("cancelled")`.
    pub async fn execute(&self) -> Result<Vec<Party>, RefreshError> {
        let Some(loading) = self.network.try_begin() else {
            return Err(RefreshError::InProgress);
        };

        match self.refresh().await {
            Ok(parties) => {
                loading.finish();
                tracing::info!(count = parties.len(), "Refreshed parties");
                Ok(parties)
            }
            Err(e) => {
                tracing::error!(error = %e, "Party refresh failed");
                loading.fail(e.reason());
                Err(e)
            }
        }
    }

    async fn refresh(&self) -> Result<Vec<Party>, RefreshError> {
        let groups = self.feed.fetch_server_groups().await?;
        let observed_at = self.clock.now();

        let parties = screen_parties(into_parties(groups, observed_at))?;
        tracing::debug!(count = parties.len(), "Screened feed parties");

        self.party_repo.replace_all(parties).await?;
        Ok(self.party_repo.list_all().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::feed::{PartyDto, PlayerDto, ServerGroupDto, AUDIT_LEADER_NAME};
    use crate::infrastructure::memory_store::InMemoryPartyStore;
    use crate::infrastructure::network_state::{NetworkState, CANCELLED_REASON};
    use crate::infrastructure::ports::{MockClockPort, MockPartyFeedPort, MockPartyRepo};
    use assemble_domain::Player;
    use async_trait::async_trait;
    use chrono::{DateTime, TimeZone, Utc};
    use std::time::Duration;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 20, 0, 0).unwrap()
    }

    fn player(name: &str) -> PlayerDto {
        PlayerDto {
            name: name.to_string(),
            gender: String::new(),
            race: String::new(),
            total_level: 0,
            classes: Vec::new(),
            location: Default::default(),
            guild: None,
            home_server: None,
        }
    }

    fn group(id: i64, leader: &str, comment: Option<&str>) -> PartyDto {
        PartyDto {
            id,
            comment: comment.map(str::to_string),
            quest: None,
            difficulty: None,
            accepted_classes: None,
            minimum_level: None,
            maximum_level: None,
            adventure_active: None,
            leader: player(leader),
            members: Vec::new(),
        }
    }

    fn server(name: &str, parties: Vec<PartyDto>) -> ServerGroupDto {
        ServerGroupDto {
            name: name.to_string(),
            group_count: parties.len() as i32,
            parties,
        }
    }

    fn clock() -> Arc<MockClockPort> {
        let mut clock = MockClockPort::new();
        clock.expect_now().returning(now);
        Arc::new(clock)
    }

    fn feed_returning(groups: Vec<ServerGroupDto>) -> Arc<MockPartyFeedPort> {
        let mut feed = MockPartyFeedPort::new();
        feed.expect_fetch_server_groups()
            .returning(move || Ok(groups.clone()));
        Arc::new(feed)
    }

    #[tokio::test]
    async fn stores_screened_parties_stamped_with_now() {
        let feed = feed_returning(vec![
            server("Khyber", vec![group(1, "Tharsis", None), group(2, "Vela", None)]),
            server("Hardcore", vec![group(3, "Grim", None)]),
        ]);
        let stale = Party::new(99, "Orien", Player::named("Gone"), now());
        let store = Arc::new(InMemoryPartyStore::with_parties(vec![stale]));
        let network = Arc::new(NetworkStatus::new());

        let refresh = RefreshParties::new(feed, store.clone(), clock(), network.clone());
        let parties = refresh.execute().await.unwrap();

        let ids: Vec<i64> = parties.iter().map(|p| p.id.value()).collect();
        assert_eq!(ids, vec![1, 2]);
        assert!(parties.iter().all(|p| p.updated == now()));
        assert_eq!(store.list_all().await.unwrap(), parties);
        assert_eq!(network.current(), NetworkState::Idle);
    }

    #[tokio::test]
    async fn feed_outage_keeps_previous_snapshot() {
        let feed = feed_returning(vec![server(
            "Khyber",
            vec![group(1, AUDIT_LEADER_NAME, Some("Servers are down"))],
        )]);
        let previous = Party::new(7, "Khyber", Player::named("Tharsis"), now());
        let store = Arc::new(InMemoryPartyStore::with_parties(vec![previous.clone()]));
        let network = Arc::new(NetworkStatus::new());

        let refresh = RefreshParties::new(feed, store.clone(), clock(), network.clone());
        let err = refresh.execute().await.unwrap_err();

        assert!(matches!(err, RefreshError::Feed(FeedError::Unavailable(_))));
        assert_eq!(store.list_all().await.unwrap(), vec![previous]);
        assert_eq!(
            network.current(),
            NetworkState::Failed("Servers are down".to_string())
        );
    }

    #[tokio::test]
    async fn request_failure_marks_network_failed() {
        let mut feed = MockPartyFeedPort::new();
        feed.expect_fetch_server_groups()
            .returning(|| Err(FeedError::request("connection reset")));
        let mut repo = MockPartyRepo::new();
        repo.expect_replace_all().never();
        let network = Arc::new(NetworkStatus::new());

        let refresh = RefreshParties::new(
            Arc::new(feed),
            Arc::new(repo),
            Arc::new(MockClockPort::new()),
            network.clone(),
        );

        assert!(matches!(
            refresh.execute().await,
            Err(RefreshError::Feed(FeedError::Request(_)))
        ));
        assert!(matches!(network.current(), NetworkState::Failed(_)));
    }

    #[tokio::test]
    async fn rejects_concurrent_refresh() {
        let mut feed = MockPartyFeedPort::new();
        feed.expect_fetch_server_groups().never();
        let network = Arc::new(NetworkStatus::new());
        assert!(network.begin_loading());

        let refresh = RefreshParties::new(
            Arc::new(feed),
            Arc::new(MockPartyRepo::new()),
            Arc::new(MockClockPort::new()),
            network.clone(),
        );

        assert!(matches!(
            refresh.execute().await,
            Err(RefreshError::InProgress)
        ));
        assert!(network.current().is_loading());
    }

    /// Feed that never answers within a test's lifetime.
    struct StalledFeed;

    #[async_trait]
    impl PartyFeedPort for StalledFeed {
        async fn fetch_server_groups(&self) -> Result<Vec<ServerGroupDto>, FeedError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn cancelled_refresh_does_not_block_the_next_one() {
        let store = Arc::new(InMemoryPartyStore::new());
        let network = Arc::new(NetworkStatus::new());
        let stalled = RefreshParties::new(
            Arc::new(StalledFeed),
            store.clone(),
            clock(),
            network.clone(),
        );

        let timed_out =
            tokio::time::timeout(Duration::from_millis(50), stalled.execute()).await;
        assert!(timed_out.is_err());
        assert_eq!(
            network.current(),
            NetworkState::Failed(CANCELLED_REASON.to_string())
        );

        let feed = feed_returning(vec![server("Khyber", vec![group(1, "Tharsis", None)])]);
        let refresh = RefreshParties::new(feed, store, clock(), network.clone());
        assert_eq!(refresh.execute().await.unwrap().len(), 1);
        assert_eq!(network.current(), NetworkState::Idle);
    }

    #[tokio::test]
    async fn storage_failure_is_reported() {
        let feed = feed_returning(vec![server("Khyber", vec![group(1, "Tharsis", None)])]);
        let mut repo = MockPartyRepo::new();
        repo.expect_replace_all()
            .returning(|_| Err(RepoError::storage("replace_all", "disk full")));
        let network = Arc::new(NetworkStatus::new());

        let refresh = RefreshParties::new(feed, Arc::new(repo), clock(), network.clone());

        assert!(matches!(
            refresh.execute().await,
            Err(RefreshError::Repo(RepoError::Storage { .. }))
        ));
        assert!(matches!(network.current(), NetworkState::Failed(_)));
    }
}
