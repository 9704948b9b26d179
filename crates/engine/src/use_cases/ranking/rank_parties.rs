//! Rank parties use case - scores the stored party snapshot against the user's filters.

use std::sync::Arc;

use assemble_domain::{rank_parties, PartyRankResult};

use crate::infrastructure::ports::{ClockPort, FilterRepo, PartyRepo, RepoError};

/// Errors that can occur while ranking parties.
#[derive(Debug, thiserror::Error)]
pub enum RankingError {
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

/// Ranks the current party snapshot against the current filter snapshot.
///
/// Nothing is cached between calls; each call re-reads both snapshots and
/// the clock. Results keep storage order, sorting is up to the caller.
pub struct RankParties {
    party_repo: Arc<dyn PartyRepo>,
    filter_repo: Arc<dyn FilterRepo>,
    clock: Arc<dyn ClockPort>,
    max_age_minutes: i64,
}

impl RankParties {
    pub fn new(
        party_repo: Arc<dyn PartyRepo>,
        filter_repo: Arc<dyn FilterRepo>,
        clock: Arc<dyn ClockPort>,
        max_age_minutes: i64,
    ) -> Self {
        Self {
            party_repo,
            filter_repo,
            clock,
            max_age_minutes,
        }
    }

    pub async fn execute(&self) -> Result<Vec<PartyRankResult>, RankingError> {
        let parties = self.party_repo.list_all().await?;
        let filters = self.filter_repo.list_with_conditions().await?;
        let now = self.clock.now();

        let total = parties.len();
        let results = rank_parties(parties, &filters, self.max_age_minutes, now);

        tracing::debug!(
            total,
            ranked = results.len(),
            filters = filters.len(),
            max_relevancy = results.first().map(|r| r.max_relevancy).unwrap_or(0),
            "Ranked parties"
        );

        Ok(results)
    }
}
