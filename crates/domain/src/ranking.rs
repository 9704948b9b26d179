//! Relevancy ranking of party listings against user filters.
//!
//! Ranking is a pure function of its inputs: the same parties, filters,
//! age limit and `now` always produce the same results. Parties failing an
//! active must-match filter, or older than the age limit, are dropped. Every
//! surviving party is scored by the weights of the active filters it matches
//! and annotated with those filters. Output keeps input order; sorting is left
//! to the caller ([`sort_by_relevancy`]).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::{all_match, Filter, Party};

/// Parties not observed within this many minutes are dropped by default.
pub const DEFAULT_MAX_AGE_MINUTES: i64 = 120;

/// A party annotated with its relevancy for one ranking call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartyRankResult {
    pub party: Party,
    /// Sum of the weights of every active filter this party matches,
    /// saturating at the `i32` bounds
    pub relevancy: i32,
    /// Highest relevancy in the same ranking call, shared by all results
    pub max_relevancy: i32,
    /// Active filters this party matches, in filter input order
    pub matched_filters: Vec<Filter>,
}

impl PartyRankResult {
    /// Relevancy relative to the best party of the batch, in `0.0..=1.0`.
    ///
    /// Returns 0.0 when no party scored above zero.
    pub fn intensity(&self) -> f32 {
        if self.max_relevancy <= 0 {
            return 0.0;
        }
        self.relevancy as f32 / self.max_relevancy as f32
    }

    pub fn matched_filter_names(&self) -> Vec<&str> {
        self.matched_filters.iter().map(|f| f.name.as_str()).collect()
    }
}

/// Rank parties against filters as of `now`.
///
/// Only enabled filters with at least one condition take part. Must-match
/// filters still add their weight when they match.
pub fn rank_parties(
    parties: impl IntoIterator<Item = Party>,
    filters: &[Filter],
    max_age_minutes: i64,
    now: DateTime<Utc>,
) -> Vec<PartyRankResult> {
    let active: Vec<&Filter> = filters.iter().filter(|f| f.is_active()).collect();
    let required: Vec<&Filter> = active.iter().copied().filter(|f| f.must_match).collect();

    let mut results: Vec<PartyRankResult> = parties
        .into_iter()
        .filter(|party| {
            is_fresh(party, max_age_minutes, now) && all_match(required.iter().copied(), party)
        })
        .map(|party| {
            let matched_filters: Vec<Filter> = active
                .iter()
                .filter(|f| f.matches(&party))
                .map(|f| (*f).clone())
                .collect();
            let relevancy = matched_filters
                .iter()
                .fold(0i32, |total, f| total.saturating_add(f.relevancy));

            PartyRankResult {
                party,
                relevancy,
                max_relevancy: 0,
                matched_filters,
            }
        })
        .collect();

    let max_relevancy = results.iter().map(|r| r.relevancy).max().unwrap_or(0);
    for result in &mut results {
        result.max_relevancy = max_relevancy;
    }

    results
}

/// Age is truncated to whole minutes; a party is fresh while that is below the limit.
fn is_fresh(party: &Party, max_age_minutes: i64, now: DateTime<Utc>) -> bool {
    party.age(now).num_minutes() < max_age_minutes
}

/// Stable sort, most relevant first.
pub fn sort_by_relevancy(results: &mut [PartyRankResult]) {
    results.sort_by(|a, b| b.relevancy.cmp(&a.relevancy));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{ConditionKind, PartyQuest, Player};
    use crate::ids::PartyId;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 20, 0, 0).unwrap()
    }

    fn party(id: i64, server: &str, quest: &str) -> Party {
        Party::new(id, server, Player::named("Leader"), now()).with_quest(PartyQuest::named(quest))
    }

    fn server(pattern: &str) -> ConditionKind {
        ConditionKind::Server {
            pattern: pattern.into(),
        }
    }

    fn quest(pattern: &str) -> ConditionKind {
        ConditionKind::Quest {
            pattern: pattern.into(),
        }
    }

    fn ids(results: &[PartyRankResult]) -> Vec<i64> {
        results.iter().map(|r| r.party.id.value()).collect()
    }

    #[test]
    fn must_match_excludes_and_optional_scores() {
        let a = Filter::new("Khyber only", 0)
            .must_match()
            .with_condition(server("Khyber"));
        let b = Filter::new("Shroud", 3).with_condition(quest("Shroud"));
        let parties = vec![
            party(1, "Khyber", "The Shroud"),
            party(2, "Orien", "The Shroud"),
            party(3, "Khyber", "Tempest's Spine"),
        ];

        let results = rank_parties(parties, &[a, b], DEFAULT_MAX_AGE_MINUTES, now());

        assert_eq!(ids(&results), vec![1, 3]);
        assert_eq!(results[0].relevancy, 3);
        assert_eq!(results[1].relevancy, 0);
        assert!(results.iter().all(|r| r.max_relevancy == 3));
    }

    #[test]
    fn freshness_boundary() {
        let stale = party(1, "Khyber", "q");
        let stale = Party {
            updated: now() - Duration::minutes(121),
            ..stale
        };
        let fresh = Party {
            updated: now() - Duration::minutes(119),
            ..party(2, "Khyber", "q")
        };
        let just_over = Party {
            updated: now() - Duration::minutes(120) - Duration::seconds(30),
            ..party(3, "Khyber", "q")
        };

        let results = rank_parties(vec![stale, fresh, just_over], &[], 120, now());
        assert_eq!(ids(&results), vec![2]);
    }

    #[test]
    fn custom_age_limit() {
        let p = Party {
            updated: now() - Duration::minutes(10),
            ..party(1, "Khyber", "q")
        };
        assert!(rank_parties(vec![p.clone()], &[], 10, now()).is_empty());
        assert_eq!(rank_parties(vec![p], &[], 11, now()).len(), 1);
    }

    #[test]
    fn empty_and_disabled_filters_are_ignored() {
        let empty_required = Filter::new("Unconfigured", 5).must_match();
        let disabled_required = Filter::new("Off", 5)
            .must_match()
            .with_condition(server("nowhere"))
            .disabled();
        let parties = vec![party(1, "Khyber", "q"), party(2, "Orien", "q")];

        let results = rank_parties(parties, &[empty_required, disabled_required], 120, now());

        assert_eq!(ids(&results), vec![1, 2]);
        assert!(results.iter().all(|r| r.relevancy == 0 && r.matched_filters.is_empty()));
    }

    #[test]
    fn must_match_weight_contributes() {
        let required = Filter::new("Khyber", 2)
            .must_match()
            .with_condition(server("Khyber"));
        let optional = Filter::new("Shroud", 3).with_condition(quest("Shroud"));

        let results = rank_parties(
            vec![party(1, "Khyber", "The Shroud")],
            &[required, optional],
            120,
            now(),
        );
        assert_eq!(results[0].relevancy, 5);
    }

    #[test]
    fn matched_filters_keep_input_order_and_include_flags() {
        let flag = Filter::new("Flag", 0).with_condition(server("Khyber"));
        let miss = Filter::new("Miss", 4).with_condition(server("Orien"));
        let hit = Filter::new("Hit", 1).with_condition(quest("Shroud"));

        let results = rank_parties(
            vec![party(1, "Khyber", "The Shroud")],
            &[flag, miss, hit],
            120,
            now(),
        );

        assert_eq!(results[0].matched_filter_names(), vec!["Flag", "Hit"]);
        assert_eq!(results[0].relevancy, 1);
    }

    #[test]
    fn no_survivors_means_empty_result() {
        let required = Filter::new("Nowhere", 1)
            .must_match()
            .with_condition(server("Nowhere"));
        assert!(rank_parties(vec![party(1, "Khyber", "q")], &[required], 120, now()).is_empty());
    }

    #[test]
    fn output_is_not_sorted() {
        let shroud = Filter::new("Shroud", 3).with_condition(quest("Shroud"));
        let parties = vec![party(1, "Khyber", "Spine"), party(2, "Khyber", "Shroud")];

        let results = rank_parties(parties, &[shroud], 120, now());
        assert_eq!(ids(&results), vec![1, 2]);
        assert_eq!(results[1].max_relevancy, 3);
    }

    #[test]
    fn ranking_is_idempotent() {
        let filters = vec![
            Filter::new("Shroud", 3).with_condition(quest("Shroud")),
            Filter::new("Khyber", 1).with_condition(server("Khyber")),
        ];
        let parties = vec![party(1, "Khyber", "The Shroud"), party(2, "Orien", "Spine")];

        let first = rank_parties(parties.clone(), &filters, 120, now());
        let second = rank_parties(parties, &filters, 120, now());
        assert_eq!(first, second);
    }

    #[test]
    fn intensity_is_relative_to_batch_max() {
        let shroud = Filter::new("Shroud", 4).with_condition(quest("Shroud"));
        let khyber = Filter::new("Khyber", 4).with_condition(server("Khyber"));
        let parties = vec![
            party(1, "Khyber", "The Shroud"),
            party(2, "Orien", "The Shroud"),
            party(3, "Orien", "Spine"),
        ];

        let results = rank_parties(parties, &[shroud, khyber], 120, now());
        assert_eq!(results[0].intensity(), 1.0);
        assert_eq!(results[1].intensity(), 0.5);
        assert_eq!(results[2].intensity(), 0.0);
    }

    #[test]
    fn extreme_weights_saturate_instead_of_overflowing() {
        let heavy = Filter::new("Heavy", i32::MAX).with_condition(server("Khyber"));
        let heavier = Filter::new("Heavier", i32::MAX).with_condition(quest("Shroud"));
        let sunk = Filter::new("Sunk", i32::MIN).with_condition(server("Orien"));
        let sunker = Filter::new("Sunker", -5).with_condition(server("Ori"));

        let results = rank_parties(
            vec![party(1, "Khyber", "The Shroud"), party(2, "Orien", "Spine")],
            &[heavy, heavier, sunk, sunker],
            120,
            now(),
        );

        assert_eq!(results[0].relevancy, i32::MAX);
        assert_eq!(results[1].relevancy, i32::MIN);
        assert_eq!(results[0].max_relevancy, i32::MAX);
        assert_eq!(results[0].intensity(), 1.0);
    }

    #[test]
    fn intensity_is_zero_without_scores() {
        let results = rank_parties(vec![party(1, "Khyber", "q")], &[], 120, now());
        assert_eq!(results[0].max_relevancy, 0);
        assert_eq!(results[0].intensity(), 0.0);
    }

    #[test]
    fn sort_by_relevancy_is_stable_descending() {
        let shroud = Filter::new("Shroud", 3).with_condition(quest("Shroud"));
        let parties = vec![
            party(1, "Khyber", "Spine"),
            party(2, "Khyber", "Shroud"),
            party(3, "Orien", "Spine"),
            party(4, "Orien", "Shroud"),
        ];

        let mut results = rank_parties(parties, &[shroud], 120, now());
        sort_by_relevancy(&mut results);
        assert_eq!(ids(&results), vec![2, 4, 1, 3]);
        assert_eq!(results[0].party.id, PartyId::new(2));
    }
}
