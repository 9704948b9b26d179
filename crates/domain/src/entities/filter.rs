//! Filter entity - a named, weighted rule made of conditions
//!
//! A filter owns its conditions outright; dropping the filter drops them.
//! Conditions combine with AND. An empty condition list is vacuously
//! satisfied by [`Filter::matches`], while ranking treats the same filter as
//! not yet configured and skips it (see [`Filter::is_active`]). The two
//! rules intentionally disagree and callers must not merge them.

use serde::{Deserialize, Serialize};

use crate::entities::condition::{Condition, ConditionKind};
use crate::entities::party::Party;
use crate::ids::{ConditionId, FilterId};
use crate::value_objects::{RelevancyLevel, TextPattern};

/// Weight given to server quick filters.
const SERVER_PRESET_RELEVANCY: i32 = 4;

/// Weight given to quest, patron, area and guild quick filters.
const CONTENT_PRESET_RELEVANCY: i32 = 2;

/// A user-authored filter with its conditions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Filter {
    #[serde(default)]
    pub id: FilterId,
    pub name: String,
    /// Parties failing a must-match filter are dropped from results
    pub must_match: bool,
    /// Score added when the filter matches; 0 flags without scoring
    pub relevancy: i32,
    pub enabled: bool,
    #[serde(default)]
    pub conditions: Vec<Condition>,
}

impl Filter {
    /// Create an enabled, optional filter with no conditions.
    pub fn new(name: impl Into<String>, relevancy: i32) -> Self {
        Self {
            id: FilterId::default(),
            name: name.into(),
            must_match: false,
            relevancy,
            enabled: true,
            conditions: Vec::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<FilterId>) -> Self {
        self.id = id.into();
        for condition in &mut self.conditions {
            condition.filter_id = self.id;
        }
        self
    }

    pub fn must_match(mut self) -> Self {
        self.must_match = true;
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Append a condition owned by this filter.
    pub fn with_condition(mut self, kind: ConditionKind) -> Self {
        self.conditions.push(Condition::new(self.id, kind));
        self
    }

    /// Remove a condition by id, returning it if it was present.
    pub fn remove_condition(&mut self, id: ConditionId) -> Option<Condition> {
        let index = self.conditions.iter().position(|c| c.id == id)?;
        Some(self.conditions.remove(index))
    }

    /// True if every condition matches the party (vacuously true when empty).
    pub fn matches(&self, party: &Party) -> bool {
        self.conditions.iter().all(|c| c.matches(party))
    }

    /// Whether ranking should consider this filter: enabled and configured
    /// with at least one condition.
    pub fn is_active(&self) -> bool {
        self.enabled && !self.conditions.is_empty()
    }

    pub fn relevancy_level(&self) -> RelevancyLevel {
        RelevancyLevel::from_weight(self.relevancy)
    }

    // ==========================================================================
    // Quick filters created from a party or quest shortcut
    // ==========================================================================

    pub fn server(server: impl Into<String>) -> Self {
        Self::preset(
            "Server",
            SERVER_PRESET_RELEVANCY,
            ConditionKind::Server {
                pattern: TextPattern::new(server),
            },
        )
    }

    pub fn quest(quest: impl Into<String>) -> Self {
        Self::preset(
            "Quest",
            CONTENT_PRESET_RELEVANCY,
            ConditionKind::Quest {
                pattern: TextPattern::new(quest),
            },
        )
    }

    /// Patron names are matched through the quest name/area condition.
    pub fn patron(patron: impl Into<String>) -> Self {
        Self::preset(
            "Patron",
            CONTENT_PRESET_RELEVANCY,
            ConditionKind::Quest {
                pattern: TextPattern::new(patron),
            },
        )
    }

    pub fn area(area: impl Into<String>) -> Self {
        Self::preset(
            "Area",
            CONTENT_PRESET_RELEVANCY,
            ConditionKind::Quest {
                pattern: TextPattern::new(area),
            },
        )
    }

    pub fn guild(guild: impl Into<String>) -> Self {
        Self::preset(
            "Guild",
            CONTENT_PRESET_RELEVANCY,
            ConditionKind::Guild {
                pattern: TextPattern::new(guild),
            },
        )
    }

    fn preset(name: &str, relevancy: i32, kind: ConditionKind) -> Self {
        Self::new(name, relevancy).with_condition(kind)
    }
}

/// True if every filter matches the party (vacuously true for no filters).
pub fn all_match<'a>(filters: impl IntoIterator<Item = &'a Filter>, party: &Party) -> bool {
    filters.into_iter().all(|f| f.matches(party))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::party::{PartyQuest, Player};
    use crate::value_objects::LevelRange;
    use chrono::Utc;

    fn party(server: &str, quest: &str) -> Party {
        Party::new(1, server, Player::named("Leader"), Utc::now())
            .with_quest(PartyQuest::named(quest))
            .with_levels(Some(10), Some(14))
    }

    fn server(pattern: &str) -> ConditionKind {
        ConditionKind::Server {
            pattern: pattern.into(),
        }
    }

    #[test]
    fn empty_filter_matches_every_party() {
        let filter = Filter::new("Empty", 3);
        assert!(filter.matches(&party("Khyber", "The Shroud")));
        assert!(filter.matches(&party("", "")));
    }

    #[test]
    fn empty_filter_is_not_active() {
        assert!(!Filter::new("Empty", 3).is_active());
        assert!(Filter::new("Configured", 3).with_condition(server("a")).is_active());
        assert!(!Filter::new("Off", 3).with_condition(server("a")).disabled().is_active());
    }

    #[test]
    fn conditions_combine_with_and() {
        let filter = Filter::new("Khyber levels", 2)
            .with_condition(server("khyber"))
            .with_condition(ConditionKind::Level {
                range: LevelRange::new(12, 20),
            });

        assert!(filter.matches(&party("Khyber", "The Shroud")));
        assert!(!filter.matches(&party("Orien", "The Shroud")));
        assert!(!filter.matches(&party("Khyber", "x").with_levels(Some(1), Some(4))));
    }

    #[test]
    fn unconfigured_condition_blocks_the_filter() {
        let filter = Filter::new("Half done", 2)
            .with_condition(server("khyber"))
            .with_condition(ConditionKind::Unconfigured);
        assert!(!filter.matches(&party("Khyber", "The Shroud")));
    }

    #[test]
    fn all_match_is_and_over_filters() {
        let khyber = Filter::new("Khyber", 0).with_condition(server("khyber"));
        let shroud = Filter::new("Shroud", 0).with_condition(ConditionKind::Quest {
            pattern: "shroud".into(),
        });
        let p = party("Khyber", "The Shroud");
        let q = party("Khyber", "Tempest's Spine");

        assert!(all_match([&khyber, &shroud], &p));
        assert!(!all_match([&khyber, &shroud], &q));
        assert!(all_match(std::iter::empty::<&Filter>(), &q));
    }

    #[test]
    fn conditions_follow_filter_id() {
        let filter = Filter::new("Khyber", 1)
            .with_condition(server("khyber"))
            .with_id(5);
        assert!(filter.conditions.iter().all(|c| c.filter_id == FilterId::new(5)));
    }

    #[test]
    fn remove_condition_by_id() {
        let mut filter = Filter::new("Two", 1)
            .with_condition(server("a"))
            .with_condition(server("b"));
        filter.conditions[0].id = ConditionId::new(11);
        filter.conditions[1].id = ConditionId::new(12);

        let removed = filter.remove_condition(ConditionId::new(11));
        assert_eq!(removed.map(|c| c.kind), Some(server("a")));
        assert_eq!(filter.conditions.len(), 1);
        assert!(filter.remove_condition(ConditionId::new(99)).is_none());
    }

    #[test]
    fn presets_are_enabled_optional_single_condition() {
        let server_filter = Filter::server("Khyber");
        assert_eq!(server_filter.name, "Server");
        assert_eq!(server_filter.relevancy, 4);
        assert!(server_filter.enabled);
        assert!(!server_filter.must_match);
        assert_eq!(server_filter.conditions.len(), 1);

        for preset in [
            Filter::quest("The Shroud"),
            Filter::patron("The Twelve"),
            Filter::area("Gianthold"),
            Filter::guild("Guardians"),
        ] {
            assert_eq!(preset.relevancy, 2);
            assert!(preset.is_active());
        }
    }

    #[test]
    fn guild_preset_uses_guild_condition() {
        let filter = Filter::guild("Guardians");
        let member = Party::new(1, "Khyber", Player::named("L"), Utc::now())
            .with_members(vec![Player::named("M").with_guild("Guardians of the Gate")]);
        assert!(filter.matches(&member));
    }

    #[test]
    fn relevancy_level_from_weight() {
        assert_eq!(Filter::new("f", 0).relevancy_level(), RelevancyLevel::Flag);
        assert_eq!(Filter::new("f", 4).relevancy_level(), RelevancyLevel::High);
    }
}
