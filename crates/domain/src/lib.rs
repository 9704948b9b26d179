//! Assemble domain - party listings, user filters and relevancy ranking.
//!
//! Everything in this crate is pure: no I/O, no clocks, no logging. Time is
//! passed in by the caller so ranking stays deterministic.

pub mod entities;
pub mod error;
pub mod ids;
pub mod ranking;
pub mod value_objects;

pub use entities::{
    all_match, Condition, ConditionKind, ConditionRecord, ConditionType, Filter, Party,
    PartyQuest, Player, PlayerClass, PlayerLocation, Quest, RAID_GROUP_SIZE,
};
pub use error::DomainError;
pub use ids::{ConditionId, FilterId, PartyId, QuestId};
pub use ranking::{rank_parties, sort_by_relevancy, PartyRankResult, DEFAULT_MAX_AGE_MINUTES};
pub use value_objects::{LevelRange, RelevancyLevel, TextPattern};
