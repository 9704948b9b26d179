//! Condition entity - a single typed predicate over a party listing
//!
//! Conditions belong to exactly one [`Filter`](super::Filter). Each condition
//! type carries only the payload it needs ([`ConditionKind`]); the flat
//! five-slot row used by filter storage is [`ConditionRecord`], converted at
//! the boundary.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::entities::party::Party;
use crate::error::DomainError;
use crate::ids::{ConditionId, FilterId};
use crate::value_objects::{LevelRange, TextPattern};

/// The closed set of condition types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConditionType {
    None,
    Server,
    Guild,
    Player,
    Level,
    Quest,
    Raid,
    Difficulty,
}

impl ConditionType {
    /// Returns all types in authoring order.
    pub fn all() -> [ConditionType; 8] {
        [
            ConditionType::None,
            ConditionType::Server,
            ConditionType::Guild,
            ConditionType::Player,
            ConditionType::Level,
            ConditionType::Quest,
            ConditionType::Raid,
            ConditionType::Difficulty,
        ]
    }

    /// Stored name of the type, as written in condition rows.
    pub fn as_str(&self) -> &'static str {
        match self {
            ConditionType::None => "NONE",
            ConditionType::Server => "SERVER",
            ConditionType::Guild => "GUILD",
            ConditionType::Player => "PLAYER",
            ConditionType::Level => "LEVEL",
            ConditionType::Quest => "QUEST",
            ConditionType::Raid => "RAID",
            ConditionType::Difficulty => "DIFFICULTY",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ConditionType::None => "None",
            ConditionType::Server => "Server",
            ConditionType::Guild => "Guild",
            ConditionType::Player => "Player",
            ConditionType::Level => "Level range",
            ConditionType::Quest => "Quest name",
            ConditionType::Raid => "Is a raid",
            ConditionType::Difficulty => "Difficulty",
        }
    }
}

impl fmt::Display for ConditionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ConditionType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "NONE" => Ok(ConditionType::None),
            "SERVER" => Ok(ConditionType::Server),
            "GUILD" => Ok(ConditionType::Guild),
            "PLAYER" => Ok(ConditionType::Player),
            "LEVEL" => Ok(ConditionType::Level),
            "QUEST" => Ok(ConditionType::Quest),
            "RAID" => Ok(ConditionType::Raid),
            "DIFFICULTY" => Ok(ConditionType::Difficulty),
            _ => Err(DomainError::parse(format!("Unknown condition type: {}", s))),
        }
    }
}

/// What a condition tests, with only the payload that test needs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "type")]
pub enum ConditionKind {
    /// Placeholder for a condition the user has not configured yet. Never matches.
    Unconfigured,

    /// Party server name contains the pattern
    Server { pattern: TextPattern },

    /// Any player's guild contains the pattern
    Guild { pattern: TextPattern },

    /// Any player's name contains the pattern
    Player { pattern: TextPattern },

    /// Party level bounds overlap the range
    Level { range: LevelRange },

    /// Quest name or adventure area contains the pattern
    Quest { pattern: TextPattern },

    /// Party raid status equals the flag (false excludes raids)
    Raid {
        #[serde(rename = "isRaid")]
        is_raid: bool,
    },

    /// Party difficulty is present and contains the pattern
    Difficulty { pattern: TextPattern },
}

impl ConditionKind {
    pub fn condition_type(&self) -> ConditionType {
        match self {
            ConditionKind::Unconfigured => ConditionType::None,
            ConditionKind::Server { .. } => ConditionType::Server,
            ConditionKind::Guild { .. } => ConditionType::Guild,
            ConditionKind::Player { .. } => ConditionType::Player,
            ConditionKind::Level { .. } => ConditionType::Level,
            ConditionKind::Quest { .. } => ConditionType::Quest,
            ConditionKind::Raid { .. } => ConditionType::Raid,
            ConditionKind::Difficulty { .. } => ConditionType::Difficulty,
        }
    }

    pub fn matches(&self, party: &Party) -> bool {
        match self {
            ConditionKind::Unconfigured => false,
            ConditionKind::Server { pattern } => pattern.is_match(&party.server),
            ConditionKind::Guild { pattern } => party
                .players()
                .any(|player| pattern.is_match_opt(player.guild.as_deref())),
            ConditionKind::Player { pattern } => {
                party.players().any(|player| pattern.is_match(&player.name))
            }
            ConditionKind::Level { range } => {
                range.overlaps(party.minimum_level, party.maximum_level)
            }
            ConditionKind::Quest { pattern } => party.quest.as_ref().is_some_and(|quest| {
                pattern.is_match_opt(quest.name.as_deref())
                    || pattern.is_match_opt(quest.adventure_area.as_deref())
            }),
            ConditionKind::Raid { is_raid } => party.is_raid() == *is_raid,
            ConditionKind::Difficulty { pattern } => {
                pattern.is_match_opt(party.difficulty.as_deref())
            }
        }
    }

    /// Short argument summary shown next to the type on filter cards.
    pub fn summary(&self) -> String {
        match self {
            ConditionKind::Unconfigured => "?".to_string(),
            ConditionKind::Server { pattern }
            | ConditionKind::Guild { pattern }
            | ConditionKind::Player { pattern }
            | ConditionKind::Quest { pattern }
            | ConditionKind::Difficulty { pattern } => pattern.to_string(),
            ConditionKind::Level { range } => range.to_string(),
            ConditionKind::Raid { is_raid } => is_raid.to_string(),
        }
    }
}

/// A condition owned by a filter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    #[serde(default)]
    pub id: ConditionId,
    #[serde(default)]
    pub filter_id: FilterId,
    pub kind: ConditionKind,
}

impl Condition {
    pub fn new(filter_id: FilterId, kind: ConditionKind) -> Self {
        Self {
            id: ConditionId::default(),
            filter_id,
            kind,
        }
    }

    /// An unconfigured placeholder condition
    pub fn unconfigured(filter_id: FilterId) -> Self {
        Self::new(filter_id, ConditionKind::Unconfigured)
    }

    pub fn condition_type(&self) -> ConditionType {
        self.kind.condition_type()
    }

    /// Whether this condition holds for the party. Unconfigured conditions never do.
    pub fn matches(&self, party: &Party) -> bool {
        self.kind.matches(party)
    }

    /// False only for the unconfigured placeholder.
    pub fn is_configured(&self) -> bool {
        !matches!(self.kind, ConditionKind::Unconfigured)
    }

    pub fn summary(&self) -> String {
        self.kind.summary()
    }

    /// Rebuild a condition from its stored five-slot row.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Parse` if the stored type name is not one of
    /// the known condition types.
    pub fn from_record(record: ConditionRecord) -> Result<Self, DomainError> {
        let condition_type: ConditionType = record.condition_type.parse()?;
        let kind = match condition_type {
            ConditionType::None => ConditionKind::Unconfigured,
            ConditionType::Server => ConditionKind::Server {
                pattern: record.arg1.into(),
            },
            ConditionType::Guild => ConditionKind::Guild {
                pattern: record.arg1.into(),
            },
            ConditionType::Player => ConditionKind::Player {
                pattern: record.arg1.into(),
            },
            ConditionType::Level => ConditionKind::Level {
                range: LevelRange::new(record.arg2, record.arg3),
            },
            ConditionType::Quest => ConditionKind::Quest {
                pattern: record.arg1.into(),
            },
            ConditionType::Raid => ConditionKind::Raid {
                is_raid: record.arg5,
            },
            ConditionType::Difficulty => ConditionKind::Difficulty {
                pattern: record.arg1.into(),
            },
        };

        Ok(Self {
            id: record.id,
            filter_id: record.filter_id,
            kind,
        })
    }
}

impl TryFrom<ConditionRecord> for Condition {
    type Error = DomainError;

    fn try_from(record: ConditionRecord) -> Result<Self, Self::Error> {
        Self::from_record(record)
    }
}

/// Flat storage row for a condition.
///
/// Every condition type shares this shape; each type reads only the slots
/// it uses. `arg4` is carried for row compatibility and unused by every type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionRecord {
    pub id: ConditionId,
    pub filter_id: FilterId,
    /// Stored type name, e.g. "SERVER"
    #[serde(rename = "type")]
    pub condition_type: String,
    pub arg1: String,
    pub arg2: i32,
    pub arg3: i32,
    pub arg4: f32,
    pub arg5: bool,
}

impl From<&Condition> for ConditionRecord {
    fn from(condition: &Condition) -> Self {
        let mut record = ConditionRecord {
            id: condition.id,
            filter_id: condition.filter_id,
            condition_type: condition.condition_type().as_str().to_string(),
            arg1: String::new(),
            arg2: 0,
            arg3: 0,
            arg4: 0.0,
            arg5: false,
        };

        match &condition.kind {
            ConditionKind::Unconfigured => {}
            ConditionKind::Server { pattern }
            | ConditionKind::Guild { pattern }
            | ConditionKind::Player { pattern }
            | ConditionKind::Quest { pattern }
            | ConditionKind::Difficulty { pattern } => {
                record.arg1 = pattern.as_str().to_string();
            }
            ConditionKind::Level { range } => {
                record.arg2 = range.min;
                record.arg3 = range.max;
            }
            ConditionKind::Raid { is_raid } => {
                record.arg5 = *is_raid;
            }
        }

        record
    }
}
