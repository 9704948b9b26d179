//! Party entity - a live group listing reported by the party feed
//!
//! Parties are immutable snapshots. Each refresh of the feed produces a new
//! set of records stamped with the time they were observed; nothing in the
//! domain mutates a party after construction.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::PartyId;

/// Quest group size label the feed uses for raids.
pub const RAID_GROUP_SIZE: &str = "Raid";

/// A live party listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Party {
    pub id: PartyId,
    pub server: String,
    pub comment: Option<String>,
    pub quest: Option<PartyQuest>,
    pub difficulty: Option<String>,
    pub minimum_level: Option<i32>,
    pub maximum_level: Option<i32>,
    /// Minutes the party has been in its adventure, if started
    pub adventure_active: Option<i32>,
    pub leader: Player,
    #[serde(default)]
    pub members: Vec<Player>,
    /// When this listing was last observed
    pub updated: DateTime<Utc>,
}

impl Party {
    pub fn new(
        id: impl Into<PartyId>,
        server: impl Into<String>,
        leader: Player,
        updated: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            server: server.into(),
            comment: None,
            quest: None,
            difficulty: None,
            minimum_level: None,
            maximum_level: None,
            adventure_active: None,
            leader,
            members: Vec::new(),
            updated,
        }
    }

    pub fn with_quest(mut self, quest: PartyQuest) -> Self {
        self.quest = Some(quest);
        self
    }

    pub fn with_difficulty(mut self, difficulty: impl Into<String>) -> Self {
        self.difficulty = Some(difficulty.into());
        self
    }

    pub fn with_levels(mut self, minimum: Option<i32>, maximum: Option<i32>) -> Self {
        self.minimum_level = minimum;
        self.maximum_level = maximum;
        self
    }

    pub fn with_members(mut self, members: Vec<Player>) -> Self {
        self.members = members;
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// All players in the party: the leader followed by the members.
    pub fn players(&self) -> impl Iterator<Item = &Player> {
        std::iter::once(&self.leader).chain(self.members.iter())
    }

    /// Whether the party's quest is a raid
    pub fn is_raid(&self) -> bool {
        self.quest
            .as_ref()
            .and_then(|q| q.group_size.as_deref())
            .is_some_and(|size| size == RAID_GROUP_SIZE)
    }

    /// Time elapsed since this listing was observed.
    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        now.signed_duration_since(self.updated)
    }
}

/// Quest details attached to a party listing
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartyQuest {
    pub hex_id: String,
    pub name: Option<String>,
    pub heroic_normal_cr: i32,
    pub epic_normal_cr: i32,
    pub heroic_normal_xp: i32,
    pub heroic_hard_xp: i32,
    pub heroic_elite_xp: i32,
    pub epic_normal_xp: i32,
    pub epic_hard_xp: i32,
    pub epic_elite_xp: i32,
    pub is_free_to_vip: bool,
    pub required_adventure_pack: Option<String>,
    pub adventure_area: Option<String>,
    pub quest_journal_group: Option<String>,
    /// "Party" or "Raid"
    pub group_size: Option<String>,
    pub patron: Option<String>,
}

impl PartyQuest {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn with_adventure_area(mut self, area: impl Into<String>) -> Self {
        self.adventure_area = Some(area.into());
        self
    }

    pub fn with_group_size(mut self, group_size: impl Into<String>) -> Self {
        self.group_size = Some(group_size.into());
        self
    }

    pub fn with_patron(mut self, patron: impl Into<String>) -> Self {
        self.patron = Some(patron.into());
        self
    }
}

/// A player in a party (leader or member)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub name: String,
    pub gender: String,
    pub race: String,
    pub total_level: i32,
    #[serde(default)]
    pub classes: Vec<PlayerClass>,
    pub location: PlayerLocation,
    pub guild: Option<String>,
    pub home_server: Option<String>,
}

impl Player {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_guild(mut self, guild: impl Into<String>) -> Self {
        self.guild = Some(guild.into());
        self
    }
}

/// One class entry of a (possibly multiclassed) player
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerClass {
    pub name: String,
    pub level: i32,
}

/// Where a player currently is in the game world
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerLocation {
    pub name: String,
    pub region: Option<String>,
    pub hex_id: Option<String>,
    pub public_space: bool,
}
