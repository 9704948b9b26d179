//! Wire format of the live party feed and its conversion to domain parties.
//!
//! The feed answers with one entry per game server, each listing that
//! server's open groups. Field names are PascalCase on the wire.
//!
//! The quest compendium comes from the same service, one entry list per
//! server, with its own field names.
//!
//! The feed signals its own outages in-band: a fake group led by
//! [`AUDIT_LEADER_NAME`] whose comment explains what is wrong. Hardcore
//! server groups are never shown.

use assemble_domain::{Party, PartyId, PartyQuest, Player, PlayerClass, PlayerLocation, Quest};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::infrastructure::ports::FeedError;

/// Leader name of the status pseudo-group the feed uses to report outages
pub const AUDIT_LEADER_NAME: &str = "DDO Audit";

/// Server whose groups are excluded from listings
pub const HARDCORE_SERVER: &str = "Hardcore";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ServerGroupDto {
    pub name: String,
    #[serde(default)]
    pub group_count: i32,
    #[serde(rename = "Groups", default)]
    pub parties: Vec<PartyDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PartyDto {
    pub id: i64,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub quest: Option<PartyQuestDto>,
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub accepted_classes: Option<Vec<String>>,
    #[serde(default)]
    pub minimum_level: Option<i32>,
    #[serde(default)]
    pub maximum_level: Option<i32>,
    #[serde(default)]
    pub adventure_active: Option<i32>,
    pub leader: PlayerDto,
    #[serde(default)]
    pub members: Vec<PlayerDto>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct PartyQuestDto {
    pub hex_id: String,
    pub name: Option<String>,
    #[serde(rename = "HeroicNormalCR")]
    pub heroic_normal_cr: i32,
    #[serde(rename = "EpicNormalCR")]
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
    pub group_size: Option<String>,
    pub patron: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PlayerDto {
    pub name: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub race: String,
    #[serde(default)]
    pub total_level: i32,
    #[serde(default)]
    pub classes: Vec<ClassDto>,
    #[serde(default)]
    pub location: LocationDto,
    #[serde(default)]
    pub guild: Option<String>,
    #[serde(default)]
    pub home_server: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct LocationDto {
    pub name: String,
    pub region: Option<String>,
    pub hex_id: Option<String>,
    #[serde(rename = "IsPublicSpace")]
    pub public_space: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ClassDto {
    pub name: String,
    pub level: i32,
}

impl From<PartyQuestDto> for PartyQuest {
    fn from(dto: PartyQuestDto) -> Self {
        PartyQuest {
            hex_id: dto.hex_id,
            name: dto.name,
            heroic_normal_cr: dto.heroic_normal_cr,
            epic_normal_cr: dto.epic_normal_cr,
            heroic_normal_xp: dto.heroic_normal_xp,
            heroic_hard_xp: dto.heroic_hard_xp,
            heroic_elite_xp: dto.heroic_elite_xp,
            epic_normal_xp: dto.epic_normal_xp,
            epic_hard_xp: dto.epic_hard_xp,
            epic_elite_xp: dto.epic_elite_xp,
            is_free_to_vip: dto.is_free_to_vip,
            required_adventure_pack: dto.required_adventure_pack,
            adventure_area: dto.adventure_area,
            quest_journal_group: dto.quest_journal_group,
            group_size: dto.group_size,
            patron: dto.patron,
        }
    }
}

impl From<PlayerDto> for Player {
    fn from(dto: PlayerDto) -> Self {
        Player {
            name: dto.name,
            gender: dto.gender,
            race: dto.race,
            total_level: dto.total_level,
            classes: dto
                .classes
                .into_iter()
                .map(|c| PlayerClass {
                    name: c.name,
                    level: c.level,
                })
                .collect(),
            location: PlayerLocation {
                name: dto.location.name,
                region: dto.location.region,
                hex_id: dto.location.hex_id,
                public_space: dto.location.public_space,
            },
            guild: dto.guild,
            home_server: dto.home_server,
        }
    }
}

impl PartyDto {
    fn into_party(self, server: &str, observed_at: DateTime<Utc>) -> Party {
        Party {
            id: PartyId::new(self.id),
            server: server.to_string(),
            comment: self.comment,
            quest: self.quest.map(PartyQuest::from),
            difficulty: self.difficulty,
            minimum_level: self.minimum_level,
            maximum_level: self.maximum_level,
            adventure_active: self.adventure_active,
            leader: self.leader.into(),
            members: self.members.into_iter().map(Player::from).collect(),
            updated: observed_at,
        }
    }
}

/// Flatten server groups into parties, all stamped as observed at `observed_at`.
pub fn into_parties(groups: Vec<ServerGroupDto>, observed_at: DateTime<Utc>) -> Vec<Party> {
    groups
        .into_iter()
        .flat_map(|group| {
            let server = group.name;
            group
                .parties
                .into_iter()
                .map(move |party| party.into_party(&server, observed_at))
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompendiumDto {
    #[serde(rename = "ServerName")]
    pub name: String,
    #[serde(rename = "Entries", default)]
    pub quests: Vec<QuestDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestDto {
    #[serde(rename = "QuestName")]
    pub name: String,
    #[serde(rename = "Patron", default)]
    pub patron: Option<String>,
    #[serde(rename = "CR_Heroic")]
    pub heroic_cr: i32,
    #[serde(rename = "CR_Epic", default)]
    pub epic_cr: Option<i32>,
    #[serde(rename = "Raid", default)]
    pub raid: bool,
}

impl From<QuestDto> for Quest {
    fn from(dto: QuestDto) -> Self {
        Quest {
            id: Default::default(),
            name: dto.name,
            patron: dto.patron,
            heroic_cr: dto.heroic_cr,
            epic_cr: dto.epic_cr,
            raid: dto.raid,
        }
    }
}

/// Quests of the compendium. Every server lists the same catalogue, so only
/// the first server's entries are read.
pub fn into_quests(compendia: Vec<CompendiumDto>) -> Vec<Quest> {
    compendia
        .into_iter()
        .next()
        .map(|compendium| compendium.quests.into_iter().map(Quest::from).collect())
        .unwrap_or_default()
}

fn is_audit(party: &Party) -> bool {
    party.leader.name == AUDIT_LEADER_NAME
}

/// Drop status pseudo-groups and hardcore groups, or fail if the feed
/// reported an outage.
///
/// # Errors
///
/// Returns `FeedError::Unavailable` with the status group's comment when a
/// status group appears outside the hardcore server.
pub fn screen_parties(parties: Vec<Party>) -> Result<Vec<Party>, FeedError> {
    if let Some(status) = parties
        .iter()
        .find(|p| is_audit(p) && p.server != HARDCORE_SERVER)
    {
        return Err(FeedError::Unavailable(
            status.comment.clone().unwrap_or_default(),
        ));
    }

    Ok(parties
        .into_iter()
        .filter(|p| !is_audit(p) && p.server != HARDCORE_SERVER)
        .collect())
}
