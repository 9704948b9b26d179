//! Domain entities: party listings, the quest compendium and the filters
//! that rank parties.

mod condition;
mod filter;
mod party;
mod quest;

pub use condition::{Condition, ConditionKind, ConditionRecord, ConditionType};
pub use filter::{all_match, Filter};
pub use party::{Party, PartyQuest, Player, PlayerClass, PlayerLocation, RAID_GROUP_SIZE};
pub use quest::Quest;
