//! Feed refresh use cases for parties and the quest compendium.

mod refresh_parties;
mod refresh_quests;

pub use refresh_parties::{RefreshError, RefreshParties};
pub use refresh_quests::RefreshQuests;
