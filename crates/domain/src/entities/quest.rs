//! Quest entity - one entry of the quest compendium
//!
//! The compendium is the catalogue users pick quests, patrons and raids
//! from when building filters. Quest names are unique within it.

use serde::{Deserialize, Serialize};

use crate::entities::filter::Filter;
use crate::entities::party::Party;
use crate::ids::QuestId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quest {
    #[serde(default)]
    pub id: QuestId,
    pub name: String,
    pub patron: Option<String>,
    pub heroic_cr: i32,
    /// Absent for quests with no epic version
    pub epic_cr: Option<i32>,
    pub raid: bool,
}

impl Quest {
    pub fn new(name: impl Into<String>, heroic_cr: i32) -> Self {
        Self {
            id: QuestId::default(),
            name: name.into(),
            patron: None,
            heroic_cr,
            epic_cr: None,
            raid: false,
        }
    }

    pub fn with_patron(mut self, patron: impl Into<String>) -> Self {
        self.patron = Some(patron.into());
        self
    }

    pub fn with_epic_cr(mut self, epic_cr: i32) -> Self {
        self.epic_cr = Some(epic_cr);
        self
    }

    pub fn as_raid(mut self) -> Self {
        self.raid = true;
        self
    }

    /// Same quest, compared by name ignoring case.
    pub fn same_name(&self, other: &str) -> bool {
        self.name.to_lowercase() == other.to_lowercase()
    }

    /// Whether a party listing is running this quest.
    pub fn is_run_by(&self, party: &Party) -> bool {
        party
            .quest
            .as_ref()
            .and_then(|quest| quest.name.as_deref())
            .is_some_and(|name| self.same_name(name))
    }

    /// Quick filter for parties running this quest.
    pub fn quest_filter(&self) -> Filter {
        Filter::quest(self.name.clone())
    }

    /// Quick filter for this quest's patron, if it has one.
    pub fn patron_filter(&self) -> Option<Filter> {
        self.patron.as_ref().map(|patron| Filter::patron(patron.clone()))
    }
}
