//! In-memory party and quest storage.

use assemble_domain::{Party, Quest, QuestId};
use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::infrastructure::ports::{PartyRepo, QuestRepo, RepoError};

/// Party store kept in process memory, in feed order.
///
/// Party ids are unique within a feed snapshot, so replacing the stored set
/// with the new snapshot both deletes vanished parties and overwrites
/// updated ones.
#[derive(Default)]
pub struct InMemoryPartyStore {
    parties: RwLock<Vec<Party>>,
}

impl InMemoryPartyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parties(parties: Vec<Party>) -> Self {
        Self {
            parties: RwLock::new(parties),
        }
    }
}

#[async_trait]
impl PartyRepo for InMemoryPartyStore {
    async fn list_all(&self) -> Result<Vec<Party>, RepoError> {
        Ok(self.parties.read().await.clone())
    }

    async fn replace_all(&self, parties: Vec<Party>) -> Result<(), RepoError> {
        let mut stored = self.parties.write().await;
        tracing::debug!(
            previous = stored.len(),
            current = parties.len(),
            "Replacing stored parties"
        );
        *stored = parties;
        Ok(())
    }
}

/// Quest compendium kept in process memory, in insertion order.
///
/// Names are unique: upserting a quest whose name is already stored
/// overwrites that entry in place and keeps its id.
#[derive(Default)]
pub struct InMemoryQuestStore {
    state: RwLock<QuestState>,
}

#[derive(Default)]
struct QuestState {
    quests: Vec<Quest>,
    last_id: i64,
}

impl InMemoryQuestStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl QuestRepo for InMemoryQuestStore {
    async fn list_all(&self) -> Result<Vec<Quest>, RepoError> {
        Ok(self.state.read().await.quests.clone())
    }

    async fn upsert_all(&self, quests: Vec<Quest>) -> Result<(), RepoError> {
        let mut state = self.state.write().await;
        let (mut inserted, mut replaced) = (0usize, 0usize);

        for mut quest in quests {
            match state.quests.iter().position(|q| q.same_name(&quest.name)) {
                Some(index) => {
                    quest.id = state.quests[index].id;
                    state.quests[index] = quest;
                    replaced += 1;
                }
                None => {
                    state.last_id += 1;
                    quest.id = QuestId::new(state.last_id);
                    state.quests.push(quest);
                    inserted += 1;
                }
            }
        }

        tracing::debug!(inserted, replaced, "Upserted quests");
        Ok(())
    }
}
