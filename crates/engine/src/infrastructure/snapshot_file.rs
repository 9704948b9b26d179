//! JSON snapshot file adapter.
//!
//! A snapshot file captures one feed response and, optionally, one quest
//! compendium response together with the user's filters:
//!
//! ```json
//! {
//!   "servers": [ { "Name": "Khyber", "Groups": [ ... ] } ],
//!   "compendium": [ { "ServerName": "Khyber", "Entries": [ ... ] } ],
//!   "filters": [ ... ]
//! }
//! ```
//!
//! The file is re-read on every call, so edits show up on the next refresh.

use std::path::{Path, PathBuf};

use assemble_domain::Filter;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::infrastructure::feed::{CompendiumDto, ServerGroupDto};
use crate::infrastructure::ports::{
    FeedError, FilterRepo, PartyFeedPort, QuestFeedPort, RepoError,
};

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct SnapshotDocument {
    #[serde(default)]
    pub servers: Vec<ServerGroupDto>,
    #[serde(default)]
    pub compendium: Vec<CompendiumDto>,
    #[serde(default)]
    pub filters: Vec<Filter>,
}

/// Filter and feed source backed by a JSON file on disk.
pub struct JsonSnapshotFile {
    path: PathBuf,
}

impl JsonSnapshotFile {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_raw(&self) -> std::io::Result<String> {
        tokio::fs::read_to_string(&self.path).await
    }

    async fn read_feed_document(&self) -> Result<SnapshotDocument, FeedError> {
        let raw = self.read_raw().await.map_err(FeedError::request)?;
        serde_json::from_str(&raw).map_err(FeedError::invalid_payload)
    }
}

#[async_trait]
impl FilterRepo for JsonSnapshotFile {
    async fn list_with_conditions(&self) -> Result<Vec<Filter>, RepoError> {
        let raw = self
            .read_raw()
            .await
            .map_err(|e| RepoError::storage("read_snapshot", e))?;
        let document: SnapshotDocument =
            serde_json::from_str(&raw).map_err(RepoError::serialization)?;

        tracing::debug!(
            path = %self.path.display(),
            count = document.filters.len(),
            "Loaded filters from snapshot"
        );
        Ok(document.filters)
    }
}

#[async_trait]
impl PartyFeedPort for JsonSnapshotFile {
    async fn fetch_server_groups(&self) -> Result<Vec<ServerGroupDto>, FeedError> {
        let document = self.read_feed_document().await?;

        tracing::debug!(
            path = %self.path.display(),
            servers = document.servers.len(),
            "Loaded feed from snapshot"
        );
        Ok(document.servers)
    }
}

#[async_trait]
impl QuestFeedPort for JsonSnapshotFile {
    async fn fetch_compendium(&self) -> Result<Vec<CompendiumDto>, FeedError> {
        let document = self.read_feed_document().await?;

        tracing::debug!(
            path = %self.path.display(),
            servers = document.compendium.len(),
            "Loaded quest compendium from snapshot"
        );
        Ok(document.compendium)
    }
}
