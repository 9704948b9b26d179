//! Assemble Engine - Main entry point.
//!
//! Refreshes the quest compendium and the parties from the configured
//! snapshot file, then prints the ranked parties, most relevant first.

use std::sync::Arc;

use anyhow::Context;
use assemble_domain::sort_by_relevancy;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use assemble_engine::infrastructure::{
    clock::SystemClock,
    config::EngineConfig,
    memory_store::{InMemoryPartyStore, InMemoryQuestStore},
    snapshot_file::JsonSnapshotFile,
};
use assemble_engine::App;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv_from_repo_root();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "assemble_engine=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Assemble Engine");

    let config = EngineConfig::from_env();
    tracing::info!(
        snapshot = %config.snapshot_path.display(),
        max_party_age_minutes = config.max_party_age_minutes,
        "Loaded configuration"
    );

    let snapshot = Arc::new(JsonSnapshotFile::new(&config.snapshot_path));
    let app = App::new(
        &config,
        snapshot.clone(),
        snapshot.clone(),
        Arc::new(InMemoryPartyStore::new()),
        Arc::new(InMemoryQuestStore::new()),
        snapshot,
        Arc::new(SystemClock::new()),
    );

    let quests = app
        .use_cases
        .refresh_quests
        .execute()
        .await
        .context("refreshing quest compendium")?;
    tracing::info!(count = quests.len(), "Quest compendium loaded");

    app.use_cases
        .refresh
        .execute()
        .await
        .context("refreshing parties")?;

    let mut results = app
        .use_cases
        .rank
        .execute()
        .await
        .context("ranking parties")?;
    sort_by_relevancy(&mut results);

    for result in &results {
        let party = &result.party;
        let quest = party
            .quest
            .as_ref()
            .and_then(|q| q.name.as_deref())
            .unwrap_or("-");
        println!(
            "{:>3}/{:<3} [{:>3.0}%] {} | {} | {} | {}",
            result.relevancy,
            result.max_relevancy,
            result.intensity() * 100.0,
            party.server,
            party.leader.name,
            quest,
            result.matched_filter_names().join(", "),
        );
    }

    tracing::info!(count = results.len(), "Ranking complete");
    Ok(())
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}
