use super::types::{ChangeSet, Dataset};
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::path::Path;

async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_slice(&bytes)
        .with_context(|| format!("failed to parse {}", path.display()))
}

pub async fn load_dataset(path: &Path) -> Result<Dataset> {
    let dataset: Dataset = read_json(path).await?;
    tracing::info!(
        "Loaded {} users, {} playlists, {} songs from {}",
        dataset.users.len(),
        dataset.playlists.len(),
        dataset.songs.len(),
        path.display()
    );
    Ok(dataset)
}

pub async fn load_change_set(path: &Path) -> Result<ChangeSet> {
    let changes: ChangeSet = read_json(path).await?;
    tracing::info!("Loaded {} changes from {}", changes.tasks.len(), path.display());
    Ok(changes)
}

pub async fn write_output(path: &Path, dataset: &Dataset, pretty: bool) -> Result<()> {
    let bytes = if pretty {
        serde_json::to_vec_pretty(dataset)?
    } else {
        serde_json::to_vec(dataset)?
    };
    tokio::fs::write(path, bytes)
        .await
        .with_context(|| format!("failed to write output file {}", path.display()))?;
    tracing::info!("Wrote {} records to {}", dataset.len(), path.display());
    Ok(())
}
