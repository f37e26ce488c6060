use chrono::{DateTime, Utc};
use gantry_core::{GantryError, GantryResult};
use gantry_domain::Rig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use uuid::Uuid;

const STATE_FORMAT_VERSION: u32 = 1;

/// JSON file store for rig state.
///
/// Saves go through a temp file in the same directory followed by an
/// atomic rename, so a crash mid-write cannot corrupt the state file.
/// Only the rig is stored; command history lives and dies with a run.
#[derive(Debug, Clone)]
pub struct RigStore {
    path: PathBuf,
    instance_id: Uuid,
}

#[derive(Debug, Serialize, Deserialize)]
struct StateEnvelope {
    version: u32,
    metadata: StateMetadata,
    rig: Rig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateMetadata {
    pub instance_id: Uuid,
    pub saved_at: DateTime<Utc>,
}

impl RigStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            instance_id: Uuid::new_v4(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    pub async fn load(&self) -> GantryResult<Rig> {
        let bytes = fs::read(&self.path).await?;
        let envelope: StateEnvelope = serde_json::from_slice(&bytes)
            .map_err(|e| GantryError::Serialization(e.to_string()))?;

        if envelope.version != STATE_FORMAT_VERSION {
            return Err(GantryError::Serialization(format!(
                "Unsupported state file version: {}",
                envelope.version
            )));
        }

        tracing::info!(
            "Loaded {} bytes from {}",
            bytes.len(),
            self.path.display()
        );

        Ok(envelope.rig)
    }

    pub async fn save(&self, rig: &Rig) -> GantryResult<()> {
        let envelope = StateEnvelope {
            version: STATE_FORMAT_VERSION,
            metadata: StateMetadata {
                instance_id: self.instance_id,
                saved_at: Utc::now(),
            },
            rig: rig.clone(),
        };
        let bytes = serde_json::to_vec_pretty(&envelope)
            .map_err(|e| GantryError::Serialization(e.to_string()))?;

        // Temp file in the same directory keeps the rename on one filesystem
        let parent = self.path.parent().unwrap_or_else(|| Path::new("."));
        let temp_file = tempfile::NamedTempFile::new_in(parent)?;
        let temp_path = temp_file.path().to_path_buf();
        fs::write(&temp_path, &bytes).await?;
        fs::rename(&temp_path, &self.path).await?;

        tracing::info!("Saved {} bytes to {}", bytes.len(), self.path.display());
        Ok(())
    }
}
