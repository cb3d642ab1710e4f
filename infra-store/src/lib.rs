use std::path::{Path, PathBuf};

use async_trait::async_trait;

use aura_configuration::StorageConfig;
use aura_domain::{ArtifactBundle, ArtifactSinkPort, AudioAsset, DomainError};

const SERVICE: &str = "store";
const BUNDLE_FILE: &str = "bundle.json";

/// Durable sink writing each finished run under its own session
/// directory: the bundle as JSON next to the original audio bytes.
/// Write-only; the pipeline never reads anything back.
pub struct FilesystemArtifactSink {
    root: PathBuf,
}

impl FilesystemArtifactSink {
    pub fn new(config: &StorageConfig) -> Self {
        Self {
            root: PathBuf::from(&config.root),
        }
    }

    pub fn at(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn session_dir(&self, session_id: &str) -> PathBuf {
        self.root.join(session_id)
    }
}

#[async_trait]
impl ArtifactSinkPort for FilesystemArtifactSink {
    async fn persist(
        &self,
        session_id: &str,
        bundle: &ArtifactBundle,
        asset: &AudioAsset,
    ) -> Result<(), DomainError> {
        let dir = self.session_dir(session_id);
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|err| io_error(&dir, err))?;

        let bundle_path = dir.join(BUNDLE_FILE);
        let json = serde_json::to_vec_pretty(bundle)
            .map_err(|err| DomainError::external(SERVICE, format!("bundle serialization: {err}")))?;
        tokio::fs::write(&bundle_path, json)
            .await
            .map_err(|err| io_error(&bundle_path, err))?;

        // Keep only the final path component so a hostile filename
        // cannot escape the session directory.
        let audio_name = Path::new(&asset.filename)
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| format!("audio.{}", asset.extension));
        let audio_path = dir.join(audio_name);
        tokio::fs::write(&audio_path, &asset.bytes)
            .await
            .map_err(|err| io_error(&audio_path, err))?;

        tracing::info!(session_id, dir = %dir.display(), "artifacts persisted");
        Ok(())
    }
}

fn io_error(path: &Path, err: std::io::Error) -> DomainError {
    DomainError::external(SERVICE, format!("{}: {err}", path.display()))
}
