//! Local filesystem implementation of the artifact store.
//!
//! Artifacts live at `<root>/<version>/<filename>`. Writes are create-only:
//! the first writer for a key wins and a failed write removes its partial
//! file before the error propagates. Keys are confined to the version
//! subtree under the configured root.

use async_trait::async_trait;
use domains::error::ArtifactError;
use domains::traits::ArtifactStore;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

pub struct LocalArtifactStore {
    root: PathBuf,
}

impl LocalArtifactStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolves the path for a key, refusing any segment that would step
    /// outside the version subtree.
    fn keyed_path(&self, version: &str, filename: &str) -> Result<PathBuf, ArtifactError> {
        for segment in [version, filename] {
            if !is_single_component(segment) {
                return Err(ArtifactError::InvalidKey);
            }
        }
        Ok(self.root.join(version).join(filename))
    }
}

fn is_single_component(segment: &str) -> bool {
    let mut components = Path::new(segment).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

fn io_err(e: std::io::Error) -> ArtifactError {
    ArtifactError::Io(e.to_string())
}

#[async_trait]
impl ArtifactStore for LocalArtifactStore {
    async fn save(&self, bytes: &[u8], version: &str, filename: &str) -> Result<(), ArtifactError> {
        let path = self.keyed_path(version, filename)?;
        fs::create_dir_all(self.root.join(version))
            .await
            .map_err(io_err)?;

        // create_new makes the first writer win; the loser never opens the file.
        let mut file = match fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
        {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                return Err(ArtifactError::AlreadyExists)
            }
            Err(e) => return Err(io_err(e)),
        };

        if let Err(e) = write_fully(&mut file, bytes).await {
            drop(file);
            if let Err(cleanup) = fs::remove_file(&path).await {
                tracing::error!(
                    "failed to remove partial artifact {}: {}",
                    path.display(),
                    cleanup
                );
            }
            return Err(io_err(e));
        }
        Ok(())
    }

    async fn load(&self, version: &str, filename: &str) -> Result<Vec<u8>, ArtifactError> {
        let path = self.keyed_path(version, filename)?;
        match fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(ArtifactError::NotFound),
            Err(e) => Err(io_err(e)),
        }
    }

    async fn delete(&self, version: &str, filename: &str) -> Result<(), ArtifactError> {
        let path = self.keyed_path(version, filename)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_err(e)),
        }
    }
}

async fn write_fully(file: &mut fs::File, bytes: &[u8]) -> std::io::Result<()> {
    file.write_all(bytes).await?;
    file.sync_all().await
}
