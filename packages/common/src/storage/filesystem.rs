use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::{AsyncWriteExt, BufReader};
use uuid::Uuid;

use super::error::StorageError;
use super::traits::{BoxReader, FileStore, StagedFile};
use crate::filename::validate_flat_filename;

const STAGING_DIR: &str = ".staging";

/// Filesystem-backed store keyed by client filename.
///
/// Files live directly in `{base_path}/{filename}`. Staged writes go to
/// `{base_path}/.staging/{uuid}` so that promotion is a same-filesystem
/// rename. The staging directory is unreachable by filename because hidden
/// names are rejected.
pub struct FilesystemFileStore {
    base_path: PathBuf,
    max_size: u64,
}

impl FilesystemFileStore {
    /// Create the store, creating the upload and staging directories if absent.
    pub async fn new(base_path: PathBuf, max_size: u64) -> Result<Self, StorageError> {
        fs::create_dir_all(&base_path).await?;
        fs::create_dir_all(base_path.join(STAGING_DIR)).await?;
        tracing::info!(path = %base_path.display(), "Upload directory ready");
        Ok(Self {
            base_path,
            max_size,
        })
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Resolve a filename to its path inside the upload directory.
    fn file_path(&self, filename: &str) -> Result<PathBuf, StorageError> {
        let name = validate_flat_filename(filename).map_err(|reason| {
            StorageError::InvalidFilename {
                name: filename.to_string(),
                reason,
            }
        })?;
        Ok(self.base_path.join(name))
    }

    fn staged_path(&self, id: &Uuid) -> PathBuf {
        self.base_path.join(STAGING_DIR).join(id.to_string())
    }
}

#[async_trait]
impl FileStore for FilesystemFileStore {
    async fn stage(&self, data: &[u8]) -> Result<StagedFile, StorageError> {
        let size = data.len() as u64;
        if size > self.max_size {
            return Err(StorageError::SizeLimitExceeded {
                actual: size,
                limit: self.max_size,
            });
        }

        let id = Uuid::new_v4();
        let path = self.staged_path(&id);

        let result = async {
            let mut file = fs::File::create(&path).await?;
            file.write_all(data).await?;
            file.flush().await?;
            Ok::<_, std::io::Error>(())
        }
        .await;

        if let Err(e) = result {
            let _ = fs::remove_file(&path).await;
            return Err(e.into());
        }

        Ok(StagedFile { id, size })
    }

    async fn promote(&self, staged: &StagedFile, filename: &str) -> Result<(), StorageError> {
        let target = self.file_path(filename)?;
        fs::rename(self.staged_path(&staged.id), &target).await?;
        tracing::debug!(filename, size = staged.size, "Stored file");
        Ok(())
    }

    async fn discard(&self, staged: StagedFile) -> Result<(), StorageError> {
        match fs::remove_file(self.staged_path(&staged.id)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    async fn open(&self, filename: &str) -> Result<(BoxReader, u64), StorageError> {
        let path = self.file_path(filename)?;
        let meta = match fs::metadata(&path).await {
            Ok(meta) => meta,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StorageError::NotFound(filename.to_string()));
            }
            Err(e) => return Err(e.into()),
        };
        if !meta.is_file() {
            return Err(StorageError::NotFound(filename.to_string()));
        }

        let file = fs::File::open(&path).await?;
        Ok((Box::new(BufReader::new(file)), meta.len()))
    }

    async fn exists(&self, filename: &str) -> Result<bool, StorageError> {
        let path = self.file_path(filename)?;
        match fs::metadata(&path).await {
            Ok(meta) => Ok(meta.is_file()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}
