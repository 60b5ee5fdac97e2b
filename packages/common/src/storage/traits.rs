use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncReadExt};
use uuid::Uuid;

use super::error::StorageError;

/// Type alias for a boxed async reader.
pub type BoxReader = Box<dyn AsyncRead + Unpin + Send>;

/// Bytes written to the staging area but not yet visible under a filename.
#[derive(Debug)]
pub struct StagedFile {
    pub(crate) id: Uuid,
    pub(crate) size: u64,
}

impl StagedFile {
    pub fn size(&self) -> u64 {
        self.size
    }
}

/// Flat, filename-keyed file storage.
///
/// Writes go through a two-step stage/promote protocol so callers can hold
/// files back until the metadata describing them is ready to commit.
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Write bytes to the staging area.
    async fn stage(&self, data: &[u8]) -> Result<StagedFile, StorageError>;

    /// Publish a staged file under `filename`, replacing any existing file.
    async fn promote(&self, staged: &StagedFile, filename: &str) -> Result<(), StorageError>;

    /// Drop a staged file. Already promoted or missing files are ignored.
    async fn discard(&self, staged: StagedFile) -> Result<(), StorageError>;

    /// Store bytes under `filename` in one call.
    async fn put(&self, filename: &str, data: &[u8]) -> Result<(), StorageError> {
        let staged = self.stage(data).await?;
        let result = self.promote(&staged, filename).await;
        if result.is_err() {
            let _ = self.discard(staged).await;
        }
        result
    }

    /// Open a stored file for streaming, returning the reader and its size.
    async fn open(&self, filename: &str) -> Result<(BoxReader, u64), StorageError>;

    /// Read a stored file fully into memory.
    async fn get(&self, filename: &str) -> Result<Vec<u8>, StorageError> {
        let (mut reader, size) = self.open(filename).await?;
        let mut buf = Vec::with_capacity(usize::try_from(size).unwrap_or_default());
        reader.read_to_end(&mut buf).await?;
        Ok(buf)
    }

    /// Check whether a regular file is stored under `filename`.
    async fn exists(&self, filename: &str) -> Result<bool, StorageError>;
}
