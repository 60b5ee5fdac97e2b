mod error;
mod traits;

pub mod filesystem;

pub use error::StorageError;
pub use filesystem::FilesystemFileStore;
pub use traits::{BoxReader, FileStore, StagedFile};
