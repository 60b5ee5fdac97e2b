use std::path::PathBuf;

use serde::Deserialize;

/// Upload directory configuration shared by the file store and the server.
#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Flat directory holding uploaded files. Default: "./uploaded_files".
    #[serde(default = "default_upload_dir")]
    pub upload_dir: PathBuf,
    /// Maximum size of a single uploaded file in bytes. Default: 32 MiB.
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,
    /// Maximum size of a whole creation request body in bytes. Default: 128 MiB.
    #[serde(default = "default_max_upload_size")]
    pub max_upload_size: usize,
}

fn default_upload_dir() -> PathBuf {
    PathBuf::from("./uploaded_files")
}
fn default_max_file_size() -> u64 {
    32 * 1024 * 1024
}
fn default_max_upload_size() -> usize {
    128 * 1024 * 1024
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            upload_dir: default_upload_dir(),
            max_file_size: default_max_file_size(),
            max_upload_size: default_max_upload_size(),
        }
    }
}
