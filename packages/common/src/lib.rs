pub mod config;
pub mod filename;
pub mod storage;

pub use config::StorageConfig;
