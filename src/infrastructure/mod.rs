pub mod config;
pub mod fs_storage;

pub use config::Config;
pub use fs_storage::FileSystemStorage;
