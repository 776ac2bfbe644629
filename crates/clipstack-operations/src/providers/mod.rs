mod image_storage;
mod json_file;
mod memory;
pub(crate) mod tables;

pub use image_storage::FileSystemImageStorage;
pub use json_file::{JsonFileStore, LOCK_FILENAME, STORE_FILENAME};
pub use memory::InMemoryStore;
