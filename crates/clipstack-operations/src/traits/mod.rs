mod image_storage;
mod media_store;
mod preferences_store;
mod profile_store;
mod user_store;

pub use image_storage::{ImageStorage, MediaUpload};
pub use media_store::MediaStore;
pub use preferences_store::PreferencesStore;
pub use profile_store::ProfileStore;
pub use user_store::UserStore;
