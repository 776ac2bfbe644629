mod create_post;
mod create_profile;
mod fetch;
mod preferences;
mod validation;

pub use create_post::{CreatePostInput, CreatePostOperation, VideoMetadata};
pub use create_profile::{CreateProfileInput, CreateProfileOperation, ProfileCreated};
pub use fetch::{FetchPreferencesOperation, FetchProfileOperation};
pub use preferences::{
    NotificationUpdate, PlaybackUpdate, PreferenceChange, PrivacyUpdate,
    UpdatePreferencesOperation,
};
pub use validation::{ValidationError, ValidationErrors};
pub(crate) use validation::ValidationErrorCollector;
