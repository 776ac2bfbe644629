pub mod error;
mod birthday;
mod entities;
mod ids;
pub mod types;

pub use birthday::Birthday;
pub use entities::*;
pub use error::*;
pub use ids::{PostId, PreferenceId, ProfileId, ThumbnailId, UserId, VideoId};
pub use types::*;

/// Upper bound on `user_profiles.display_name`.
pub const MAX_DISPLAY_NAME_CHARS: usize = 100;

/// Upper bound on `user_preferences.prefered_language`.
pub const MAX_LANGUAGE_TAG_CHARS: usize = 10;

/// Language assigned when no configuration overrides it.
pub const DEFAULT_LANGUAGE: &str = "en";
