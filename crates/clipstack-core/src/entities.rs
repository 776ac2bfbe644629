use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::birthday::Birthday;
use crate::ids::{PostId, PreferenceId, ProfileId, ThumbnailId, UserId, VideoId};
use crate::types::{Gender, PostStatus, PostVisibility, ProfileType};

/// Account row owned by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub has_profile: bool,
    #[serde(default)]
    pub image: Option<String>,
}

impl User {
    #[must_use]
    pub fn new(id: UserId, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            has_profile: false,
            image: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub profile_id: ProfileId,
    pub user_id: UserId,
    pub display_name: String,
    pub biography: Option<String>,
    pub avatar_url: Option<String>,
    pub gender: Gender,
    pub birthday: Option<Birthday>,
    pub profile_type: ProfileType,
    pub follower_count: u64,
    pub following_count: u64,
    pub posts_count: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    pub preference_id: PreferenceId,
    pub user_id: UserId,
    pub preferred_language: String,
    pub auto_play_video: bool,
    pub auto_mute_video: bool,
    pub enable_hdr: bool,
    pub account_privacy: ProfileType,
    pub show_activity_status: bool,
    pub allow_comments: bool,
    pub new_comment_notification: bool,
    pub new_follow_notification: bool,
    pub new_like_notification: bool,
    pub new_dislike_notification: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserPreferences {
    /// Preferences row as first written for a new profile.
    ///
    /// Everything except the language takes the platform default: autoplay on,
    /// sound on, HDR off, public account, and every notification except
    /// dislikes enabled.
    #[must_use]
    pub fn new(
        preference_id: PreferenceId,
        user_id: UserId,
        preferred_language: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            preference_id,
            user_id,
            preferred_language: preferred_language.into(),
            auto_play_video: true,
            auto_mute_video: false,
            enable_hdr: false,
            account_privacy: ProfileType::Public,
            show_activity_status: true,
            allow_comments: true,
            new_comment_notification: true,
            new_follow_notification: true,
            new_like_notification: true,
            new_dislike_notification: false,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Thumbnail {
    pub thumb_id: ThumbnailId,
    pub thumb_uri: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    pub video_id: VideoId,
    pub user_id: UserId,
    pub post_id: PostId,
    pub thumbnail_id: ThumbnailId,
    pub length_in_milliseconds: u64,
    pub mime_type: String,
    pub video_uri: String,
    pub codec: String,
    pub format: String,
    pub height: u32,
    pub width: u32,
    pub bit_rate: u64,
    pub ratio: String,
    pub size: u64,
    pub title: String,
    pub fps: u32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub post_id: PostId,
    pub user_id: UserId,
    pub profile_id: ProfileId,
    pub video_id: VideoId,
    pub caption: String,
    pub status: PostStatus,
    pub visibility: PostVisibility,
    pub allow_comments: bool,
    pub allow_likes: bool,
    pub allow_dislikes: bool,
    pub allow_saves: bool,
    pub is_ads: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub like_count: u64,
    pub dislike_count: u64,
    pub comment_count: u64,
    pub save_count: u64,
    pub view_count: u64,
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// A post that goes live immediately with every interaction enabled.
    #[must_use]
    pub fn published(
        post_id: PostId,
        user_id: UserId,
        profile_id: ProfileId,
        video_id: VideoId,
        caption: impl Into<String>,
        visibility: PostVisibility,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            post_id,
            user_id,
            profile_id,
            video_id,
            caption: caption.into(),
            status: PostStatus::Published,
            visibility,
            allow_comments: true,
            allow_likes: true,
            allow_dislikes: true,
            allow_saves: true,
            is_ads: false,
            published_at: Some(now),
            like_count: 0,
            dislike_count: 0,
            comment_count: 0,
            save_count: 0,
            view_count: 0,
            created_at: now,
        }
    }
}
