use clipstack_core::{
    Post, PostId, PreferenceId, ProfileId, Thumbnail, ThumbnailId, User, UserId, UserPreferences,
    UserProfile, Video, VideoId,
};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::StoreError;

pub(crate) const USERS: &str = "user";
pub(crate) const PROFILES: &str = "user_profiles";
pub(crate) const PREFERENCES: &str = "user_preferences";
pub(crate) const THUMBNAILS: &str = "thumbnails";
pub(crate) const VIDEOS: &str = "videos";
pub(crate) const POSTS: &str = "posts";

fn violation(table: &'static str, constraint: &'static str) -> StoreError {
    StoreError::ConstraintViolation { table, constraint }
}

/// Every table of the relational model, in insertion order.
///
/// All constraint checks live here so each provider enforces them the same way.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct Tables {
    users: IndexMap<UserId, User>,
    profiles: IndexMap<ProfileId, UserProfile>,
    preferences: IndexMap<PreferenceId, UserPreferences>,
    thumbnails: IndexMap<ThumbnailId, Thumbnail>,
    videos: IndexMap<VideoId, Video>,
    posts: IndexMap<PostId, Post>,
}

impl Tables {
    pub(crate) fn insert_user(&mut self, user: &User) -> Result<(), StoreError> {
        if self.users.contains_key(&user.id) {
            return Err(violation(USERS, "primary key id"));
        }
        if self.users.values().any(|u| u.email == user.email) {
            return Err(violation(USERS, "unique email"));
        }
        self.users.insert(user.id.clone(), user.clone());
        Ok(())
    }

    pub(crate) fn user(&self, id: &UserId) -> Option<User> {
        self.users.get(id).cloned()
    }

    pub(crate) fn set_profile_state(
        &mut self,
        id: &UserId,
        has_profile: bool,
        image: Option<&str>,
    ) -> usize {
        match self.users.get_mut(id) {
            Some(user) => {
                user.has_profile = has_profile;
                user.image = image.map(str::to_string);
                1
            }
            None => 0,
        }
    }

    pub(crate) fn insert_profile(&mut self, profile: &UserProfile) -> Result<(), StoreError> {
        if self.profiles.contains_key(&profile.profile_id) {
            return Err(violation(PROFILES, "primary key profile_id"));
        }
        if self.profiles.values().any(|p| p.user_id == profile.user_id) {
            return Err(violation(PROFILES, "unique user_id"));
        }
        self.profiles.insert(profile.profile_id, profile.clone());
        Ok(())
    }

    pub(crate) fn profile_by_user(&self, user_id: &UserId) -> Option<UserProfile> {
        self.profiles
            .values()
            .find(|p| &p.user_id == user_id)
            .cloned()
    }

    pub(crate) fn delete_profile(&mut self, id: &ProfileId) -> Result<bool, StoreError> {
        if self.posts.values().any(|p| &p.profile_id == id) {
            return Err(violation(POSTS, "foreign key profile_id"));
        }
        Ok(self.profiles.shift_remove(id).is_some())
    }

    pub(crate) fn insert_preferences(
        &mut self,
        preferences: &UserPreferences,
    ) -> Result<(), StoreError> {
        if self.preferences.contains_key(&preferences.preference_id) {
            return Err(violation(PREFERENCES, "primary key preference_id"));
        }
        if self
            .preferences
            .values()
            .any(|p| p.user_id == preferences.user_id)
        {
            return Err(violation(PREFERENCES, "unique user_id"));
        }
        self.preferences
            .insert(preferences.preference_id, preferences.clone());
        Ok(())
    }

    pub(crate) fn preferences_by_user(&self, user_id: &UserId) -> Option<UserPreferences> {
        self.preferences
            .values()
            .find(|p| &p.user_id == user_id)
            .cloned()
    }

    pub(crate) fn modify_preferences(
        &mut self,
        user_id: &UserId,
        change: &mut dyn FnMut(&mut UserPreferences),
    ) -> Option<UserPreferences> {
        let row = self
            .preferences
            .values_mut()
            .find(|p| &p.user_id == user_id)?;
        let key = (row.preference_id, row.user_id.clone());
        change(row);
        // identity columns are not writable through an update
        row.preference_id = key.0;
        row.user_id = key.1;
        Some(row.clone())
    }

    pub(crate) fn delete_preferences(&mut self, id: &PreferenceId) -> bool {
        self.preferences.shift_remove(id).is_some()
    }

    pub(crate) fn insert_thumbnail(&mut self, thumbnail: &Thumbnail) -> Result<(), StoreError> {
        if self.thumbnails.contains_key(&thumbnail.thumb_id) {
            return Err(violation(THUMBNAILS, "primary key thumb_id"));
        }
        self.thumbnails.insert(thumbnail.thumb_id, thumbnail.clone());
        Ok(())
    }

    pub(crate) fn insert_video(&mut self, video: &Video) -> Result<(), StoreError> {
        if self.videos.contains_key(&video.video_id) {
            return Err(violation(VIDEOS, "primary key video_id"));
        }
        if !self.thumbnails.contains_key(&video.thumbnail_id) {
            return Err(violation(VIDEOS, "foreign key thumbnail_id"));
        }
        self.videos.insert(video.video_id, video.clone());
        Ok(())
    }

    pub(crate) fn insert_post(&mut self, post: &Post) -> Result<(), StoreError> {
        if self.posts.contains_key(&post.post_id) {
            return Err(violation(POSTS, "primary key post_id"));
        }
        if !self.profiles.contains_key(&post.profile_id) {
            return Err(violation(POSTS, "foreign key profile_id"));
        }
        if !self.videos.contains_key(&post.video_id) {
            return Err(violation(POSTS, "foreign key video_id"));
        }
        self.posts.insert(post.post_id, post.clone());
        Ok(())
    }

    pub(crate) fn thumbnail(&self, id: &ThumbnailId) -> Option<Thumbnail> {
        self.thumbnails.get(id).cloned()
    }

    pub(crate) fn video(&self, id: &VideoId) -> Option<Video> {
        self.videos.get(id).cloned()
    }

    pub(crate) fn post(&self, id: &PostId) -> Option<Post> {
        self.posts.get(id).cloned()
    }

    pub(crate) fn delete_thumbnail(&mut self, id: &ThumbnailId) -> Result<bool, StoreError> {
        if self.videos.values().any(|v| &v.thumbnail_id == id) {
            return Err(violation(VIDEOS, "foreign key thumbnail_id"));
        }
        Ok(self.thumbnails.shift_remove(id).is_some())
    }

    pub(crate) fn delete_video(&mut self, id: &VideoId) -> Result<bool, StoreError> {
        if self.posts.values().any(|p| &p.video_id == id) {
            return Err(violation(POSTS, "foreign key video_id"));
        }
        Ok(self.videos.shift_remove(id).is_some())
    }

    pub(crate) fn delete_post(&mut self, id: &PostId) -> bool {
        self.posts.shift_remove(id).is_some()
    }
}

/// Implements every store trait for a provider exposing
/// `read(|&Tables| ..)` and `write(|&mut Tables| ..)`.
macro_rules! impl_table_stores {
    ($provider:ty) => {
        impl $crate::traits::UserStore for $provider {
            fn insert_user(&self, user: &User) -> Result<(), StoreError> {
                self.write(|tables| tables.insert_user(user))
            }

            fn find_user(&self, id: &UserId) -> Result<Option<User>, StoreError> {
                self.read(|tables| tables.user(id))
            }

            fn set_profile_state(
                &self,
                id: &UserId,
                has_profile: bool,
                image: Option<&str>,
            ) -> Result<usize, StoreError> {
                self.write(|tables| Ok(tables.set_profile_state(id, has_profile, image)))
            }
        }

        impl $crate::traits::ProfileStore for $provider {
            fn insert_profile(&self, profile: &UserProfile) -> Result<(), StoreError> {
                self.write(|tables| tables.insert_profile(profile))
            }

            fn find_profile_by_user(
                &self,
                user_id: &UserId,
            ) -> Result<Option<UserProfile>, StoreError> {
                self.read(|tables| tables.profile_by_user(user_id))
            }

            fn delete_profile(&self, id: &ProfileId) -> Result<bool, StoreError> {
                self.write(|tables| tables.delete_profile(id))
            }
        }

        impl $crate::traits::PreferencesStore for $provider {
            fn insert_preferences(&self, preferences: &UserPreferences) -> Result<(), StoreError> {
                self.write(|tables| tables.insert_preferences(preferences))
            }

            fn find_preferences_by_user(
                &self,
                user_id: &UserId,
            ) -> Result<Option<UserPreferences>, StoreError> {
                self.read(|tables| tables.preferences_by_user(user_id))
            }

            fn modify_preferences(
                &self,
                user_id: &UserId,
                change: &mut dyn FnMut(&mut UserPreferences),
            ) -> Result<Option<UserPreferences>, StoreError> {
                self.write(|tables| Ok(tables.modify_preferences(user_id, change)))
            }

            fn delete_preferences(&self, id: &PreferenceId) -> Result<bool, StoreError> {
                self.write(|tables| Ok(tables.delete_preferences(id)))
            }
        }

        impl $crate::traits::MediaStore for $provider {
            fn insert_thumbnail(&self, thumbnail: &Thumbnail) -> Result<(), StoreError> {
                self.write(|tables| tables.insert_thumbnail(thumbnail))
            }

            fn insert_video(&self, video: &Video) -> Result<(), StoreError> {
                self.write(|tables| tables.insert_video(video))
            }

            fn insert_post(&self, post: &Post) -> Result<(), StoreError> {
                self.write(|tables| tables.insert_post(post))
            }

            fn find_thumbnail(&self, id: &ThumbnailId) -> Result<Option<Thumbnail>, StoreError> {
                self.read(|tables| tables.thumbnail(id))
            }

            fn find_video(&self, id: &VideoId) -> Result<Option<Video>, StoreError> {
                self.read(|tables| tables.video(id))
            }

            fn find_post(&self, id: &PostId) -> Result<Option<Post>, StoreError> {
                self.read(|tables| tables.post(id))
            }

            fn delete_thumbnail(&self, id: &ThumbnailId) -> Result<bool, StoreError> {
                self.write(|tables| tables.delete_thumbnail(id))
            }

            fn delete_video(&self, id: &VideoId) -> Result<bool, StoreError> {
                self.write(|tables| tables.delete_video(id))
            }

            fn delete_post(&self, id: &PostId) -> Result<bool, StoreError> {
                self.write(|tables| Ok(tables.delete_post(id)))
            }
        }
    };
}

pub(crate) use impl_table_stores;

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use clipstack_core::{Gender, ProfileType};

    use super::*;

    fn user(id: &str, email: &str) -> User {
        User::new(UserId::new(id).expect("valid id"), "Test", email)
    }

    fn profile(user_id: &str) -> UserProfile {
        let now = Utc::now();
        UserProfile {
            profile_id: ProfileId::generate(),
            user_id: UserId::new(user_id).expect("valid id"),
            display_name: "Test".to_string(),
            biography: None,
            avatar_url: None,
            gender: Gender::Other,
            birthday: None,
            profile_type: ProfileType::Public,
            follower_count: 0,
            following_count: 0,
            posts_count: 0,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn user_email_is_unique() {
        let mut tables = Tables::default();
        tables
            .insert_user(&user("usr_1", "a@example.com"))
            .expect("first insert");

        let err = tables
            .insert_user(&user("usr_2", "a@example.com"))
            .expect_err("duplicate email");

        assert!(matches!(
            err,
            StoreError::ConstraintViolation {
                table: USERS,
                constraint: "unique email"
            }
        ));
    }

    #[test]
    fn one_profile_per_user() {
        let mut tables = Tables::default();
        tables.insert_profile(&profile("usr_1")).expect("first");

        let err = tables
            .insert_profile(&profile("usr_1"))
            .expect_err("second profile");

        assert!(err.is_constraint_violation());
    }

    #[test]
    fn set_profile_state_reports_zero_rows_for_unknown_user() {
        let mut tables = Tables::default();

        let affected =
            tables.set_profile_state(&UserId::new("ghost").expect("valid"), true, None);

        assert_eq!(affected, 0);
    }

    #[test]
    fn modify_preferences_cannot_rekey_row() {
        let mut tables = Tables::default();
        let owner = UserId::new("usr_1").expect("valid");
        let prefs = UserPreferences::new(PreferenceId::generate(), owner.clone(), "en", Utc::now());
        tables.insert_preferences(&prefs).expect("insert");

        let updated = tables
            .modify_preferences(&owner, &mut |p| {
                p.enable_hdr = true;
                p.user_id = UserId::new("usr_2").expect("valid");
            })
            .expect("row exists");

        assert!(updated.enable_hdr);
        assert_eq!(updated.user_id, owner);
        assert_eq!(updated.preference_id, prefs.preference_id);
    }

    #[test]
    fn video_requires_thumbnail() {
        let mut tables = Tables::default();
        let video = Video {
            video_id: VideoId::generate(),
            user_id: UserId::new("usr_1").expect("valid"),
            post_id: PostId::generate(),
            thumbnail_id: ThumbnailId::generate(),
            length_in_milliseconds: 1000,
            mime_type: "video/mp4".to_string(),
            video_uri: "http://localhost/v.mp4".to_string(),
            codec: "h264".to_string(),
            format: "mp4".to_string(),
            height: 720,
            width: 1280,
            bit_rate: 4000,
            ratio: "16:9".to_string(),
            size: 10,
            title: "clip".to_string(),
            fps: 30,
            created_at: Utc::now(),
        };

        let err = tables.insert_video(&video).expect_err("dangling thumbnail");

        assert!(matches!(
            err,
            StoreError::ConstraintViolation {
                constraint: "foreign key thumbnail_id",
                ..
            }
        ));
    }

    #[test]
    fn tables_round_trip_through_json() {
        let mut tables = Tables::default();
        tables
            .insert_user(&user("usr_1", "a@example.com"))
            .expect("insert");
        tables.insert_profile(&profile("usr_1")).expect("insert");

        let json = serde_json::to_string(&tables).expect("serialize");
        let restored: Tables = serde_json::from_str(&json).expect("deserialize");

        assert!(restored.user(&UserId::new("usr_1").expect("valid")).is_some());
        assert!(
            restored
                .profile_by_user(&UserId::new("usr_1").expect("valid"))
                .is_some()
        );
    }
}
