use std::fmt::Write as _;

use clipstack_core::{Post, User, UserPreferences, UserProfile};
use clipstack_operations::operations::ProfileCreated;

use super::PlainText;

fn on_off(flag: bool) -> &'static str {
    if flag { "on" } else { "off" }
}

impl PlainText for User {
    fn plain_text(&self) -> String {
        format!("Created user {} <{}> ({})", self.name, self.email, self.id)
    }
}

impl PlainText for ProfileCreated {
    fn plain_text(&self) -> String {
        let mut output = format!(
            "Created profile {}\nPreferences: {}",
            self.profile_id, self.preference_id
        );
        if let Some(url) = &self.avatar_url {
            let _ = write!(output, "\nAvatar: {url}");
        }
        output
    }
}

impl PlainText for UserProfile {
    fn plain_text(&self) -> String {
        let mut output = format!("{} ({})\n", self.display_name, self.user_id);
        let _ = writeln!(output, "  profile:   {}", self.profile_id);
        let _ = writeln!(output, "  gender:    {}", self.gender);
        let _ = writeln!(output, "  type:      {}", self.profile_type);
        if let Some(birthday) = &self.birthday {
            let _ = writeln!(output, "  birthday:  {birthday}");
        }
        if let Some(bio) = &self.biography {
            let _ = writeln!(output, "  bio:       {bio}");
        }
        if let Some(avatar) = &self.avatar_url {
            let _ = writeln!(output, "  avatar:    {avatar}");
        }
        let _ = write!(
            output,
            "  followers: {}  following: {}  posts: {}",
            self.follower_count, self.following_count, self.posts_count
        );
        output
    }
}

impl PlainText for UserPreferences {
    fn plain_text(&self) -> String {
        let rows = [
            ("language", self.preferred_language.clone()),
            ("account privacy", self.account_privacy.to_string()),
            ("auto play", on_off(self.auto_play_video).to_string()),
            ("auto mute", on_off(self.auto_mute_video).to_string()),
            ("hdr", on_off(self.enable_hdr).to_string()),
            ("activity status", on_off(self.show_activity_status).to_string()),
            ("comments", on_off(self.allow_comments).to_string()),
            ("comment alerts", on_off(self.new_comment_notification).to_string()),
            ("follow alerts", on_off(self.new_follow_notification).to_string()),
            ("like alerts", on_off(self.new_like_notification).to_string()),
            ("dislike alerts", on_off(self.new_dislike_notification).to_string()),
        ];

        let mut output = format!("Preferences of {}", self.user_id);
        for (label, value) in rows {
            let _ = write!(output, "\n  {label:<16} {value}");
        }
        output
    }
}

impl PlainText for Post {
    fn plain_text(&self) -> String {
        format!(
            "Published post {}\n  video:      {}\n  visibility: {}\n  caption:    {}",
            self.post_id, self.video_id, self.visibility, self.caption
        )
    }
}
