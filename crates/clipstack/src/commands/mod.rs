mod post;
mod preferences;
mod profile;
mod user;

use std::path::PathBuf;

use clap::{Args, Subcommand};
use clipstack_core::{Gender, ProfileType};

use crate::error::Result;
use crate::session::Session;

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Manage user accounts
    #[command(subcommand)]
    User(UserCommand),
    /// Create or show the caller's profile
    #[command(subcommand)]
    Profile(ProfileCommand),
    /// Show or change the caller's preferences
    #[command(subcommand)]
    Preferences(PreferencesCommand),
    /// Publish video posts
    #[command(subcommand)]
    Post(PostCommand),
}

#[derive(Subcommand)]
pub(crate) enum UserCommand {
    /// Register a user account
    Add(UserAddArgs),
}

#[derive(Args)]
pub(crate) struct UserAddArgs {
    #[arg(long)]
    pub id: String,
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub email: String,
}

#[derive(Subcommand)]
pub(crate) enum ProfileCommand {
    /// Create the caller's profile and preferences
    Create(ProfileCreateArgs),
    /// Show the caller's profile
    Show,
}

#[derive(Args)]
pub(crate) struct ProfileCreateArgs {
    #[arg(long)]
    pub display_name: String,

    /// Preferred language tag (default: from configuration)
    #[arg(long)]
    pub language: Option<String>,

    #[arg(long, value_enum)]
    pub gender: Gender,

    #[arg(long)]
    pub bio: Option<String>,

    /// Image file to upload as avatar
    #[arg(long)]
    pub avatar: Option<PathBuf>,

    /// Date of birth as YYYY-MM-DD
    #[arg(long)]
    pub birthday: Option<String>,
}

#[derive(Subcommand)]
pub(crate) enum PreferencesCommand {
    /// Show the caller's preferences
    Show,
    /// Change notification switches
    Notification(NotificationArgs),
    /// Change playback settings
    Playback(PlaybackArgs),
    /// Change account privacy
    Privacy(PrivacyArgs),
}

#[derive(Args)]
pub(crate) struct NotificationArgs {
    #[arg(long)]
    pub new_comment: Option<bool>,
    #[arg(long)]
    pub new_follow: Option<bool>,
    #[arg(long)]
    pub new_like: Option<bool>,
    #[arg(long)]
    pub new_dislike: Option<bool>,
}

#[derive(Args)]
pub(crate) struct PlaybackArgs {
    #[arg(long)]
    pub auto_play: Option<bool>,
    #[arg(long)]
    pub auto_mute: Option<bool>,
    #[arg(long)]
    pub hdr: Option<bool>,
}

#[derive(Args)]
pub(crate) struct PrivacyArgs {
    #[arg(long, value_enum)]
    pub account: Option<ProfileType>,
}

#[derive(Subcommand)]
pub(crate) enum PostCommand {
    /// Upload a video with its thumbnail and publish it
    Create(PostCreateArgs),
}

#[derive(Args)]
pub(crate) struct PostCreateArgs {
    #[arg(long)]
    pub thumbnail: PathBuf,
    #[arg(long)]
    pub thumbnail_width: u32,
    #[arg(long)]
    pub thumbnail_height: u32,

    #[arg(long)]
    pub video: PathBuf,
    /// Video length in milliseconds
    #[arg(long)]
    pub duration_ms: u64,
    #[arg(long)]
    pub width: u32,
    #[arg(long)]
    pub height: u32,
    #[arg(long, default_value_t = 30)]
    pub fps: u32,
    #[arg(long, default_value = "h264")]
    pub codec: String,
    /// Container format (default: the video file extension)
    #[arg(long)]
    pub format: Option<String>,
    /// Bits per second (default: derived from file size and duration)
    #[arg(long)]
    pub bit_rate: Option<u64>,
    /// Aspect ratio such as 16:9 (default: reduced width:height)
    #[arg(long)]
    pub ratio: Option<String>,
    /// Video title (default: the video file name)
    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub caption: String,
    /// public, friends, private or unlisted
    #[arg(long, default_value = "public")]
    pub visibility: String,
}

impl Commands {
    pub(crate) fn execute(self, session: &Session) -> Result<()> {
        match self {
            Self::User(UserCommand::Add(args)) => user::add(args, session),
            Self::Profile(ProfileCommand::Create(args)) => profile::create(args, session),
            Self::Profile(ProfileCommand::Show) => profile::show(session),
            Self::Preferences(command) => preferences::run(command, session),
            Self::Post(PostCommand::Create(args)) => post::create(args, session),
        }
    }
}
