use std::sync::Arc;

use clipstack_operations::operations::{
    FetchPreferencesOperation, NotificationUpdate, PlaybackUpdate, PrivacyUpdate,
    UpdatePreferencesOperation,
};

use super::PreferencesCommand;
use crate::error::Result;
use crate::session::Session;

pub(super) fn run(command: PreferencesCommand, session: &Session) -> Result<()> {
    let update = UpdatePreferencesOperation::new(Arc::clone(&session.store));

    let preferences = match command {
        PreferencesCommand::Show => {
            FetchPreferencesOperation::new(Arc::clone(&session.store)).execute(&session.request)?
        }
        PreferencesCommand::Notification(args) => update.execute(
            &session.request,
            &NotificationUpdate {
                new_comment_notification: args.new_comment,
                new_follow_notification: args.new_follow,
                new_like_notification: args.new_like,
                new_dislike_notification: args.new_dislike,
            },
        )?,
        PreferencesCommand::Playback(args) => update.execute(
            &session.request,
            &PlaybackUpdate {
                auto_play_video: args.auto_play,
                auto_mute_video: args.auto_mute,
                enable_hdr: args.hdr,
            },
        )?,
        PreferencesCommand::Privacy(args) => update.execute(
            &session.request,
            &PrivacyUpdate {
                account_privacy: args.account,
            },
        )?,
    };

    session.output.emit(&preferences)
}
