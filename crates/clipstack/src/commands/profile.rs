use std::sync::Arc;

use clipstack_operations::operations::{
    CreateProfileInput, CreateProfileOperation, FetchProfileOperation,
};

use super::ProfileCreateArgs;
use crate::error::Result;
use crate::session::Session;
use crate::upload;

pub(super) fn create(args: ProfileCreateArgs, session: &Session) -> Result<()> {
    let avatar = args.avatar.as_deref().map(upload::read).transpose()?;
    let input = CreateProfileInput {
        display_name: args.display_name,
        preferred_language: args
            .language
            .unwrap_or_else(|| session.default_language.clone()),
        gender: args.gender.as_str().to_string(),
        biography: args.bio,
        avatar,
        birthday: args.birthday,
    };

    let operation = CreateProfileOperation::new(
        Arc::clone(&session.store),
        Arc::clone(&session.store),
        Arc::clone(&session.store),
        Arc::clone(&session.images),
        session.max_upload_bytes,
    );
    let created = operation.execute(&session.request, input)?;

    session.output.emit(&created)
}

pub(super) fn show(session: &Session) -> Result<()> {
    let operation = FetchProfileOperation::new(Arc::clone(&session.store));
    let profile = operation.execute(&session.request)?;
    session.output.emit(&profile)
}
