use clipstack_core::{User, UserId};
use clipstack_operations::traits::UserStore;
use tracing::info;

use super::UserAddArgs;
use crate::error::{CliError, Result};
use crate::session::Session;

pub(super) fn add(args: UserAddArgs, session: &Session) -> Result<()> {
    let id = UserId::new(args.id).map_err(CliError::InvalidUser)?;
    let user = User::new(id, args.name, args.email);

    session.store.insert_user(&user)?;
    info!(user = %user.id, "registered user");

    session.output.emit(&user)
}
