use clipstack_core::UserId;

use crate::error::OperationError;

/// Per-request state handed to every operation by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    principal: Option<UserId>,
}

impl RequestContext {
    #[must_use]
    pub fn authenticated(user_id: UserId) -> Self {
        Self {
            principal: Some(user_id),
        }
    }

    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn principal(&self) -> Option<&UserId> {
        self.principal.as_ref()
    }

    /// # Errors
    ///
    /// Returns `OperationError::Unauthenticated` when no principal is present.
    pub fn require_principal(&self) -> Result<&UserId, OperationError> {
        self.principal.as_ref().ok_or(OperationError::Unauthenticated)
    }
}
