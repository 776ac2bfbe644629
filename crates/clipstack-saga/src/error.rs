use std::fmt::Debug;

use thiserror::Error;

/// A compensation that failed while unwinding a saga.
#[derive(Debug, Error)]
#[error("compensation failed for step '{step}': {description}")]
pub struct CompensationError<E> {
    /// Step whose compensation failed.
    pub step: String,
    /// What the compensation was trying to undo.
    pub description: String,
    #[source]
    pub error: E,
}

/// Terminal failure of a saga run.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SagaError<E: Debug> {
    /// A step failed and every completed step was compensated.
    #[error("step '{step}' failed")]
    StepFailed {
        step: String,
        #[source]
        source: E,
    },

    /// A step failed and at least one compensation failed as well.
    #[error("step '{failed_step}' failed, and {} compensation(s) also failed", compensation_errors.len())]
    CompensationFailed {
        failed_step: String,
        step_error: E,
        compensation_errors: Vec<CompensationError<E>>,
    },
}

impl<E: Debug> SagaError<E> {
    /// Name of the step whose execution failed.
    #[must_use]
    pub fn failed_step(&self) -> &str {
        match self {
            Self::StepFailed { step, .. } => step,
            Self::CompensationFailed { failed_step, .. } => failed_step,
        }
    }

    /// The error returned by the failed step.
    #[must_use]
    pub fn step_error(&self) -> &E {
        match self {
            Self::StepFailed { source, .. } => source,
            Self::CompensationFailed { step_error, .. } => step_error,
        }
    }

    /// Compensations that failed during unwinding (empty for `StepFailed`).
    #[must_use]
    pub fn compensation_errors(&self) -> &[CompensationError<E>] {
        match self {
            Self::StepFailed { .. } => &[],
            Self::CompensationFailed {
                compensation_errors,
                ..
            } => compensation_errors,
        }
    }

    /// Discard compensation failures and keep the original step error.
    ///
    /// Compensation failures are already logged by the saga when they happen.
    #[must_use]
    pub fn into_step_error(self) -> E {
        match self {
            Self::StepFailed { source, .. } => source,
            Self::CompensationFailed { step_error, .. } => step_error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, Error)]
    #[error("{0}")]
    struct StoreError(&'static str);

    #[test]
    fn into_step_error_returns_original_failure_when_compensation_failed() {
        let err = SagaError::CompensationFailed {
            failed_step: "mark_user_profiled".to_string(),
            step_error: StoreError("no row updated"),
            compensation_errors: vec![CompensationError {
                step: "insert_profile".to_string(),
                description: "delete profile".to_string(),
                error: StoreError("disk full"),
            }],
        };

        assert_eq!(err.failed_step(), "mark_user_profiled");
        assert_eq!(err.compensation_errors().len(), 1);
        assert_eq!(err.into_step_error(), StoreError("no row updated"));
    }

    #[test]
    fn step_failed_has_no_compensation_errors() {
        let err = SagaError::StepFailed {
            step: "insert_profile".to_string(),
            source: StoreError("duplicate user_id"),
        };

        assert!(err.compensation_errors().is_empty());
        assert_eq!(err.step_error(), &StoreError("duplicate user_id"));
        assert_eq!(err.to_string(), "step 'insert_profile' failed");
    }

    #[test]
    fn compensation_failed_message_counts_failures() {
        let err = SagaError::CompensationFailed {
            failed_step: "insert_post".to_string(),
            step_error: StoreError("missing video"),
            compensation_errors: vec![
                CompensationError {
                    step: "insert_video".to_string(),
                    description: "delete video".to_string(),
                    error: StoreError("io"),
                },
                CompensationError {
                    step: "insert_thumbnail".to_string(),
                    description: "delete thumbnail".to_string(),
                    error: StoreError("io"),
                },
            ],
        };

        assert_eq!(
            err.to_string(),
            "step 'insert_post' failed, and 2 compensation(s) also failed"
        );
    }
}
