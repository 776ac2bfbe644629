//! Compensating saga engine.
//!
//! A saga is a chain of steps where each step's output feeds the next step's
//! input. When a step fails, every step that already completed is compensated
//! in reverse order with the exact input it originally received, so that
//! multi-table writes without a shared transaction still end either fully
//! applied or fully undone.

mod builder;
mod cloneable;
mod erased;
mod error;
mod journal;
mod saga;
mod step;

pub use builder::SagaBuilder;
pub use error::{CompensationError, SagaError};
pub use journal::{SagaJournal, StepRecord, StepStatus};
pub use saga::Saga;
pub use step::SagaStep;
