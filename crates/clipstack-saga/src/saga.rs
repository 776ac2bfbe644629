use std::fmt::Debug;
use std::marker::PhantomData;

use tracing::{debug, warn};

use crate::cloneable::CloneableAny;
use crate::erased::ErasedStep;
use crate::error::{CompensationError, SagaError};
use crate::journal::SagaJournal;

/// A step the saga may have to undo: position in `steps`, journal slot,
/// and the input the step was executed with.
struct Completed {
    step: usize,
    record: usize,
    input: Box<dyn CloneableAny>,
}

/// A built saga, reusable across runs.
///
/// Steps run in order; each output is the next input. On the first failure,
/// completed steps are compensated last-in first-out.
pub struct Saga<Input, Output, Ctx, Err> {
    steps: Vec<Box<dyn ErasedStep<Ctx, Err>>>,
    _phantom: PhantomData<(Input, Output)>,
}

impl<Input, Output, Ctx, Err> Saga<Input, Output, Ctx, Err>
where
    Input: Clone + Send + 'static,
    Output: Send + 'static,
    Err: Debug,
{
    pub(crate) fn from_steps(steps: Vec<Box<dyn ErasedStep<Ctx, Err>>>) -> Self {
        Self {
            steps,
            _phantom: PhantomData,
        }
    }

    /// Names of the steps in execution order.
    #[must_use]
    pub fn step_names(&self) -> Vec<&'static str> {
        self.steps.iter().map(|step| step.name()).collect()
    }

    /// Run the saga.
    ///
    /// # Errors
    ///
    /// Returns `SagaError::StepFailed` when a step fails and every compensation
    /// succeeds, `SagaError::CompensationFailed` when some compensation fails too.
    pub fn execute(&self, ctx: &Ctx, input: Input) -> Result<Output, SagaError<Err>> {
        self.run(ctx, input).0
    }

    /// Run the saga and also return the journal of what happened.
    pub fn execute_with_journal(
        &self,
        ctx: &Ctx,
        input: Input,
    ) -> (Result<Output, SagaError<Err>>, SagaJournal) {
        self.run(ctx, input)
    }

    fn run(&self, ctx: &Ctx, input: Input) -> (Result<Output, SagaError<Err>>, SagaJournal) {
        let mut journal = SagaJournal::new();
        let mut completed: Vec<Completed> = Vec::with_capacity(self.steps.len());
        let mut payload: Box<dyn CloneableAny> = Box::new(input);

        for (index, step) in self.steps.iter().enumerate() {
            let record = journal.begin(step.name());
            let replay = payload.clone_box();
            debug!(step = step.name(), "executing saga step");

            match step.execute_erased(ctx, payload) {
                Ok(output) => {
                    journal.executed(record, step.compensation_description());
                    completed.push(Completed {
                        step: index,
                        record,
                        input: replay,
                    });
                    payload = output;
                }
                Err(error) => {
                    journal.failed(record);
                    debug!(
                        step = step.name(),
                        completed = completed.len(),
                        error = ?error,
                        "saga step failed, unwinding completed steps"
                    );
                    let err = self.unwind(ctx, &mut journal, completed, step.name(), error);
                    return (Err(err), journal);
                }
            }
        }

        let output = payload
            .into_any()
            .downcast::<Output>()
            .expect("builder fixes the last step's output as the saga output");
        (Ok(*output), journal)
    }

    fn unwind(
        &self,
        ctx: &Ctx,
        journal: &mut SagaJournal,
        mut completed: Vec<Completed>,
        failed_step: &str,
        step_error: Err,
    ) -> SagaError<Err> {
        let mut compensation_errors = Vec::new();

        while let Some(Completed {
            step,
            record,
            input,
        }) = completed.pop()
        {
            let step = &self.steps[step];
            let description = step.compensation_description();

            match step.compensate_erased(ctx, input) {
                Ok(()) => {
                    journal.compensated(record);
                    debug!(step = step.name(), "compensated saga step");
                }
                Err(error) => {
                    journal.compensation_failed(record);
                    warn!(
                        step = step.name(),
                        compensation = %description,
                        error = ?error,
                        "saga compensation failed"
                    );
                    compensation_errors.push(CompensationError {
                        step: step.name().to_string(),
                        description,
                        error,
                    });
                }
            }
        }

        if compensation_errors.is_empty() {
            SagaError::StepFailed {
                step: failed_step.to_string(),
                source: step_error,
            }
        } else {
            SagaError::CompensationFailed {
                failed_step: failed_step.to_string(),
                step_error,
                compensation_errors,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::builder::SagaBuilder;
    use crate::journal::StepStatus;
    use crate::step::SagaStep;

    #[derive(Default)]
    struct Tables {
        rows: RefCell<Vec<&'static str>>,
        undo_log: RefCell<Vec<String>>,
    }

    #[derive(Debug, PartialEq, thiserror::Error)]
    #[error("{0}")]
    struct WriteError(&'static str);

    /// Inserts a row named after its table; the payload counts writes so far.
    struct InsertRow {
        table: &'static str,
    }

    impl SagaStep for InsertRow {
        type Input = u32;
        type Output = u32;
        type Context = Tables;
        type Error = WriteError;

        fn name(&self) -> &'static str {
            self.table
        }

        fn execute(&self, ctx: &Tables, writes: u32) -> Result<u32, WriteError> {
            ctx.rows.borrow_mut().push(self.table);
            Ok(writes + 1)
        }

        fn compensate(&self, ctx: &Tables, writes: u32) -> Result<(), WriteError> {
            ctx.rows.borrow_mut().retain(|row| *row != self.table);
            ctx.undo_log
                .borrow_mut()
                .push(format!("delete {} (writes before: {writes})", self.table));
            Ok(())
        }
    }

    struct RejectWrite {
        reason: &'static str,
    }

    impl SagaStep for RejectWrite {
        type Input = u32;
        type Output = u32;
        type Context = Tables;
        type Error = WriteError;

        fn name(&self) -> &'static str {
            "reject"
        }

        fn execute(&self, _ctx: &Tables, _writes: u32) -> Result<u32, WriteError> {
            Err(WriteError(self.reason))
        }
    }

    struct StickyRow;

    impl SagaStep for StickyRow {
        type Input = u32;
        type Output = u32;
        type Context = Tables;
        type Error = WriteError;

        fn name(&self) -> &'static str {
            "sticky"
        }

        fn execute(&self, ctx: &Tables, writes: u32) -> Result<u32, WriteError> {
            ctx.rows.borrow_mut().push("sticky");
            Ok(writes + 1)
        }

        fn compensate(&self, _ctx: &Tables, _writes: u32) -> Result<(), WriteError> {
            Err(WriteError("row locked"))
        }
    }

    #[test]
    fn all_steps_succeed_and_output_flows_through() -> anyhow::Result<()> {
        let ctx = Tables::default();
        let saga = SagaBuilder::new()
            .first_step(InsertRow { table: "profiles" })
            .then(InsertRow {
                table: "preferences",
            })
            .build();

        let writes = saga.execute(&ctx, 0)?;

        assert_eq!(writes, 2);
        assert_eq!(*ctx.rows.borrow(), vec!["profiles", "preferences"]);
        assert!(ctx.undo_log.borrow().is_empty());
        Ok(())
    }

    #[test]
    fn failure_unwinds_in_reverse_with_original_inputs() {
        let ctx = Tables::default();
        let saga = SagaBuilder::new()
            .first_step(InsertRow { table: "profiles" })
            .then(InsertRow {
                table: "preferences",
            })
            .then(RejectWrite {
                reason: "user row missing",
            })
            .build();

        let err = saga.execute(&ctx, 0).expect_err("reject step fails");

        assert_eq!(err.failed_step(), "reject");
        assert!(ctx.rows.borrow().is_empty());
        assert_eq!(
            *ctx.undo_log.borrow(),
            vec![
                "delete preferences (writes before: 1)".to_string(),
                "delete profiles (writes before: 0)".to_string(),
            ]
        );
    }

    #[test]
    fn failing_first_step_compensates_nothing() {
        let ctx = Tables::default();
        let saga = SagaBuilder::new()
            .first_step(RejectWrite {
                reason: "constraint violation",
            })
            .build();

        let err = saga.execute(&ctx, 0).expect_err("reject step fails");

        assert!(matches!(
            err,
            SagaError::StepFailed { ref step, ref source }
                if step == "reject" && *source == WriteError("constraint violation")
        ));
        assert!(ctx.undo_log.borrow().is_empty());
    }

    #[test]
    fn compensation_failure_does_not_stop_unwinding() {
        let ctx = Tables::default();
        let saga = SagaBuilder::new()
            .first_step(InsertRow { table: "profiles" })
            .then(StickyRow)
            .then(RejectWrite { reason: "boom" })
            .build();

        let (result, journal) = saga.execute_with_journal(&ctx, 0);
        let err = result.expect_err("reject step fails");

        assert_eq!(err.compensation_errors().len(), 1);
        assert_eq!(err.compensation_errors()[0].step, "sticky");
        assert_eq!(*ctx.rows.borrow(), vec!["sticky"]);
        assert_eq!(journal.records()[0].status, StepStatus::Compensated);
        assert_eq!(journal.records()[1].status, StepStatus::CompensationFailed);
        assert_eq!(journal.records()[2].status, StepStatus::Failed);
        assert_eq!(err.into_step_error(), WriteError("boom"));
    }

    #[test]
    fn journal_of_successful_run_is_committed() {
        let ctx = Tables::default();
        let saga = SagaBuilder::new()
            .first_step(InsertRow { table: "profiles" })
            .then(InsertRow { table: "users" })
            .build();

        let (result, journal) = saga.execute_with_journal(&ctx, 0);

        assert!(result.is_ok());
        assert!(journal.is_committed());
        assert_eq!(journal.completed_steps(), vec!["profiles", "users"]);
        assert_eq!(saga.step_names(), vec!["profiles", "users"]);
    }
}
