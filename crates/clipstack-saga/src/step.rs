/// A unit of work inside a saga that knows how to undo itself.
///
/// `execute` turns the step's input into the output handed to the next step.
/// If a later step fails, `compensate` is called with a clone of the input
/// this step received, so everything needed to undo the write (generated ids,
/// snapshots of previous values) must already be present in that input.
pub trait SagaStep: Send + Sync {
    /// Data received from the previous step or the saga entry point.
    type Input: Clone + Send + 'static;

    /// Data handed to the next step.
    type Output: Clone + Send + 'static;

    /// Shared collaborators (stores, clients). Never passed between steps.
    type Context;

    /// Error produced by both execution and compensation.
    type Error;

    /// Stable step name used in logs, journals and errors.
    fn name(&self) -> &'static str;

    /// Perform the step.
    ///
    /// # Errors
    ///
    /// Returns an error if the step cannot complete. The saga then compensates
    /// all previously completed steps; this step itself is not compensated.
    fn execute(&self, ctx: &Self::Context, input: Self::Input)
    -> Result<Self::Output, Self::Error>;

    /// Undo the effects of a successful `execute`.
    ///
    /// Read-only steps can rely on the default no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the undo fails. The saga keeps compensating the
    /// remaining steps and reports the failure alongside the original error.
    fn compensate(&self, ctx: &Self::Context, input: Self::Input) -> Result<(), Self::Error> {
        let _ = (ctx, input);
        Ok(())
    }

    /// What compensation does, in words, for journals and error reports.
    fn compensation_description(&self) -> String {
        format!("undo {}", self.name())
    }
}
