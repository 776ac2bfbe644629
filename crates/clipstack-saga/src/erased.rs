use crate::cloneable::CloneableAny;
use crate::step::SagaStep;

/// Object-safe view of a `SagaStep` so steps with different payload types
/// can live in one `Vec`.
pub(crate) trait ErasedStep<Ctx, Err> {
    fn name(&self) -> &'static str;

    fn execute_erased(
        &self,
        ctx: &Ctx,
        input: Box<dyn CloneableAny>,
    ) -> Result<Box<dyn CloneableAny>, Err>;

    fn compensate_erased(&self, ctx: &Ctx, input: Box<dyn CloneableAny>) -> Result<(), Err>;

    fn compensation_description(&self) -> String;
}

pub(crate) struct StepWrapper<S> {
    step: S,
}

impl<S> StepWrapper<S> {
    pub(crate) fn new(step: S) -> Self {
        Self { step }
    }
}

impl<S> ErasedStep<S::Context, S::Error> for StepWrapper<S>
where
    S: SagaStep,
{
    fn name(&self) -> &'static str {
        self.step.name()
    }

    fn execute_erased(
        &self,
        ctx: &S::Context,
        input: Box<dyn CloneableAny>,
    ) -> Result<Box<dyn CloneableAny>, S::Error> {
        let typed = input
            .into_any()
            .downcast::<S::Input>()
            .expect("builder links each step's input to the previous output");
        let output = self.step.execute(ctx, *typed)?;
        Ok(Box::new(output))
    }

    fn compensate_erased(
        &self,
        ctx: &S::Context,
        input: Box<dyn CloneableAny>,
    ) -> Result<(), S::Error> {
        let typed = input
            .into_any()
            .downcast::<S::Input>()
            .expect("compensation replays the input the step was executed with");
        self.step.compensate(ctx, *typed)
    }

    fn compensation_description(&self) -> String {
        self.step.compensation_description()
    }
}
