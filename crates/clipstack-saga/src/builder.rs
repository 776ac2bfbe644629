use std::fmt::Debug;
use std::marker::PhantomData;

use crate::erased::{ErasedStep, StepWrapper};
use crate::saga::Saga;
use crate::step::SagaStep;

/// Builder state before the first step is added.
pub struct Empty;

/// Builder state once at least one step exists; tracks the last output type.
pub struct HasSteps<LastOutput>(PhantomData<LastOutput>);

/// Type-state builder for [`Saga`].
///
/// Each `then` only accepts a step whose `Input` is the previous step's
/// `Output`, so a saga that would hand a step the wrong payload does not
/// compile:
///
/// ```compile_fail
/// use clipstack_saga::{SagaBuilder, SagaStep};
///
/// struct GenerateIds;
/// impl SagaStep for GenerateIds {
///     type Input = String;
///     type Output = (String, String);
///     type Context = ();
///     type Error = ();
///     fn name(&self) -> &'static str { "generate_ids" }
///     fn execute(&self, _: &(), user: String) -> Result<(String, String), ()> {
///         Ok((user.clone(), user))
///     }
/// }
///
/// struct InsertProfile;
/// impl SagaStep for InsertProfile {
///     type Input = String;
///     type Output = String;
///     type Context = ();
///     type Error = ();
///     fn name(&self) -> &'static str { "insert_profile" }
///     fn execute(&self, _: &(), id: String) -> Result<String, ()> { Ok(id) }
/// }
///
/// let saga = SagaBuilder::new()
///     .first_step(GenerateIds)
///     .then(InsertProfile)
///     .build();
/// ```
///
/// `build` only exists after `first_step`, so an empty saga cannot be built:
///
/// ```compile_fail
/// use clipstack_saga::SagaBuilder;
///
/// let saga = SagaBuilder::<(), (), (), ()>::new().build();
/// ```
pub struct SagaBuilder<Input, Output, Ctx, Err, State> {
    steps: Vec<Box<dyn ErasedStep<Ctx, Err>>>,
    _phantom: PhantomData<(Input, Output, State)>,
}

impl<Ctx, Err> SagaBuilder<(), (), Ctx, Err, Empty> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            steps: Vec::new(),
            _phantom: PhantomData,
        }
    }

    /// Add the first step; its input becomes the saga's input.
    #[must_use]
    pub fn first_step<S>(
        self,
        step: S,
    ) -> SagaBuilder<S::Input, S::Output, Ctx, Err, HasSteps<S::Output>>
    where
        S: SagaStep<Context = Ctx, Error = Err> + 'static,
    {
        let mut steps = self.steps;
        steps.push(Box::new(StepWrapper::new(step)));
        SagaBuilder {
            steps,
            _phantom: PhantomData,
        }
    }
}

impl<Ctx, Err> Default for SagaBuilder<(), (), Ctx, Err, Empty> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Input, CurrentOutput, Ctx, Err>
    SagaBuilder<Input, CurrentOutput, Ctx, Err, HasSteps<CurrentOutput>>
{
    /// Append a step consuming the current output.
    #[must_use]
    pub fn then<S>(self, step: S) -> SagaBuilder<Input, S::Output, Ctx, Err, HasSteps<S::Output>>
    where
        S: SagaStep<Input = CurrentOutput, Context = Ctx, Error = Err> + 'static,
    {
        let mut steps = self.steps;
        steps.push(Box::new(StepWrapper::new(step)));
        SagaBuilder {
            steps,
            _phantom: PhantomData,
        }
    }

    /// Number of steps added so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Always `false`: this state is only reachable after `first_step`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    #[must_use]
    pub fn build(self) -> Saga<Input, CurrentOutput, Ctx, Err>
    where
        Input: Clone + Send + 'static,
        CurrentOutput: Send + 'static,
        Err: Debug,
    {
        Saga::from_steps(self.steps)
    }
}
