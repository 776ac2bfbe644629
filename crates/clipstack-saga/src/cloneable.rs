use std::any::Any;

/// Type-erased step payload that can still be cloned.
///
/// Every payload is cloned before it is handed to a step so the clone can be
/// replayed into `compensate` later.
pub(crate) trait CloneableAny: Any + Send {
    fn clone_box(&self) -> Box<dyn CloneableAny>;

    fn into_any(self: Box<Self>) -> Box<dyn Any + Send>;
}

impl<T> CloneableAny for T
where
    T: Clone + Send + 'static,
{
    fn clone_box(&self) -> Box<dyn CloneableAny> {
        Box::new(self.clone())
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any + Send> {
        self
    }
}
