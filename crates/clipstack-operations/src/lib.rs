mod context;
mod error;
pub mod operations;
pub mod providers;
pub mod traits;

#[cfg(test)]
pub mod mocks;

pub use context::RequestContext;
pub use error::{ErrorKind, MediaError, OperationError, Result, StoreError};
