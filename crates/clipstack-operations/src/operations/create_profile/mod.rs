mod context;
mod operation;
mod saga_data;
mod saga_steps;
mod validator;

pub use operation::{CreateProfileInput, CreateProfileOperation, ProfileCreated};
