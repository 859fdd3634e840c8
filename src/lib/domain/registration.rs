//! Workshop registration

pub mod emails;
mod errors;
mod service;
pub mod submission;

pub use errors::{RegistrationError, RenderError};
pub use service::{RegistrationOutcome, RegistrationService, RegistrationServiceImpl};
pub use submission::{FieldRecord, FieldValue, Submission};
