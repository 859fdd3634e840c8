//! Mailer errors

use lettre::{address::AddressError, transport::smtp};
use thiserror::Error;
use tracing::debug;

/// Mailer errors
#[derive(Debug, Error)]
pub enum MailerError {
    /// No SMTP username or password has been configured
    #[error("SMTP credentials not configured")]
    NotConfigured,

    /// Invalid email address
    #[error("invalid email address: {0}")]
    InvalidEmail(AddressError),

    /// The message could not be assembled
    #[error("could not build message: {0}")]
    BuildError(lettre::error::Error),

    /// The SMTP session failed
    #[error("SMTP error: {0}")]
    SendError(smtp::Error),

    /// Unknown error
    #[error(transparent)]
    UnknownError(anyhow::Error),
}

impl From<anyhow::Error> for MailerError {
    fn from(err: anyhow::Error) -> Self {
        MailerError::UnknownError(err)
    }
}

impl From<AddressError> for MailerError {
    fn from(err: AddressError) -> Self {
        debug!("AddressError -> MailerError");

        MailerError::InvalidEmail(err)
    }
}

impl From<lettre::error::Error> for MailerError {
    fn from(err: lettre::error::Error) -> Self {
        debug!("lettre::error::Error -> MailerError");

        MailerError::BuildError(err)
    }
}

impl From<smtp::Error> for MailerError {
    fn from(err: smtp::Error) -> Self {
        debug!("smtp::Error -> MailerError");

        MailerError::SendError(err)
    }
}
