use css_inline::InlineError;
use thiserror::Error;
use tracing::debug;

/// Errors raised while rendering a registration email
#[derive(Debug, Error)]
pub enum RenderError {
    /// The template could not be rendered
    #[error("could not render email template: {0}")]
    Template(askama::Error),

    /// The stylesheet could not be inlined
    #[error("could not inline email styles: {0}")]
    Inline(InlineError),
}

impl From<askama::Error> for RenderError {
    fn from(err: askama::Error) -> Self {
        debug!("askama::Error -> RenderError");

        RenderError::Template(err)
    }
}

impl From<InlineError> for RenderError {
    fn from(err: InlineError) -> Self {
        debug!("InlineError -> RenderError");

        RenderError::Inline(err)
    }
}

/// Errors that can occur when handling a registration
#[derive(Debug, Error)]
pub enum RegistrationError {
    /// The request carried no usable data
    #[error("no data received")]
    NoData,

    /// The submission has no email address to confirm to
    #[error("email is required")]
    MissingEmail,

    /// The confirmation email could not be sent
    #[error("could not send confirmation email")]
    ConfirmationNotSent,

    /// An email could not be rendered
    #[error(transparent)]
    Render(#[from] RenderError),
}
