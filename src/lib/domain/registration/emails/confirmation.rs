//! Registrant confirmation email

use askama::Template;

use crate::domain::registration::RenderError;

/// Confirmation sent to the person who registered
#[derive(Debug, Template)]
#[template(path = "emails/registration/confirmation.html")]
pub struct ConfirmationTemplate<'a> {
    /// Name used in the greeting
    pub name: &'a str,
}

impl<'a> ConfirmationTemplate<'a> {
    /// Creates a new `ConfirmationTemplate`
    pub fn new(name: &'a str) -> Self {
        Self { name }
    }

    /// Renders the email with its stylesheet inlined
    pub fn render_inlined(&self) -> Result<String, RenderError> {
        Ok(css_inline::inline(&self.render()?)?)
    }
}

/// Renders the confirmation email for `name`.
///
/// The name is HTML-escaped.
pub fn render_confirmation(name: &str) -> Result<String, RenderError> {
    ConfirmationTemplate::new(name).render_inlined()
}
