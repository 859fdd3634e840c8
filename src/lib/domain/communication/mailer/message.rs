//! Email message

/// A rendered email, ready to hand to a [`Mailer`](super::Mailer)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    /// The recipient of the email
    pub to: String,

    /// The subject of the email
    pub subject: String,

    /// The HTML body of the email
    pub html_body: String,
}

impl Message {
    /// Creates a new message
    pub fn new(to: &str, subject: &str, html_body: &str) -> Self {
        Self {
            to: to.to_string(),
            subject: subject.to_string(),
            html_body: html_body.to_string(),
        }
    }
}
