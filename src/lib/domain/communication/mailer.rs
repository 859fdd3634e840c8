//! Mailer module

mod errors;
mod message;

use async_trait::async_trait;

#[cfg(test)]
use mockall::mock;

pub use errors::MailerError;
pub use message::Message;

/// Sends rendered emails
#[async_trait]
pub trait Mailer: Clone + Send + Sync + 'static {
    /// Whether the mailer has the credentials it needs to send anything.
    fn is_configured(&self) -> bool;

    /// Send an email
    ///
    /// # Arguments
    /// * `message` - The [`Message`] to deliver.
    ///
    /// # Returns
    /// A [`Result`] indicating success or failure.
    async fn send_email(&self, message: &Message) -> Result<(), MailerError>;
}

#[cfg(test)]
mock! {
    pub Mailer {}

    impl Clone for Mailer {
        fn clone(&self) -> Self;
    }

    #[async_trait]
    impl Mailer for Mailer {
        fn is_configured(&self) -> bool;
        async fn send_email(&self, message: &Message) -> Result<(), MailerError>;
    }
}
