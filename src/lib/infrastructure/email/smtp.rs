//! SMTP email service implementation

use async_trait::async_trait;
use clap::Parser;
use lettre::{
    message::{Mailbox, MultiPart, SinglePart},
    transport::smtp::authentication::Credentials,
    Message as Email, SmtpTransport, Transport,
};
use tracing::debug;

use crate::domain::communication::mailer::{Mailer, MailerError, Message};

/// SMTP configuration
#[derive(Clone, Debug, PartialEq, Eq, Parser)]
pub struct SmtpConfig {
    /// The SMTP host
    #[clap(long = "smtp-server", env = "SMTP_SERVER", default_value = "smtp.gmail.com")]
    pub server: String,

    /// The SMTP port
    #[clap(long = "smtp-port", env = "SMTP_PORT", default_value = "587")]
    pub port: u16,

    /// The SMTP username
    #[clap(long = "smtp-username", env = "SMTP_USERNAME")]
    pub username: Option<String>,

    /// The SMTP password
    #[clap(long = "smtp-password", env = "SMTP_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// The sender email address, defaults to the username
    #[clap(long = "smtp-from-email", env = "SMTP_FROM_EMAIL")]
    pub from_email: Option<String>,

    /// The sender display name
    #[clap(
        long = "smtp-from-name",
        env = "SMTP_FROM_NAME",
        default_value = "Workshop Registration"
    )]
    pub from_name: String,
}

impl SmtpConfig {
    /// Returns the username and password if both are set
    pub fn credentials(&self) -> Option<Credentials> {
        match (self.username.as_deref(), self.password.as_deref()) {
            (Some(username), Some(password)) if !username.is_empty() && !password.is_empty() => {
                Some(Credentials::new(username.to_string(), password.to_string()))
            }
            _ => None,
        }
    }

    /// The address emails are sent from
    pub fn sender_address(&self) -> Option<&str> {
        self.from_email
            .as_deref()
            .filter(|email| !email.is_empty())
            .or(self.username.as_deref())
    }
}

/// SMTP mailer
#[derive(Debug, Clone)]
pub struct SmtpMailer {
    config: SmtpConfig,
}

impl SmtpMailer {
    /// Create a new SMTP mailer
    pub fn new(config: SmtpConfig) -> Self {
        Self { config }
    }

    /// Builds a STARTTLS transport for the configured relay
    pub fn transport(&self) -> Result<SmtpTransport, MailerError> {
        let credentials = self.config.credentials().ok_or(MailerError::NotConfigured)?;

        Ok(SmtpTransport::starttls_relay(&self.config.server)?
            .port(self.config.port)
            .credentials(credentials)
            .build())
    }

    /// Builds a `multipart/alternative` email with a single HTML part
    pub fn build_email(&self, message: &Message) -> Result<Email, MailerError> {
        let address = self
            .config
            .sender_address()
            .ok_or(MailerError::NotConfigured)?;
        let from = Mailbox::new(Some(self.config.from_name.clone()), address.parse()?);

        Ok(Email::builder()
            .from(from)
            .to(message.to.parse()?)
            .subject(message.subject.clone())
            .multipart(
                MultiPart::alternative().singlepart(SinglePart::html(message.html_body.clone())),
            )?)
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    fn is_configured(&self) -> bool {
        self.config.credentials().is_some()
    }

    async fn send_email(&self, message: &Message) -> Result<(), MailerError> {
        let email = self.build_email(message)?;
        let transport = self.transport()?;

        debug!(
            server = %self.config.server,
            port = self.config.port,
            "opening SMTP session"
        );

        tokio::task::spawn_blocking(move || transport.send(&email))
            .await
            .map_err(anyhow::Error::from)??;

        Ok(())
    }
}
