//! Email delivery

use clap::Parser;

pub mod smtp;

/// Where full submissions are forwarded
#[derive(Clone, Debug, Default, PartialEq, Eq, Parser)]
pub struct NotificationConfig {
    /// Mailbox that receives a copy of every submission
    #[clap(long, env = "EMAIL_SUBMISSIONS")]
    pub submissions_email: Option<String>,
}
