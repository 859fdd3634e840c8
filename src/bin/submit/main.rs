#![warn(
    missing_debug_implementations,
    rust_2018_idioms,
    missing_docs,
    rustdoc::broken_intra_doc_links,
    rustdoc::missing_crate_level_docs
)]

//! Handles a single registration submission delivered CGI-style

use std::{io, sync::Arc};

use anyhow::Result;
use clap::Parser;
use workshop_mailer::{
    domain::{communication::Dispatcher, registration::RegistrationServiceImpl},
    infrastructure::{
        email::{
            smtp::{SmtpConfig, SmtpMailer},
            NotificationConfig,
        },
        logging::LoggingConfig,
        serverless::{self, Invocation},
    },
};

/// Command-line arguments / environment variables
#[derive(Debug, Parser)]
pub struct Args {
    /// The SMTP relay configuration
    #[clap(flatten)]
    pub smtp: SmtpConfig,

    /// Where submissions are forwarded
    #[clap(flatten)]
    pub notifications: NotificationConfig,

    /// Log verbosity
    #[clap(flatten)]
    pub logging: LoggingConfig,
}

#[mutants::skip]
#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // stdout carries the response
    args.logging.init(io::stderr);

    let mailer = SmtpMailer::new(args.smtp);
    let registrations = RegistrationServiceImpl::new(
        Dispatcher::new(Arc::new(mailer)),
        args.notifications.submissions_email,
    );

    let invocation = Invocation::from_env(io::stdin().lock());
    let response = serverless::invoke(registrations, invocation).await;

    response.write_cgi(io::stdout().lock())?;

    Ok(())
}
