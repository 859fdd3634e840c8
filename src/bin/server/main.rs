#![warn(
    missing_debug_implementations,
    rust_2018_idioms,
    missing_docs,
    rustdoc::broken_intra_doc_links,
    rustdoc::missing_crate_level_docs
)]

//! Long-running HTTP server for registration submissions

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use workshop_mailer::{
    domain::{communication::Dispatcher, registration::RegistrationServiceImpl},
    infrastructure::{
        email::{
            smtp::{SmtpConfig, SmtpMailer},
            NotificationConfig,
        },
        http::{HttpServer, HttpServerConfig},
        logging::LoggingConfig,
    },
};

/// Command-line arguments / environment variables
#[derive(Debug, Parser)]
pub struct Args {
    /// The HTTP server configuration
    #[clap(flatten)]
    pub server: HttpServerConfig,

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

    args.logging.init(std::io::stdout);

    let mailer = SmtpMailer::new(args.smtp);
    let registrations = RegistrationServiceImpl::new(
        Dispatcher::new(Arc::new(mailer)),
        args.notifications.submissions_email,
    );

    HttpServer::new(registrations, &args.server)
        .await?
        .run()
        .await
}
