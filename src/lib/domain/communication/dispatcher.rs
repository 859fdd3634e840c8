//! Best-effort email dispatch

use std::{fmt, sync::Arc};

use tracing::{error, info, warn};

use super::mailer::{Mailer, Message};

/// Sends emails through a [`Mailer`], reporting the outcome as a `bool`.
///
/// Failures are logged here and never propagated; callers decide what a
/// failed send means for them.
#[derive(Clone)]
pub struct Dispatcher<M: Mailer> {
    mailer: Arc<M>,
}

impl<M: Mailer> Dispatcher<M> {
    /// Creates a new dispatcher
    pub fn new(mailer: Arc<M>) -> Self {
        Self { mailer }
    }

    /// Sends a single HTML email.
    ///
    /// Returns `false` without touching the mailer when it has no
    /// credentials, and `false` when delivery fails for any reason.
    pub async fn send(&self, to: &str, subject: &str, html: &str) -> bool {
        if !self.mailer.is_configured() {
            warn!("SMTP credentials not configured");

            return false;
        }

        match self.mailer.send_email(&Message::new(to, subject, html)).await {
            Ok(()) => {
                info!(to, "email sent successfully");

                true
            }
            Err(err) => {
                error!(to, error = %err, "failed to send email");

                false
            }
        }
    }
}

impl<M: Mailer> fmt::Debug for Dispatcher<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("mailer", &"Mailer")
            .finish()
    }
}
