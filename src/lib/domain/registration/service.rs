//! Registration service

use async_trait::async_trait;

#[cfg(test)]
use mockall::mock;

use crate::domain::communication::{mailer::Mailer, Dispatcher};

use super::{
    emails::{render_admin_notification, render_confirmation},
    RegistrationError, Submission,
};

/// How a registration was handled
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegistrationOutcome {
    /// The confirmation and, if configured, the admin notification were sent
    Completed,

    /// The confirmation was sent but the admin notification was not
    AdminNotificationFailed,
}

/// Registration service
#[async_trait]
pub trait RegistrationService: Clone + Send + Sync + 'static {
    /// Handles a registration.
    ///
    /// # Arguments
    /// * `submission` - The submitted registration form.
    ///
    /// # Returns
    /// - [`Ok`] with a [`RegistrationOutcome`] once the registrant has been
    ///   sent a confirmation.
    /// - [`Err`] containing a [`RegistrationError`] if the submission has no
    ///   email address, the confirmation could not be sent, or an email could
    ///   not be rendered.
    async fn register(
        &self,
        submission: &Submission,
    ) -> Result<RegistrationOutcome, RegistrationError>;
}

#[cfg(test)]
mock! {
    pub RegistrationService {}

    impl Clone for RegistrationService {
        fn clone(&self) -> Self;
    }

    #[async_trait]
    impl RegistrationService for RegistrationService {
        async fn register(
            &self,
            submission: &Submission,
        ) -> Result<RegistrationOutcome, RegistrationError>;
    }
}

/// Registration service implementation
#[derive(Debug, Clone)]
pub struct RegistrationServiceImpl<M>
where
    M: Mailer,
{
    dispatcher: Dispatcher<M>,
    admin_recipient: Option<String>,
}

impl<M> RegistrationServiceImpl<M>
where
    M: Mailer,
{
    /// Creates a new registration service.
    ///
    /// Submissions are forwarded to `admin_recipient` when it is set and not
    /// empty.
    pub fn new(dispatcher: Dispatcher<M>, admin_recipient: Option<String>) -> Self {
        Self {
            dispatcher,
            admin_recipient: admin_recipient.filter(|recipient| !recipient.is_empty()),
        }
    }

    async fn notify_admin(
        &self,
        submission: &Submission,
        name: &str,
    ) -> Result<bool, RegistrationError> {
        let Some(recipient) = &self.admin_recipient else {
            return Ok(true);
        };

        let html = render_admin_notification(submission)?;

        Ok(self
            .dispatcher
            .send(recipient, &format!("New Workshop Registration - {name}"), &html)
            .await)
    }
}

#[async_trait]
impl<M> RegistrationService for RegistrationServiceImpl<M>
where
    M: Mailer,
{
    async fn register(
        &self,
        submission: &Submission,
    ) -> Result<RegistrationOutcome, RegistrationError> {
        let email = submission.email().ok_or(RegistrationError::MissingEmail)?;
        let name = submission.name();

        let html = render_confirmation(&name)?;
        let confirmation_sent = self
            .dispatcher
            .send(
                email,
                &format!("Workshop Registration Confirmation - {name}"),
                &html,
            )
            .await;

        let admin_notified = self.notify_admin(submission, &name).await?;

        match (confirmation_sent, admin_notified) {
            (true, true) => Ok(RegistrationOutcome::Completed),
            (true, false) => Ok(RegistrationOutcome::AdminNotificationFailed),
            (false, _) => Err(RegistrationError::ConfirmationNotSent),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use anyhow::anyhow;
    use testresult::TestResult;

    use crate::domain::communication::mailer::{tests::MockMailer, MailerError};

    use super::*;

    const ADMIN: &str = "admin@example.com";

    fn submission() -> Submission {
        Submission::from_json(br#"{"email":{"value":"a@b.com"},"name":{"value":"Ann"}}"#)
            .expect("valid submission")
    }

    fn service(mailer: MockMailer, admin: Option<&str>) -> RegistrationServiceImpl<MockMailer> {
        RegistrationServiceImpl::new(
            Dispatcher::new(Arc::new(mailer)),
            admin.map(str::to_string),
        )
    }

    fn failure() -> Result<(), MailerError> {
        Err(MailerError::UnknownError(anyhow!("connection refused")))
    }

    #[tokio::test]
    async fn test_register_sends_confirmation_only() -> TestResult {
        let mut mailer = MockMailer::new();

        mailer.expect_is_configured().return_const(true);
        mailer
            .expect_send_email()
            .withf(|message| {
                message.to == "a@b.com"
                    && message.subject == "Workshop Registration Confirmation - Ann"
                    && message.html_body.contains("Ann")
            })
            .times(1)
            .returning(|_| Ok(()));

        let outcome = service(mailer, None).register(&submission()).await?;

        assert_eq!(outcome, RegistrationOutcome::Completed);

        Ok(())
    }

    #[tokio::test]
    async fn test_register_greets_unnamed_registrant_as_participant() -> TestResult {
        for body in [
            r#"{"email":{"value":"a@b.com"},"name":{"value":""}}"#,
            r#"{"email":{"value":"a@b.com"},"name":{"value":null}}"#,
        ] {
            let mut mailer = MockMailer::new();

            mailer.expect_is_configured().return_const(true);
            mailer
                .expect_send_email()
                .withf(|message| {
                    message.subject == "Workshop Registration Confirmation - Participant"
                        && message.html_body.contains("Participant")
                })
                .times(1)
                .returning(|_| Ok(()));

            let submission = Submission::from_json(body.as_bytes())?;
            let outcome = service(mailer, None).register(&submission).await?;

            assert_eq!(outcome, RegistrationOutcome::Completed, "{body}");
        }

        Ok(())
    }

    #[tokio::test]
    async fn test_register_notifies_admin() -> TestResult {
        let mut mailer = MockMailer::new();

        mailer.expect_is_configured().return_const(true);
        mailer
            .expect_send_email()
            .withf(|message| message.to == "a@b.com")
            .times(1)
            .returning(|_| Ok(()));
        mailer
            .expect_send_email()
            .withf(|message| {
                message.to == ADMIN
                    && message.subject == "New Workshop Registration - Ann"
                    && message.html_body.contains("Submission Details")
            })
            .times(1)
            .returning(|_| Ok(()));

        let outcome = service(mailer, Some(ADMIN)).register(&submission()).await?;

        assert_eq!(outcome, RegistrationOutcome::Completed);

        Ok(())
    }

    #[tokio::test]
    async fn test_empty_admin_recipient_is_ignored() -> TestResult {
        let mut mailer = MockMailer::new();

        mailer.expect_is_configured().return_const(true);
        mailer.expect_send_email().times(1).returning(|_| Ok(()));

        let outcome = service(mailer, Some("")).register(&submission()).await?;

        assert_eq!(outcome, RegistrationOutcome::Completed);

        Ok(())
    }

    #[tokio::test]
    async fn test_admin_failure_is_partial_success() -> TestResult {
        let mut mailer = MockMailer::new();

        mailer.expect_is_configured().return_const(true);
        mailer
            .expect_send_email()
            .withf(|message| message.to == "a@b.com")
            .returning(|_| Ok(()));
        mailer
            .expect_send_email()
            .withf(|message| message.to == ADMIN)
            .returning(|_| failure());

        let outcome = service(mailer, Some(ADMIN)).register(&submission()).await?;

        assert_eq!(outcome, RegistrationOutcome::AdminNotificationFailed);

        Ok(())
    }

    #[tokio::test]
    async fn test_confirmation_failure_dominates() {
        let mut mailer = MockMailer::new();

        mailer.expect_is_configured().return_const(true);
        mailer
            .expect_send_email()
            .withf(|message| message.to == "a@b.com")
            .times(1)
            .returning(|_| failure());
        mailer
            .expect_send_email()
            .withf(|message| message.to == ADMIN)
            .times(1)
            .returning(|_| Ok(()));

        let result = service(mailer, Some(ADMIN)).register(&submission()).await;

        assert!(matches!(result, Err(RegistrationError::ConfirmationNotSent)));
    }

    #[tokio::test]
    async fn test_missing_email_sends_nothing() -> TestResult {
        let mut mailer = MockMailer::new();

        mailer.expect_is_configured().never();
        mailer.expect_send_email().never();

        let submission = Submission::from_json(br#"{"name":{"value":"Ann"}}"#)?;
        let result = service(mailer, Some(ADMIN)).register(&submission).await;

        assert!(matches!(result, Err(RegistrationError::MissingEmail)));

        Ok(())
    }

    #[tokio::test]
    async fn test_unconfigured_mailer_fails_confirmation() {
        let mut mailer = MockMailer::new();

        mailer.expect_is_configured().return_const(false);
        mailer.expect_send_email().never();

        let result = service(mailer, Some(ADMIN)).register(&submission()).await;

        assert!(matches!(result, Err(RegistrationError::ConfirmationNotSent)));
    }
}
