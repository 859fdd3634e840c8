//! Registration form submission handler

use axum::{body::Bytes, extract::State, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    domain::registration::{RegistrationOutcome, RegistrationService, Submission},
    infrastructure::http::{errors::ApiError, state::AppState},
};

/// Result of a submission, sent for both successes and failures
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SubmitResponse {
    /// Whether the registrant was sent a confirmation
    pub success: bool,

    /// Human-readable outcome
    #[schema(example = "Form submitted successfully and confirmation email sent")]
    pub message: String,
}

impl SubmitResponse {
    /// A successful submission
    pub fn success(message: &str) -> Self {
        Self {
            success: true,
            message: message.to_string(),
        }
    }

    /// A failed submission
    pub fn failure(message: &str) -> Self {
        Self {
            success: false,
            message: message.to_string(),
        }
    }
}

impl From<RegistrationOutcome> for SubmitResponse {
    fn from(outcome: RegistrationOutcome) -> Self {
        match outcome {
            RegistrationOutcome::Completed => {
                Self::success("Form submitted successfully and confirmation email sent")
            }
            RegistrationOutcome::AdminNotificationFailed => Self::success(
                "Form submitted and confirmation email sent, but admin notification failed",
            ),
        }
    }
}

/// Parses a raw request body and registers it.
///
/// Shared by every deployment target so they answer identically.
pub async fn process<R: RegistrationService>(
    registrations: &R,
    body: &[u8],
) -> Result<SubmitResponse, ApiError> {
    let submission = Submission::from_json(body)?;
    let outcome = registrations.register(&submission).await?;

    Ok(outcome.into())
}

/// Submit a workshop registration
#[utoipa::path(
    post,
    operation_id = "submit",
    tag = "Registration",
    path = "/submit",
    responses(
        (status = StatusCode::OK, description = "Confirmation sent", body = SubmitResponse),
        (status = StatusCode::BAD_REQUEST, description = "No data or no email", body = SubmitResponse, example = json!({"success": false, "message": "Email is required"})),
        (status = StatusCode::INTERNAL_SERVER_ERROR, description = "Confirmation could not be sent", body = SubmitResponse, example = json!({"success": false, "message": "Form received but failed to send confirmation email"})),
    )
)]
pub async fn handler<R: RegistrationService>(
    State(state): State<AppState<R>>,
    body: Bytes,
) -> Result<Json<SubmitResponse>, ApiError> {
    Ok(Json(process(state.registrations.as_ref(), &body).await?))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use anyhow::anyhow;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::json;
    use testresult::TestResult;

    use crate::{
        domain::{
            communication::{
                mailer::{tests::MockMailer, MailerError},
                Dispatcher,
            },
            registration::{
                tests::MockRegistrationService, RegistrationError, RegistrationOutcome,
                RegistrationServiceImpl, RenderError,
            },
        },
        infrastructure::http::{
            handlers::submit::SubmitResponse,
            router,
            state::{test_state, AppState},
        },
    };

    const ADMIN: &str = "admin@example.com";

    fn live_server(mailer: MockMailer, admin: Option<&str>) -> TestResult<TestServer> {
        let registrations = RegistrationServiceImpl::new(
            Dispatcher::new(Arc::new(mailer)),
            admin.map(str::to_string),
        );

        Ok(TestServer::new(router(AppState::new(Arc::new(registrations))))?)
    }

    fn registration() -> serde_json::Value {
        json!({"email": {"value": "a@b.com"}, "name": {"value": "Ann"}})
    }

    #[tokio::test]
    async fn test_submit_success() -> TestResult {
        let mut registrations = MockRegistrationService::new();

        registrations
            .expect_register()
            .withf(|submission| submission.email() == Some("a@b.com"))
            .times(1)
            .returning(|_| Ok(RegistrationOutcome::Completed));

        let response = TestServer::new(router(test_state(Some(registrations))))?
            .post("/submit")
            .json(&registration())
            .await;

        response.assert_status_ok();
        assert_eq!(
            response.headers()["access-control-allow-origin"],
            "*",
            "JSON responses should be readable cross-origin"
        );
        assert_eq!(
            response.json::<SubmitResponse>(),
            SubmitResponse::success("Form submitted successfully and confirmation email sent")
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_submit_admin_notification_failed() -> TestResult {
        let mut registrations = MockRegistrationService::new();

        registrations
            .expect_register()
            .returning(|_| Ok(RegistrationOutcome::AdminNotificationFailed));

        let response = TestServer::new(router(test_state(Some(registrations))))?
            .post("/submit")
            .json(&registration())
            .await;

        response.assert_status_ok();
        assert_eq!(
            response.json::<SubmitResponse>(),
            SubmitResponse::success(
                "Form submitted and confirmation email sent, but admin notification failed"
            )
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_submit_unexpected_fault() -> TestResult {
        let mut registrations = MockRegistrationService::new();

        registrations
            .expect_register()
            .returning(|_| {
                Err(RegistrationError::Render(RenderError::Template(
                    askama::Error::Fmt(std::fmt::Error),
                )))
            });

        let response = TestServer::new(router(test_state(Some(registrations))))?
            .post("/submit")
            .json(&registration())
            .await;

        assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = response.json::<SubmitResponse>();

        assert!(!json.success);
        assert!(json
            .message
            .starts_with("Server error: could not render email template"));

        Ok(())
    }

    #[tokio::test]
    async fn test_submit_without_body() -> TestResult {
        let mut registrations = MockRegistrationService::new();

        registrations.expect_register().never();

        let server = TestServer::new(router(test_state(Some(registrations))))?;

        for response in [
            server.post("/submit").await,
            server.post("/submit").text("not json").await,
            server.post("/submit").json(&json!({})).await,
        ] {
            assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
            assert_eq!(
                response.json::<SubmitResponse>(),
                SubmitResponse::failure("No data received")
            );
        }

        Ok(())
    }

    #[tokio::test]
    async fn test_submit_without_email_sends_nothing() -> TestResult {
        let mut mailer = MockMailer::new();

        mailer.expect_is_configured().never();
        mailer.expect_send_email().never();

        let response = live_server(mailer, Some(ADMIN))?
            .post("/submit")
            .json(&json!({"name": {"value": "Ann"}, "email": {"value": ""}}))
            .await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.json::<SubmitResponse>(),
            SubmitResponse::failure("Email is required")
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_submit_end_to_end_without_admin() -> TestResult {
        let mut mailer = MockMailer::new();

        mailer.expect_is_configured().return_const(true);
        mailer.expect_send_email().times(1).returning(|_| Ok(()));

        let response = live_server(mailer, None)?
            .post("/submit")
            .json(&registration())
            .await;

        response.assert_status_ok();
        assert_eq!(
            response.json::<SubmitResponse>(),
            SubmitResponse::success("Form submitted successfully and confirmation email sent")
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_submit_end_to_end_with_admin() -> TestResult {
        let mut mailer = MockMailer::new();

        mailer.expect_is_configured().return_const(true);
        mailer.expect_send_email().times(2).returning(|_| Ok(()));

        let response = live_server(mailer, Some(ADMIN))?
            .post("/submit")
            .json(&registration())
            .await;

        response.assert_status_ok();
        assert_eq!(
            response.json::<SubmitResponse>(),
            SubmitResponse::success("Form submitted successfully and confirmation email sent")
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_submit_confirmation_failure_dominates() -> TestResult {
        let mut mailer = MockMailer::new();

        mailer.expect_is_configured().return_const(true);
        mailer
            .expect_send_email()
            .withf(|message| message.to == "a@b.com")
            .times(1)
            .returning(|_| Err(MailerError::UnknownError(anyhow!("mailbox unavailable"))));
        mailer
            .expect_send_email()
            .withf(|message| message.to == ADMIN)
            .times(1)
            .returning(|_| Ok(()));

        let response = live_server(mailer, Some(ADMIN))?
            .post("/submit")
            .json(&registration())
            .await;

        assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.json::<SubmitResponse>(),
            SubmitResponse::failure("Form received but failed to send confirmation email")
        );

        Ok(())
    }
}
