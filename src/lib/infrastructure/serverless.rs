//! Single-invocation handler.
//!
//! Processes exactly one request delivered CGI-style: the method in
//! `REQUEST_METHOD`, the body on stdin (`CONTENT_LENGTH` bytes, or everything
//! when unset) and the response written to stdout.

use std::{
    env,
    io::{self, Read, Write},
};

use anyhow::{Context, Result};
use axum::{
    body::Bytes,
    http::{Method, StatusCode},
};
use tracing::debug;

use crate::{
    domain::registration::RegistrationService,
    infrastructure::http::{
        errors::{server_error, ApiError},
        handlers::submit::{process, SubmitResponse},
    },
};

/// Headers sent with every response
pub const CORS_HEADERS: [(&str, &str); 3] = [
    ("Access-Control-Allow-Origin", "*"),
    ("Access-Control-Allow-Methods", "POST, OPTIONS"),
    ("Access-Control-Allow-Headers", "Content-Type, Accept"),
];

/// One incoming request
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Invocation {
    /// The request method
    pub method: Method,

    /// The raw request body
    pub body: Bytes,
}

impl Invocation {
    /// Reads the request from the CGI environment and `input`.
    #[mutants::skip]
    pub fn from_env(input: impl Read) -> Result<Self> {
        let method = env::var("REQUEST_METHOD").unwrap_or_else(|_| "POST".to_string());
        let content_length = env::var("CONTENT_LENGTH").ok();

        Self::from_parts(&method, content_length.as_deref(), input)
    }

    /// Builds an invocation from a method name, an optional body length and
    /// the body stream.
    pub fn from_parts(
        method: &str,
        content_length: Option<&str>,
        mut input: impl Read,
    ) -> Result<Self> {
        let method = Method::from_bytes(method.trim().as_bytes())
            .with_context(|| format!("invalid request method {method:?}"))?;

        let mut body = Vec::new();

        match content_length.map(str::trim).filter(|length| !length.is_empty()) {
            Some(length) => {
                let length: u64 = length
                    .parse()
                    .with_context(|| format!("invalid content length {length:?}"))?;

                input
                    .take(length)
                    .read_to_end(&mut body)
                    .context("failed to read request body")?;
            }
            None => {
                input
                    .read_to_end(&mut body)
                    .context("failed to read request body")?;
            }
        }

        debug!(%method, length = body.len(), "received invocation");

        Ok(Self {
            method,
            body: body.into(),
        })
    }
}

/// The response to one invocation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InvocationResponse {
    /// The response status
    pub status: StatusCode,

    /// The JSON body, absent for preflight responses
    pub body: Option<SubmitResponse>,
}

impl InvocationResponse {
    /// An empty response to a preflight request
    pub fn preflight() -> Self {
        Self {
            status: StatusCode::OK,
            body: None,
        }
    }

    /// Writes the response in CGI format
    pub fn write_cgi(&self, mut out: impl Write) -> io::Result<()> {
        write!(out, "Status: {}\r\n", self.status)?;

        for (name, value) in CORS_HEADERS {
            write!(out, "{name}: {value}\r\n")?;
        }

        match &self.body {
            Some(body) => {
                let json = serde_json::to_string(body)?;

                write!(out, "Content-Type: application/json\r\n\r\n{json}")?;
            }
            None => write!(out, "\r\n")?,
        }

        out.flush()
    }
}

impl From<ApiError> for InvocationResponse {
    fn from(err: ApiError) -> Self {
        Self {
            status: err.status,
            body: Some(err.body()),
        }
    }
}

/// Handles one invocation.
pub async fn handle<R: RegistrationService>(
    registrations: &R,
    invocation: &Invocation,
) -> InvocationResponse {
    if invocation.method == Method::OPTIONS {
        return InvocationResponse::preflight();
    }

    if invocation.method != Method::POST {
        return ApiError::new(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed").into();
    }

    match process(registrations, &invocation.body).await {
        Ok(body) => InvocationResponse {
            status: StatusCode::OK,
            body: Some(body),
        },
        Err(err) => err.into(),
    }
}

/// Handles one invocation on its own task, reporting a panic as a server
/// error.
pub async fn run<R: RegistrationService>(
    registrations: R,
    invocation: Invocation,
) -> InvocationResponse {
    let task = tokio::spawn(async move { handle(&registrations, &invocation).await });

    match task.await {
        Ok(response) => response,
        Err(err) => server_error(&err).into(),
    }
}

/// Handles a request that may not have been read, reporting a read failure
/// as a server error so a response is always produced.
pub async fn invoke<R: RegistrationService>(
    registrations: R,
    invocation: Result<Invocation>,
) -> InvocationResponse {
    match invocation {
        Ok(invocation) => run(registrations, invocation).await,
        Err(err) => server_error(&err).into(),
    }
}
