//! OpenAPI module

use utoipa::OpenApi;

use crate::infrastructure::http::handlers::{health, submit};

#[derive(Debug, OpenApi)]
#[openapi(
    info(title = "Workshop Registration"),
    paths(submit::handler, health::handler),
    components(schemas(submit::SubmitResponse, health::HealthResponse))
)]
pub struct ApiDocs;
