//! Adapters to the outside world

pub mod email;
pub mod http;
pub mod logging;
pub mod serverless;
