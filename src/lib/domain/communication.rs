//! Outbound email

pub mod dispatcher;
pub mod mailer;

pub use dispatcher::Dispatcher;
