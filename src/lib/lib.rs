#![warn(
    missing_debug_implementations,
    rust_2018_idioms,
    missing_docs,
    rustdoc::broken_intra_doc_links,
    rustdoc::missing_crate_level_docs
)]

//! Workshop registration mailer.
//!
//! Turns a registration form submission into a confirmation email for the
//! registrant and, optionally, a copy of the submission for an admin mailbox.

pub mod domain;
pub mod infrastructure;
