//! Registration emails

mod confirmation;
mod submission_details;

pub use confirmation::{render_confirmation, ConfirmationTemplate};
pub use submission_details::{
    display_label, render_admin_notification, DisplayField, SubmissionDetailsTemplate,
};
