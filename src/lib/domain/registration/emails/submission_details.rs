//! Admin notification with the full submission

use askama::Template;

use crate::domain::registration::{
    submission::{Submission, RESERVED_FIELDS},
    RenderError,
};

/// A field as shown in the admin notification
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisplayField {
    /// Human-readable label
    pub label: String,

    /// Rendered value
    pub value: String,
}

/// Admin notification listing every submitted field
#[derive(Debug, Template)]
#[template(path = "emails/registration/submission_details.html")]
pub struct SubmissionDetailsTemplate {
    /// The fields to list, in submission order
    pub fields: Vec<DisplayField>,
}

impl SubmissionDetailsTemplate {
    /// Creates a new `SubmissionDetailsTemplate`, skipping reserved fields
    /// and multi-value fields with nothing selected.
    pub fn new(submission: &Submission) -> Self {
        let fields = submission
            .fields()
            .filter(|(name, _)| !RESERVED_FIELDS.contains(name))
            .filter_map(|(name, record)| {
                let value = record.value.display()?;
                let label = record
                    .label
                    .clone()
                    .unwrap_or_else(|| display_label(name));

                Some(DisplayField { label, value })
            })
            .collect();

        Self { fields }
    }

    /// Renders the email with its stylesheet inlined
    pub fn render_inlined(&self) -> Result<String, RenderError> {
        Ok(css_inline::inline(&self.render()?)?)
    }
}

/// Turns a field name such as `phone_number` into `Phone Number`
pub fn display_label(name: &str) -> String {
    name.replace('_', " ")
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();

            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Renders the admin notification for `submission`.
///
/// Labels and values are HTML-escaped.
pub fn render_admin_notification(submission: &Submission) -> Result<String, RenderError> {
    SubmissionDetailsTemplate::new(submission).render_inlined()
}
