//! Registration form submission

use serde_json::{Map, Value};

use super::RegistrationError;

/// Field names that carry form plumbing rather than registrant data
pub const RESERVED_FIELDS: [&str; 2] = ["access_key", "subject"];

/// Name used to greet a registrant who did not give one
pub const DEFAULT_NAME: &str = "Participant";

/// The value of a single form field
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldValue {
    /// A single value, e.g. from a text input or a select
    Text(String),

    /// Multiple values, e.g. from a multi-select
    List(Vec<String>),
}

impl FieldValue {
    fn from_json(value: Option<&Value>) -> Self {
        match value {
            None | Some(Value::Null) => Self::Text(String::new()),
            Some(Value::Array(items)) => Self::List(items.iter().map(scalar_text).collect()),
            Some(other) => Self::Text(scalar_text(other)),
        }
    }

    /// Returns the value as it should be displayed, or [`None`] if an empty
    /// list should hide the field altogether.
    pub fn display(&self) -> Option<String> {
        match self {
            Self::Text(text) => Some(text.clone()),
            Self::List(items) if items.is_empty() => None,
            Self::List(items) => Some(items.join(", ")),
        }
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// A labelled form field
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldRecord {
    /// The label shown next to the field on the form
    pub label: Option<String>,

    /// The submitted value
    pub value: FieldValue,
}

impl FieldRecord {
    fn from_json(raw: &Value) -> Self {
        let Some(record) = raw.as_object() else {
            return Self {
                label: None,
                value: FieldValue::Text(String::new()),
            };
        };

        let label = record
            .get("label")
            .and_then(Value::as_str)
            .filter(|label| !label.is_empty())
            .map(str::to_string);

        Self {
            label,
            value: FieldValue::from_json(record.get("value")),
        }
    }

    /// Returns the value if it is a non-empty piece of text
    fn text(&self) -> Option<&str> {
        match &self.value {
            FieldValue::Text(text) if !text.is_empty() => Some(text),
            _ => None,
        }
    }
}

/// A registration form submission, fields kept in the order they were sent
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Submission {
    fields: Vec<(String, FieldRecord)>,
}

impl Submission {
    /// Parses a request body into a submission.
    ///
    /// Bodies that are empty, not JSON, or JSON without content (`null`,
    /// `{}`, `[]`, `""`, `0`, `false`) are rejected with
    /// [`RegistrationError::NoData`]. Other values that are not objects
    /// yield an empty submission, which fails later for lack of an email.
    pub fn from_json(body: &[u8]) -> Result<Self, RegistrationError> {
        let value: Value =
            serde_json::from_slice(body).map_err(|_| RegistrationError::NoData)?;

        if is_blank(&value) {
            return Err(RegistrationError::NoData);
        }

        Ok(match value {
            Value::Object(map) => Self::from_map(&map),
            _ => Self::default(),
        })
    }

    fn from_map(map: &Map<String, Value>) -> Self {
        let fields = map
            .iter()
            .map(|(name, raw)| (name.clone(), FieldRecord::from_json(raw)))
            .collect();

        Self { fields }
    }

    /// Looks up a field by name
    pub fn get(&self, name: &str) -> Option<&FieldRecord> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, record)| record)
    }

    /// Iterates over the fields in submission order
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldRecord)> {
        self.fields
            .iter()
            .map(|(name, record)| (name.as_str(), record))
    }

    /// The registrant's email address, if one was given
    pub fn email(&self) -> Option<&str> {
        self.get("email").and_then(FieldRecord::text)
    }

    /// The registrant's name, or [`DEFAULT_NAME`]
    pub fn name(&self) -> String {
        self.get("name")
            .and_then(|record| record.value.display())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| DEFAULT_NAME.to_string())
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}
