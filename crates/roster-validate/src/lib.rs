mod email;
mod hello;
mod query;
mod user;

pub use email::is_valid_email;
pub use hello::validate_hello;
pub use query::validate_user_query;
pub use user::{check_user, validate_create_user};

use roster_types::FieldIssue;
use serde_json::Value;
use thiserror::Error;

/// Input rejected at the boundary. Carries every violated field, in the
/// order the fields were checked.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Validation failed: {}", summarize(.issues))]
pub struct ValidationError {
    pub issues: Vec<FieldIssue>,
}

impl ValidationError {
    pub fn single(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            issues: vec![FieldIssue::new(path, message)],
        }
    }
}

/// A stored record that does not satisfy the output contract.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("User {id} violates the output contract: {}", summarize(.issues))]
pub struct SerializationError {
    pub id: String,
    pub issues: Vec<FieldIssue>,
}

fn summarize(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(|issue| {
            if issue.path.is_empty() {
                issue.message.clone()
            } else {
                format!("{} {}", issue.path, issue.message)
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Default)]
pub(crate) struct Issues(Vec<FieldIssue>);

impl Issues {
    pub(crate) fn push(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.0.push(FieldIssue::new(path, message));
    }

    pub(crate) fn finish<T>(self, value: impl FnOnce() -> T) -> Result<T, ValidationError> {
        if self.0.is_empty() {
            Ok(value())
        } else {
            Err(ValidationError { issues: self.0 })
        }
    }

    pub(crate) fn into_vec(self) -> Vec<FieldIssue> {
        self.0
    }
}

pub(crate) fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// A present, string-typed field. Missing and mistyped fields are recorded.
pub(crate) fn required_string<'a>(
    value: Option<&'a Value>,
    path: &str,
    issues: &mut Issues,
) -> Option<&'a str> {
    match value {
        None => {
            issues.push(path, "Required");
            None
        }
        Some(Value::String(s)) => Some(s.as_str()),
        Some(other) => {
            issues.push(path, format!("Expected string, received {}", type_name(other)));
            None
        }
    }
}

pub(crate) fn invalid_role_message(received: &str) -> String {
    let expected = roster_types::Role::ALL
        .iter()
        .map(|role| format!("'{}'", role))
        .collect::<Vec<_>>()
        .join(" | ");
    format!(
        "Invalid enum value. Expected {}, received '{}'",
        expected, received
    )
}
