use roster_types::{NewUser, Role, User};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::{
    invalid_role_message, is_valid_email, required_string, type_name, Issues, SerializationError,
    ValidationError,
};

const NAME_MAX_CHARS: usize = 100;
const MIN_AGE: f64 = 18.0;
const MAX_AGE: f64 = 120.0;

/// Validates a create-user body. Unknown fields are ignored and an absent
/// role resolves to `Role::User`.
pub fn validate_create_user(input: &Value) -> Result<NewUser, ValidationError> {
    let Some(obj) = input.as_object() else {
        return Err(ValidationError::single(
            "",
            format!("Expected object, received {}", type_name(input)),
        ));
    };

    let mut issues = Issues::default();
    let name = validate_name(obj, &mut issues);
    let email = validate_email_field(obj, &mut issues);
    let age = validate_age(obj, &mut issues);
    let role = validate_role(obj, &mut issues);

    issues.finish(|| NewUser {
        name: name.unwrap_or_default(),
        email: email.unwrap_or_default(),
        age,
        role: role.unwrap_or_default(),
    })
}

fn validate_name(obj: &Map<String, Value>, issues: &mut Issues) -> Option<String> {
    let name = required_string(obj.get("name"), "name", issues)?;
    let len = name.chars().count();
    if len == 0 {
        issues.push("name", "Name is required");
        return None;
    }
    if len > NAME_MAX_CHARS {
        issues.push("name", "Name too long");
        return None;
    }
    Some(name.to_string())
}

fn validate_email_field(obj: &Map<String, Value>, issues: &mut Issues) -> Option<String> {
    let email = required_string(obj.get("email"), "email", issues)?;
    if !is_valid_email(email) {
        issues.push("email", "Invalid email format");
        return None;
    }
    Some(email.to_string())
}

fn validate_age(obj: &Map<String, Value>, issues: &mut Issues) -> Option<u8> {
    let number = match obj.get("age") {
        None | Some(Value::Null) => return None,
        Some(Value::Number(n)) => n,
        Some(other) => {
            issues.push("age", format!("Expected number, received {}", type_name(other)));
            return None;
        }
    };

    let Some(age) = number.as_f64() else {
        issues.push("age", "Expected number, received nan");
        return None;
    };
    if age.fract() != 0.0 {
        issues.push("age", "Expected integer, received float");
        return None;
    }
    if age < MIN_AGE {
        issues.push("age", "Must be at least 18 years old");
        return None;
    }
    if age > MAX_AGE {
        issues.push("age", "Invalid age");
        return None;
    }
    Some(age as u8)
}

fn validate_role(obj: &Map<String, Value>, issues: &mut Issues) -> Option<Role> {
    match obj.get("role") {
        None | Some(Value::Null) => Some(Role::default()),
        Some(Value::String(raw)) => match Role::parse(raw) {
            Some(role) => Some(role),
            None => {
                issues.push("role", invalid_role_message(raw));
                None
            }
        },
        Some(other) => {
            issues.push("role", format!("Expected string, received {}", type_name(other)));
            None
        }
    }
}

/// Guards a record on its way out of the service. A failure here means a
/// record was built incorrectly, never that a client sent bad input.
pub fn check_user(user: &User) -> Result<(), SerializationError> {
    let mut issues = Issues::default();

    if !is_hyphenated_uuid(&user.id) {
        issues.push("id", "Invalid uuid");
    }
    if !is_valid_email(&user.email) {
        issues.push("email", "Invalid email");
    }
    if user.updated_at < user.created_at {
        issues.push("updatedAt", "Must not precede createdAt");
    }

    let issues = issues.into_vec();
    if issues.is_empty() {
        Ok(())
    } else {
        Err(SerializationError {
            id: user.id.clone(),
            issues,
        })
    }
}

/// Only the 8-4-4-4-12 form; braced, urn and simple forms are rejected.
fn is_hyphenated_uuid(id: &str) -> bool {
    Uuid::parse_str(id)
        .map(|parsed| parsed.hyphenated().to_string().eq_ignore_ascii_case(id))
        .unwrap_or(false)
}
