use roster_types::HelloParams;
use serde_json::Value;

use crate::{required_string, type_name, Issues, ValidationError};

pub fn validate_hello(input: &Value) -> Result<HelloParams, ValidationError> {
    let Some(obj) = input.as_object() else {
        return Err(ValidationError::single(
            "",
            format!("Expected object, received {}", type_name(input)),
        ));
    };

    let mut issues = Issues::default();
    let x = required_string(obj.get("x"), "x", &mut issues).map(str::to_string);

    let y = match obj.get("y") {
        None => {
            issues.push("y", "Required");
            None
        }
        Some(Value::Array(items)) => {
            let mut numbers = Vec::with_capacity(items.len());
            for (i, item) in items.iter().enumerate() {
                match item {
                    Value::Number(n) => numbers.push(n.clone()),
                    other => issues.push(
                        format!("y.{}", i),
                        format!("Expected number, received {}", type_name(other)),
                    ),
                }
            }
            Some(numbers)
        }
        Some(other) => {
            issues.push("y", format!("Expected array, received {}", type_name(other)));
            None
        }
    };

    issues.finish(|| HelloParams {
        x: x.unwrap_or_default(),
        y: y.unwrap_or_default(),
    })
}
