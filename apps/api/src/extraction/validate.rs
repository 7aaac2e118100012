//! Response Validator / Coercer — parses completion output as JSON, checks it
//! against the entity schema, and normalizes the result shape.
//!
//! Multi-instance kinds always come out as a JSON array: a bare object is
//! wrapped into a one-element array, an array passes through unchanged in
//! element count and order, anything else is a schema mismatch. The
//! single-instance kind (personal info) is returned as a bare object and is
//! never wrapped. Extra fields the model volunteers pass through untouched.

use serde_json::Value;
use thiserror::Error;

use crate::schema::{EntitySchema, FieldSpec, FieldType};

#[derive(Debug, Error)]
pub enum ResponseError {
    #[error("response is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("response does not match the schema: {0}")]
    SchemaMismatch(String),
}

/// Validates raw completion output against `schema` and returns the
/// normalized value (array for multi-instance kinds, object otherwise).
pub fn validate_response(schema: &EntitySchema, raw: &str) -> Result<Value, ResponseError> {
    let value: Value = serde_json::from_str(strip_json_fences(raw))?;

    if schema.multi_instance {
        match value {
            Value::Array(items) => {
                for (index, item) in items.iter().enumerate() {
                    check_object(schema.fields, item, &format!("[{index}]"))?;
                }
                Ok(Value::Array(items))
            }
            Value::Object(_) => {
                check_object(schema.fields, &value, "")?;
                Ok(Value::Array(vec![value]))
            }
            other => Err(ResponseError::SchemaMismatch(format!(
                "expected a JSON array or object, got {}",
                json_type_name(&other)
            ))),
        }
    } else {
        match value {
            Value::Object(_) => {
                check_object(schema.fields, &value, "")?;
                Ok(value)
            }
            other => Err(ResponseError::SchemaMismatch(format!(
                "expected a JSON object, got {}",
                json_type_name(&other)
            ))),
        }
    }
}

fn check_object(fields: &[FieldSpec], value: &Value, path: &str) -> Result<(), ResponseError> {
    let object = value.as_object().ok_or_else(|| {
        mismatch(path, &format!("expected an object, got {}", json_type_name(value)))
    })?;

    for field in fields {
        let field_path = join_path(path, field.name);
        match object.get(field.name) {
            None | Some(Value::Null) => {
                if field.required {
                    return Err(mismatch(&field_path, "required field is missing"));
                }
            }
            Some(present) => check_field(field, present, &field_path)?,
        }
    }
    Ok(())
}

fn check_field(field: &FieldSpec, value: &Value, path: &str) -> Result<(), ResponseError> {
    match &field.field_type {
        FieldType::String => {
            if !value.is_string() {
                return Err(mismatch(path, "expected a string"));
            }
        }
        FieldType::Boolean => {
            if !value.is_boolean() {
                return Err(mismatch(path, "expected a boolean"));
            }
        }
        FieldType::Integer => {
            if value.as_i64().is_none() {
                return Err(mismatch(path, "expected an integer"));
            }
        }
        FieldType::Enum(allowed) => {
            let matches = value
                .as_str()
                .is_some_and(|s| allowed.iter().any(|a| *a == s));
            if !matches {
                return Err(mismatch(
                    path,
                    &format!("value must be one of: {}", allowed.join(", ")),
                ));
            }
        }
        FieldType::Object(sub) => check_object(sub, value, path)?,
    }
    Ok(())
}

fn mismatch(path: &str, detail: &str) -> ResponseError {
    if path.is_empty() {
        ResponseError::SchemaMismatch(detail.to_string())
    } else {
        ResponseError::SchemaMismatch(format!("{path}: {detail}"))
    }
}

fn join_path(path: &str, name: &str) -> String {
    if path.is_empty() {
        name.to_string()
    } else {
        format!("{path}.{name}")
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from completion output.
pub(crate) fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::EntityKind;
    use serde_json::json;

    #[test]
    fn test_bare_object_is_wrapped_into_one_element_list() {
        let raw = r#"{"institution": "MIT", "course": "BSc Computer Science"}"#;
        let value = validate_response(EntityKind::Education.schema(), raw).unwrap();
        let items = value.as_array().expect("array");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["institution"], "MIT");
    }

    #[test]
    fn test_array_passes_through_unchanged_in_count_and_order() {
        let raw = r#"[
            {"skill": "Rust", "occupation": "Software Developer"},
            {"skill": "SQL", "occupation": "Data Analyst"},
            {"skill": "Excel", "occupation": "Accountant"}
        ]"#;
        let value = validate_response(EntityKind::Skills.schema(), raw).unwrap();
        let items = value.as_array().expect("array");
        assert_eq!(items.len(), 3);
        assert_eq!(items[0]["skill"], "Rust");
        assert_eq!(items[2]["skill"], "Excel");
    }

    #[test]
    fn test_empty_array_is_valid_for_list_kinds() {
        let value = validate_response(EntityKind::Awards.schema(), "[]").unwrap();
        assert_eq!(value, json!([]));
    }

    #[test]
    fn test_personal_info_object_is_never_wrapped() {
        let raw = r#"{"firstName": "Ada", "lastName": "Lovelace"}"#;
        let value = validate_response(EntityKind::PersonalInfo.schema(), raw).unwrap();
        assert!(value.is_object());
        assert_eq!(value["firstName"], "Ada");
    }

    #[test]
    fn test_personal_info_rejects_array() {
        let raw = r#"[{"firstName": "Ada"}]"#;
        let err = validate_response(EntityKind::PersonalInfo.schema(), raw).unwrap_err();
        assert!(matches!(err, ResponseError::SchemaMismatch(_)));
    }

    #[test]
    fn test_scalar_is_a_schema_mismatch_for_list_kinds() {
        let err = validate_response(EntityKind::Skills.schema(), "42").unwrap_err();
        assert!(matches!(err, ResponseError::SchemaMismatch(_)));
    }

    #[test]
    fn test_invalid_json_is_a_parse_error() {
        let err = validate_response(EntityKind::Skills.schema(), "not json at all").unwrap_err();
        assert!(matches!(err, ResponseError::Parse(_)));
    }

    #[test]
    fn test_employment_type_outside_literal_set_is_rejected() {
        let raw = r#"[{"organizationName": "Acme", "type": "contract"}]"#;
        let err = validate_response(EntityKind::Employment.schema(), raw).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("type"), "{message}");
        assert!(message.contains("full_time"), "{message}");
    }

    #[test]
    fn test_project_type_outside_literal_set_is_rejected() {
        let raw = r#"[{"projectName": "Compiler", "type": "hobby"}]"#;
        let err = validate_response(EntityKind::Projects.schema(), raw).unwrap_err();
        assert!(matches!(err, ResponseError::SchemaMismatch(_)));
    }

    #[test]
    fn test_declared_enum_values_are_accepted() {
        for employment_type in ["full_time", "part_time", "freelance", "internship", "own"] {
            let raw = format!(
                r#"[{{"organizationName": "Acme", "type": "{employment_type}"}}]"#
            );
            assert!(
                validate_response(EntityKind::Employment.schema(), &raw).is_ok(),
                "{employment_type} should validate"
            );
        }
    }

    #[test]
    fn test_missing_required_field_is_rejected_with_path() {
        let raw = r#"[{"course": "BSc"}]"#;
        let err = validate_response(EntityKind::Education.schema(), raw).unwrap_err();
        assert!(err.to_string().contains("institution"));
    }

    #[test]
    fn test_null_optional_field_is_accepted() {
        let raw = r#"[{"institution": "MIT", "course": "BSc", "location": null}]"#;
        assert!(validate_response(EntityKind::Education.schema(), raw).is_ok());
    }

    #[test]
    fn test_wrong_primitive_type_is_rejected() {
        let raw = r#"[{"organizationName": "Acme", "type": "own", "durationInMonths": "twelve"}]"#;
        let err = validate_response(EntityKind::Employment.schema(), raw).unwrap_err();
        assert!(err.to_string().contains("durationInMonths"));
    }

    #[test]
    fn test_nested_partial_date_is_validated() {
        let raw = r#"[{"institution": "MIT", "course": "BSc", "startDate": {"year": 2019}}]"#;
        let err = validate_response(EntityKind::Education.schema(), raw).unwrap_err();
        assert!(err.to_string().contains("startDate.year"));
    }

    #[test]
    fn test_extra_fields_pass_through() {
        let raw = r#"{"firstName": "Ada", "nickname": "The Countess"}"#;
        let value = validate_response(EntityKind::PersonalInfo.schema(), raw).unwrap();
        assert_eq!(value["nickname"], "The Countess");
    }

    #[test]
    fn test_fenced_json_is_accepted() {
        let raw = "```json\n[{\"skill\": \"Rust\", \"occupation\": \"Software Developer\"}]\n```";
        let value = validate_response(EntityKind::Skills.schema(), raw).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_strip_json_fences_with_json_tag() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_without_tag() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_no_fences() {
        let input = "{\"key\": \"value\"}";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }
}
