use std::borrow::Cow;
use std::collections::BTreeMap;

use lazy_static::lazy_static;
use regex::Regex;
use uuid::Uuid;
use validator::{ValidationError, ValidationErrors, ValidationErrorsKind};

/// Field path -> messages. Paths use the JSON field names (`jadwal[0].startDate`).
pub type FieldErrors = BTreeMap<String, Vec<String>>;

lazy_static! {
    /// Calendar date as typed into forms and sent over the wire
    /// - Valid: "2023-08-01"
    /// - Invalid: "2023-8-1", "01-08-2023", "2023/08/01"
    pub static ref DATE_REGEX: Regex = Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap();
}

fn error_with_message(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

/// Rejects empty and whitespace-only strings
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(error_with_message("blank", "must not be blank"));
    }
    Ok(())
}

/// Rejects the nil UUID, which is what an unselected reference deserializes to
pub fn validate_not_nil(id: &Uuid) -> Result<(), ValidationError> {
    if id.is_nil() {
        return Err(error_with_message("required", "a selection is required"));
    }
    Ok(())
}

/// Flatten nested validator errors into a path-keyed map.
///
/// Struct-level (schema) errors are attached to the path of the struct itself,
/// so a bad date range in the first schedule entry is reported as `jadwal[0]`.
pub fn collect_field_errors(errors: &ValidationErrors) -> FieldErrors {
    let mut out = FieldErrors::new();
    collect_into(errors, None, &mut out);
    out
}

fn collect_into(errors: &ValidationErrors, prefix: Option<&str>, out: &mut FieldErrors) {
    for (field, kind) in errors.errors() {
        let path = match (prefix, field.as_ref()) {
            (Some(p), "__all__") => p.to_string(),
            (None, "__all__") => "__all__".to_string(),
            (Some(p), name) => format!("{}.{}", p, to_camel_case(name)),
            (None, name) => to_camel_case(name),
        };

        match kind {
            ValidationErrorsKind::Field(errs) => {
                out.entry(path)
                    .or_default()
                    .extend(errs.iter().map(message_for));
            }
            ValidationErrorsKind::Struct(inner) => collect_into(inner, Some(&path), out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect_into(inner, Some(&format!("{}[{}]", path, index)), out);
                }
            }
        }
    }
}

fn message_for(error: &ValidationError) -> String {
    error
        .message
        .as_ref()
        .map(|m| m.to_string())
        .unwrap_or_else(|| error.code.to_string())
}

fn to_camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper_next = false;
    for c in name.chars() {
        if c == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Leg {
        #[validate(regex(path = *DATE_REGEX, message = "use YYYY-MM-DD"))]
        start_date: String,
    }

    #[derive(Validate)]
    struct Trip {
        #[validate(custom(function = "validate_not_blank"))]
        nama: String,
        #[validate(nested)]
        legs: Vec<Leg>,
    }

    #[test]
    fn test_date_regex() {
        assert!(DATE_REGEX.is_match("2023-08-01"));
        assert!(!DATE_REGEX.is_match("2023-8-1"));
        assert!(!DATE_REGEX.is_match("01-08-2023"));
        assert!(!DATE_REGEX.is_match("2023/08/01"));
        assert!(!DATE_REGEX.is_match(""));
    }

    #[test]
    fn test_not_blank() {
        assert!(validate_not_blank("Bali").is_ok());
        assert!(validate_not_blank("").is_err());
        assert!(validate_not_blank("   ").is_err());
    }

    #[test]
    fn test_not_nil() {
        assert!(validate_not_nil(&Uuid::nil()).is_err());
        assert!(validate_not_nil(&Uuid::now_v7()).is_ok());
    }

    #[test]
    fn test_collect_field_errors_uses_json_paths() {
        let trip = Trip {
            nama: " ".to_string(),
            legs: vec![
                Leg {
                    start_date: "2023-08-01".to_string(),
                },
                Leg {
                    start_date: "tomorrow".to_string(),
                },
            ],
        };

        let errors = trip.validate().unwrap_err();
        let fields = collect_field_errors(&errors);

        assert_eq!(fields["nama"], vec!["must not be blank".to_string()]);
        assert_eq!(fields["legs[1].startDate"], vec!["use YYYY-MM-DD".to_string()]);
        assert!(!fields.contains_key("legs[0].startDate"));
    }

    #[test]
    fn test_to_camel_case() {
        assert_eq!(to_camel_case("start_date"), "startDate");
        assert_eq!(to_camel_case("nama"), "nama");
    }
}
