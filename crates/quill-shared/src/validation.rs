//! Request validation shared by the API gate and client forms.

use garde::Validate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const USERNAME_CHARS: (usize, usize) = (3, 30);

/// One rejected input field, as reported in the `errors` member of the envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Run the rule set of `value`, reporting failures under their JSON field names.
pub fn check<T>(value: &T) -> Result<(), Vec<FieldError>>
where
    T: Validate,
    T::Context: Default,
{
    value.validate().map_err(|report| {
        report
            .iter()
            .map(|(path, error)| FieldError::new(json_field(&path.to_string()), error.message()))
            .collect()
    })
}

/// `featured_image` -> `featuredImage`; an empty path names the whole body.
fn json_field(path: &str) -> String {
    if path.is_empty() {
        return "body".to_string();
    }

    let mut out = String::with_capacity(path.len());
    let mut upper = false;
    for c in path.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// Rejects empty and whitespace-only strings.
pub fn required(value: &str, _: &()) -> garde::Result {
    if value.trim().is_empty() {
        return Err(garde::Error::new("is required"));
    }
    Ok(())
}

/// Username length is judged on the trimmed value, which is what gets stored.
pub fn username(value: &str, _: &()) -> garde::Result {
    let chars = value.trim().chars().count();
    if !(USERNAME_CHARS.0..=USERNAME_CHARS.1).contains(&chars) {
        return Err(garde::Error::new(format!(
            "must be between {} and {} characters",
            USERNAME_CHARS.0, USERNAME_CHARS.1
        )));
    }
    Ok(())
}

pub fn optional_username(value: &Option<String>, _: &()) -> garde::Result {
    match value {
        Some(name) => username(name, &()),
        None => Ok(()),
    }
}

/// Requires a well-formed entity id.
pub fn identifier(value: &str, _: &()) -> garde::Result {
    required(value, &())?;
    Uuid::parse_str(value.trim())
        .map(|_| ())
        .map_err(|_| garde::Error::new("is not a valid id"))
}

pub fn optional_identifier(value: &Option<String>, _: &()) -> garde::Result {
    match value {
        Some(id) => identifier(id, &()),
        None => Ok(()),
    }
}

/// Accepts the account roles `user` and `admin`.
pub fn role(value: &Option<String>, _: &()) -> garde::Result {
    match value.as_deref() {
        None | Some("user") | Some("admin") => Ok(()),
        Some(_) => Err(garde::Error::new("must be user or admin")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_field_names() {
        assert_eq!(json_field("featured_image"), "featuredImage");
        assert_eq!(json_field("current_password"), "currentPassword");
        assert_eq!(json_field("tags[0]"), "tags[0]");
        assert_eq!(json_field(""), "body");
    }

    #[test]
    fn test_required_rejects_whitespace() {
        assert!(required("  ", &()).is_err());
        assert!(required("x", &()).is_ok());
    }

    #[test]
    fn test_username_is_measured_after_trimming() {
        assert!(username("   ", &()).is_err());
        assert!(username("  ab  ", &()).is_err());
        assert!(username(" abc ", &()).is_ok());
        assert!(username(&"u".repeat(31), &()).is_err());
        assert!(optional_username(&None, &()).is_ok());
        assert!(optional_username(&Some(" x ".into()), &()).is_err());
    }

    #[test]
    fn test_identifier() {
        assert!(identifier(&Uuid::new_v4().to_string(), &()).is_ok());
        assert!(identifier("42", &()).is_err());
        assert!(optional_identifier(&None, &()).is_ok());
        assert!(optional_identifier(&Some("nope".into()), &()).is_err());
    }

    #[test]
    fn test_role() {
        assert!(role(&None, &()).is_ok());
        assert!(role(&Some("admin".into()), &()).is_ok());
        assert!(role(&Some("root".into()), &()).is_err());
    }
}
