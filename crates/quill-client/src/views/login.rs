use quill_shared::FieldError;
use quill_shared::dto::LoginRequest;

use super::{error_for, input_line};
use crate::error::ClientError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    /// Both fields must be filled in; the server judges the rest.
    pub fn request(&self) -> Result<LoginRequest, ClientError> {
        let mut errors = Vec::new();
        if self.email.trim().is_empty() {
            errors.push(FieldError::new("email", "is required"));
        }
        if self.password.is_empty() {
            errors.push(FieldError::new("password", "is required"));
        }
        if !errors.is_empty() {
            return Err(ClientError::Validation(errors));
        }

        Ok(LoginRequest {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        })
    }

    pub fn render(&self, error: Option<&ClientError>) -> String {
        let errors = error.map(ClientError::field_errors).unwrap_or_default();
        let mut out = String::new();
        input_line(&mut out, "Email", &self.email, error_for(errors, "email"));
        input_line(
            &mut out,
            "Password",
            &"*".repeat(self.password.chars().count()),
            error_for(errors, "password"),
        );
        if let Some(error) = error.filter(|e| e.field_errors().is_empty()) {
            out.push_str(&format!("{error}\n"));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requires_both_fields() {
        let err = LoginForm::default().request().unwrap_err();
        assert_eq!(err.field_errors().len(), 2);
    }

    #[test]
    fn test_password_is_masked() {
        let form = LoginForm {
            email: "jane@example.com".to_string(),
            password: "secret1".to_string(),
        };

        let text = form.render(Some(&ClientError::Api {
            status: 401,
            message: "Invalid credentials".to_string(),
            errors: Vec::new(),
        }));

        assert!(text.contains("Password: *******"));
        assert!(!text.contains("secret1"));
        assert!(text.contains("Invalid credentials"));
    }
}
