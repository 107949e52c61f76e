use quill_shared::dto::RegisterUserRequest;
use quill_shared::{FieldError, check};

use super::{error_for, input_line};
use crate::error::ClientError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegisterForm {
    pub fn request(&self) -> Result<RegisterUserRequest, ClientError> {
        let request = RegisterUserRequest {
            username: self.username.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
            role: None,
        };

        let mut errors = check(&request).err().unwrap_or_default();
        if self.password != self.confirm_password {
            errors.push(FieldError::new("confirmPassword", "Passwords do not match"));
        }
        if !errors.is_empty() {
            return Err(ClientError::Validation(errors));
        }
        Ok(request)
    }

    pub fn render(&self, error: Option<&ClientError>) -> String {
        let errors = error.map(ClientError::field_errors).unwrap_or_default();
        let mut out = String::new();
        input_line(&mut out, "Username", &self.username, error_for(errors, "username"));
        input_line(&mut out, "Email", &self.email, error_for(errors, "email"));
        input_line(
            &mut out,
            "Password",
            &"*".repeat(self.password.chars().count()),
            error_for(errors, "password"),
        );
        input_line(
            &mut out,
            "Confirm password",
            &"*".repeat(self.confirm_password.chars().count()),
            error_for(errors, "confirmPassword"),
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

    fn filled() -> RegisterForm {
        RegisterForm {
            username: "jane".to_string(),
            email: "jane@example.com".to_string(),
            password: "secret1".to_string(),
            confirm_password: "secret1".to_string(),
        }
    }

    #[test]
    fn test_valid_form() {
        let request = filled().request().unwrap();
        assert_eq!(request.username, "jane");
        assert_eq!(request.role, None);
    }

    #[test]
    fn test_mismatched_confirmation() {
        let form = RegisterForm {
            confirm_password: "secret2".to_string(),
            ..filled()
        };

        let err = form.request().unwrap_err();
        assert_eq!(
            err.field_errors(),
            &[FieldError::new("confirmPassword", "Passwords do not match")]
        );
        assert!(form.render(Some(&err)).contains("  ! Passwords do not match"));
    }

    #[test]
    fn test_short_username_and_password() {
        let form = RegisterForm {
            username: "jo".to_string(),
            password: "123".to_string(),
            confirm_password: "123".to_string(),
            ..filled()
        };

        let fields: Vec<_> = form
            .request()
            .unwrap_err()
            .field_errors()
            .iter()
            .map(|e| e.field.clone())
            .collect();
        assert_eq!(fields.len(), 2);
        assert!(fields.contains(&"username".to_string()));
        assert!(fields.contains(&"password".to_string()));
    }
}
