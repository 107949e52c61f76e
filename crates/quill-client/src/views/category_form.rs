use std::fmt::Write;

use quill_shared::check;
use quill_shared::dto::{CategoryRequest, CategoryResponse};

use super::{error_for, input_line};
use crate::error::ClientError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryForm {
    pub name: String,
    pub description: String,
}

impl CategoryForm {
    pub fn from_category(category: &CategoryResponse) -> Self {
        Self {
            name: category.name.clone(),
            description: category.description.clone().unwrap_or_default(),
        }
    }

    pub fn request(&self) -> Result<CategoryRequest, ClientError> {
        let description = self.description.trim();
        let request = CategoryRequest {
            name: self.name.trim().to_string(),
            description: (!description.is_empty()).then(|| description.to_string()),
        };
        check(&request).map_err(ClientError::Validation)?;
        Ok(request)
    }

    pub fn render(&self, error: Option<&ClientError>) -> String {
        let errors = error.map(ClientError::field_errors).unwrap_or_default();
        let mut out = String::new();
        input_line(&mut out, "Name", &self.name, error_for(errors, "name"));
        input_line(
            &mut out,
            "Description",
            &self.description,
            error_for(errors, "description"),
        );
        if let Some(error) = error {
            let _ = writeln!(out, "{error}");
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_limits() {
        let err = CategoryForm {
            name: "n".repeat(51),
            description: String::new(),
        }
        .request()
        .unwrap_err();

        assert_eq!(err.field_errors()[0].field, "name");
    }

    #[test]
    fn test_blank_description_is_omitted() {
        let request = CategoryForm {
            name: " Tech News ".to_string(),
            description: "   ".to_string(),
        }
        .request()
        .unwrap();

        assert_eq!(request.name, "Tech News");
        assert_eq!(request.description, None);
    }
}
