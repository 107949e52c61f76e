//! Text views. Each one renders from [`BlogState`](crate::BlogState) or from a form
//! and never talks to the API itself; forms turn input into validated requests.

pub mod category_form;
pub mod category_list;
pub mod layout;
pub mod login;
pub mod post;
pub mod post_form;
pub mod post_list;
pub mod register;

use std::fmt::Write;

use chrono::{DateTime, Utc};
use quill_shared::FieldError;

pub use category_form::CategoryForm;
pub use login::LoginForm;
pub use post_form::PostForm;
pub use register::RegisterForm;

pub(crate) fn date(at: &DateTime<Utc>) -> String {
    at.format("%b %-d, %Y").to_string()
}

/// `  - field: message` lines, or nothing.
pub(crate) fn field_errors(errors: &[FieldError]) -> String {
    let mut out = String::new();
    for error in errors {
        let _ = writeln!(out, "  - {}: {}", error.field, error.message);
    }
    out
}

/// Message for `field` among `errors`, if any.
pub(crate) fn error_for<'a>(errors: &'a [FieldError], field: &str) -> Option<&'a str> {
    errors
        .iter()
        .find(|e| e.field == field || e.field.starts_with(&format!("{field}[")))
        .map(|e| e.message.as_str())
}

pub(crate) fn input_line(out: &mut String, label: &str, value: &str, error: Option<&str>) {
    let _ = writeln!(out, "{label}: {value}");
    if let Some(error) = error {
        let _ = writeln!(out, "  ! {error}");
    }
}
