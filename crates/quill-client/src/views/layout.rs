//! Page chrome: header navigation and the status line.

use std::fmt::Write;

use crate::routes::Route;
use crate::state::BlogState;

pub fn header(state: &BlogState) -> String {
    let mut links = vec![
        format!("Quill <{}>", Route::Home),
        format!("Categories <{}>", Route::Categories),
    ];

    match &state.user {
        Some(user) => {
            links.push(format!("New Post <{}>", Route::NewPost));
            if user.is_admin() {
                links.push(format!("New Category <{}>", Route::NewCategory));
            }
            links.push(format!("Signed in as {} ({})", user.username, user.role));
        }
        None => {
            links.push(format!("Login <{}>", Route::Login));
            links.push(format!("Register <{}>", Route::Register));
        }
    }

    links.join(" | ")
}

pub fn status(state: &BlogState) -> Option<String> {
    if state.loading {
        return Some("Loading...".to_string());
    }
    state.error.as_ref().map(|e| format!("Error: {e}"))
}

/// Header, status and `body`, separated by rules.
pub fn page(state: &BlogState, body: &str) -> String {
    let mut out = String::new();
    let header = header(state);
    let _ = writeln!(out, "{header}");
    let _ = writeln!(out, "{}", "=".repeat(header.chars().count().min(80)));
    if let Some(status) = status(state) {
        let _ = writeln!(out, "{status}");
        let _ = writeln!(out);
    }
    out.push_str(body);
    out
}
