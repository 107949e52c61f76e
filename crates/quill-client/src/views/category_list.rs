use std::fmt::Write;

use crate::routes::Route;
use crate::state::BlogState;

pub fn render(state: &BlogState) -> String {
    if state.categories.is_empty() {
        return "No categories yet.\n".to_string();
    }

    let admin = state.is_admin();
    let mut out = String::new();
    for category in &state.categories {
        let _ = write!(out, "{} <{}>", category.name, Route::Category(category.id));
        if admin {
            let _ = write!(out, " [edit <{}>]", Route::EditCategory(category.id));
        }
        let _ = writeln!(out);
        if let Some(description) = &category.description {
            let _ = writeln!(out, "  {description}");
        }
    }
    out
}
