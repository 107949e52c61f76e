//! Single post page.

use std::fmt::Write;

use super::date;
use crate::routes::Route;
use crate::state::BlogState;

pub fn render(state: &BlogState) -> String {
    let Some(post) = &state.current_post else {
        return "Post not found.\n".to_string();
    };

    let mut out = String::new();
    let _ = writeln!(out, "# {}", post.title);
    if let Some(image) = &post.featured_image {
        let _ = writeln!(out, "[image: {image}]");
    }

    let author = post
        .author
        .as_ref()
        .map(|a| a.username.as_str())
        .unwrap_or("unknown author");
    let _ = writeln!(
        out,
        "{} · {} · {} min read · {} views",
        author,
        date(&post.created_at),
        post.read_time,
        post.views
    );
    if let Some(category) = &post.category {
        let _ = writeln!(out, "Category: {} <{}>", category.name, Route::Category(category.id));
    }
    if !post.tags.is_empty() {
        let tags: Vec<_> = post.tags.iter().map(|t| t.name.as_str()).collect();
        let _ = writeln!(out, "Tags: {}", tags.join(", "));
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", post.content);
    let _ = writeln!(out);

    let liked = state
        .user
        .as_ref()
        .is_some_and(|u| post.likes.contains(&u.id));
    let _ = write!(out, "{} likes", post.likes.len());
    if state.is_signed_in() {
        let _ = write!(out, " [{}]", if liked { "unlike" } else { "like" });
    }
    let _ = writeln!(out);

    if state.can_modify(post) {
        let _ = writeln!(out, "Edit <{}> | Delete", Route::EditPost(post.id));
    }
    out
}
