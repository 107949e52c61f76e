use std::fmt::Write;

use quill_shared::dto::PostResponse;

use super::date;
use crate::routes::Route;
use crate::state::BlogState;

/// One listing entry: title, byline, excerpt and tags.
pub fn summary(post: &PostResponse) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} <{}>", post.title, Route::Post(post.id));

    let mut byline = vec![date(&post.created_at)];
    if let Some(author) = &post.author {
        byline.push(format!("by {}", author.username));
    }
    if let Some(category) = &post.category {
        byline.push(format!("in {}", category.name));
    }
    byline.push(format!("{} min read", post.read_time));
    byline.push(format!("{} views", post.views));
    byline.push(format!("{} likes", post.likes.len()));
    if !post.published {
        byline.push("draft".to_string());
    }
    let _ = writeln!(out, "  {}", byline.join(" · "));
    let _ = writeln!(out, "  {}", post.excerpt);

    if !post.tags.is_empty() {
        let tags: Vec<_> = post.tags.iter().map(|t| format!("#{}", t.name)).collect();
        let _ = writeln!(out, "  {}", tags.join(" "));
    }
    out
}

pub fn render(state: &BlogState) -> String {
    if state.posts.is_empty() {
        return if state.loading {
            String::new()
        } else {
            "No posts found.\n".to_string()
        };
    }

    let mut out = String::new();
    for post in &state.posts {
        out.push_str(&summary(post));
        out.push('\n');
    }
    let _ = writeln!(
        out,
        "{} of {} posts, {} page(s)",
        state.posts.len(),
        state.total_posts,
        state.pages.max(1)
    );
    out
}
