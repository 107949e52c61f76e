//! Create/edit form for posts.

use std::fmt::Write;

use quill_shared::check;
use quill_shared::dto::{CreatePostRequest, PostResponse, UpdatePostRequest};

use super::{error_for, field_errors, input_line};
use crate::error::ClientError;
use crate::state::BlogState;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostForm {
    pub title: String,
    pub content: String,
    pub excerpt: String,
    /// Category id.
    pub category: String,
    /// Comma separated tag names.
    pub tags: String,
    pub published: bool,
    pub featured_image: String,
}

/// `"rust, async,, "` -> `["rust", "async"]`.
pub fn split_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

impl PostForm {
    /// Prefilled from an existing post for editing.
    pub fn from_post(post: &PostResponse) -> Self {
        Self {
            title: post.title.clone(),
            content: post.content.clone(),
            excerpt: post.excerpt.clone(),
            category: post
                .category
                .as_ref()
                .map(|c| c.id.to_string())
                .unwrap_or_default(),
            tags: post
                .tags
                .iter()
                .map(|t| t.name.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            published: post.published,
            featured_image: post.featured_image.clone().unwrap_or_default(),
        }
    }

    pub fn create_request(&self) -> Result<CreatePostRequest, ClientError> {
        let request = CreatePostRequest {
            title: self.title.trim().to_string(),
            content: self.content.clone(),
            excerpt: non_empty(&self.excerpt),
            category: self.category.trim().to_string(),
            tags: split_tags(&self.tags),
            published: Some(self.published),
            featured_image: non_empty(&self.featured_image),
        };
        check(&request).map_err(ClientError::Validation)?;
        Ok(request)
    }

    /// Full replacement of the editable fields.
    pub fn update_request(&self) -> Result<UpdatePostRequest, ClientError> {
        let request = UpdatePostRequest {
            title: Some(self.title.trim().to_string()),
            content: Some(self.content.clone()),
            excerpt: non_empty(&self.excerpt),
            category: non_empty(&self.category),
            tags: Some(split_tags(&self.tags)),
            published: Some(self.published),
            featured_image: non_empty(&self.featured_image),
        };
        check(&request).map_err(ClientError::Validation)?;
        Ok(request)
    }

    pub fn render(&self, state: &BlogState, error: Option<&ClientError>) -> String {
        let errors = error.map(ClientError::field_errors).unwrap_or_default();
        let mut out = String::new();

        input_line(&mut out, "Title", &self.title, error_for(errors, "title"));
        input_line(&mut out, "Excerpt", &self.excerpt, error_for(errors, "excerpt"));

        let category = state
            .categories
            .iter()
            .find(|c| c.id.to_string() == self.category)
            .map(|c| c.name.clone())
            .unwrap_or_else(|| self.category.clone());
        input_line(&mut out, "Category", &category, error_for(errors, "category"));
        if !state.categories.is_empty() {
            let names: Vec<_> = state.categories.iter().map(|c| c.name.as_str()).collect();
            let _ = writeln!(out, "  choices: {}", names.join(", "));
        }

        input_line(&mut out, "Tags", &self.tags, error_for(errors, "tags"));
        input_line(&mut out, "Featured image", &self.featured_image, None);
        input_line(&mut out, "Published", if self.published { "yes" } else { "no" }, None);
        input_line(&mut out, "Content", "", error_for(errors, "content"));
        let _ = writeln!(out, "{}", self.content);

        if let Some(error) = error {
            let _ = writeln!(out, "{error}");
            out.push_str(&field_errors(errors));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use quill_shared::dto::{CategorySummary, TagSummary};
    use uuid::Uuid;

    use super::*;
    use crate::state::tests::{category, post};

    fn filled() -> PostForm {
        PostForm {
            title: "  Hello  ".to_string(),
            content: "Body".to_string(),
            category: Uuid::new_v4().to_string(),
            tags: "rust, async,, ".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_split_tags() {
        assert_eq!(split_tags("rust, async,, "), vec!["rust", "async"]);
        assert!(split_tags(" , ").is_empty());
    }

    #[test]
    fn test_create_request() {
        let request = filled().create_request().unwrap();

        assert_eq!(request.title, "Hello");
        assert_eq!(request.tags, vec!["rust", "async"]);
        assert_eq!(request.excerpt, None);
        assert_eq!(request.published, Some(false));
    }

    #[test]
    fn test_create_request_is_validated_locally() {
        let form = PostForm {
            title: String::new(),
            category: "nope".to_string(),
            ..filled()
        };

        let err = form.create_request().unwrap_err();
        let fields: Vec<_> = err.field_errors().iter().map(|e| e.field.clone()).collect();
        assert!(fields.contains(&"title".to_string()));
        assert!(fields.contains(&"category".to_string()));

        let text = form.render(&BlogState::default(), Some(&err));
        assert!(text.contains("Title: \n  ! is required"));
    }

    #[test]
    fn test_edit_form_round_trip() {
        let tech = category("Tech");
        let mut existing = post("Existing");
        existing.category = Some(CategorySummary {
            id: tech.id,
            name: tech.name.clone(),
            slug: tech.slug.clone(),
        });
        existing.tags = vec![TagSummary {
            id: Uuid::new_v4(),
            name: "rust".to_string(),
            slug: "rust".to_string(),
        }];

        let form = PostForm::from_post(&existing);
        assert_eq!(form.tags, "rust");

        let request = form.update_request().unwrap();
        assert_eq!(request.category, Some(tech.id.to_string()));
        assert_eq!(request.tags, Some(vec!["rust".to_string()]));

        let state = BlogState {
            categories: vec![tech],
            ..Default::default()
        };
        assert!(form.render(&state, None).contains("Category: Tech"));
    }
}
