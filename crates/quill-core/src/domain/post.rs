use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::Actor;
use crate::rules;

/// Post entity - a blog article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub category_id: Uuid,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub excerpt: String,
    pub tag_ids: Vec<Uuid>,
    pub published: bool,
    pub featured_image: Option<String>,
    pub read_time: i32,
    pub views: i64,
    pub likes: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields supplied when writing a new post.
#[derive(Debug, Clone, Default)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub excerpt: Option<String>,
    pub category_id: Uuid,
    /// Tag names; resolved to tag references by the post service.
    pub tags: Vec<String>,
    pub published: bool,
    pub featured_image: Option<String>,
}

/// Partial update of a post. `None` leaves the field untouched.
#[derive(Debug, Clone, Default)]
pub struct PostChanges {
    pub title: Option<String>,
    pub content: Option<String>,
    pub excerpt: Option<String>,
    pub category_id: Option<Uuid>,
    pub tags: Option<Vec<String>>,
    pub published: Option<bool>,
    pub featured_image: Option<String>,
}

impl Post {
    /// Build a post owned by `author_id`, deriving slug, excerpt and read time.
    pub fn new(author_id: Uuid, fields: NewPost, tag_ids: Vec<Uuid>) -> Self {
        let now = Utc::now();
        let title = fields.title.trim().to_string();
        let excerpt = match fields.excerpt {
            Some(excerpt) if !excerpt.trim().is_empty() => excerpt,
            _ => rules::excerpt(&fields.content),
        };

        Self {
            id: Uuid::new_v4(),
            author_id,
            category_id: fields.category_id,
            slug: rules::slugify(&title),
            title,
            read_time: rules::read_time(&fields.content),
            content: fields.content,
            excerpt,
            tag_ids,
            published: fields.published,
            featured_image: fields.featured_image,
            views: 0,
            likes: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a partial update. The author is never touched.
    ///
    /// A new title re-derives the slug; new content re-derives the read time and, unless
    /// an excerpt arrives in the same change, the excerpt.
    pub fn apply(&mut self, changes: PostChanges, tag_ids: Option<Vec<Uuid>>) {
        if let Some(title) = changes.title {
            self.title = title.trim().to_string();
            self.slug = rules::slugify(&self.title);
        }

        let explicit_excerpt = changes.excerpt.filter(|e| !e.trim().is_empty());
        if let Some(content) = changes.content {
            self.read_time = rules::read_time(&content);
            if explicit_excerpt.is_none() {
                self.excerpt = rules::excerpt(&content);
            }
            self.content = content;
        }
        if let Some(excerpt) = explicit_excerpt {
            self.excerpt = excerpt;
        }

        if let Some(category_id) = changes.category_id {
            self.category_id = category_id;
        }
        if let Some(tag_ids) = tag_ids {
            self.tag_ids = tag_ids;
        }
        if let Some(published) = changes.published {
            self.published = published;
        }
        if changes.featured_image.is_some() {
            self.featured_image = changes.featured_image;
        }

        self.updated_at = Utc::now();
    }

    /// Ownership gate: the author or an admin may mutate the post.
    pub fn can_be_modified_by(&self, actor: &Actor) -> bool {
        self.author_id == actor.user_id || actor.is_admin()
    }

    /// Add or remove `user_id` from the like set. Returns `true` if the post is now liked.
    pub fn toggle_like(&mut self, user_id: Uuid) -> bool {
        if let Some(pos) = self.likes.iter().position(|id| *id == user_id) {
            self.likes.remove(pos);
            false
        } else {
            self.likes.push(user_id);
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Role;

    fn draft(content: &str) -> NewPost {
        NewPost {
            title: "Hello, World!!".to_string(),
            content: content.to_string(),
            category_id: Uuid::new_v4(),
            ..Default::default()
        }
    }

    #[test]
    fn test_new_post_derives_fields() {
        let author = Uuid::new_v4();
        let post = Post::new(author, draft("one two three"), vec![]);

        assert_eq!(post.slug, "hello-world");
        assert_eq!(post.excerpt, "one two three...");
        assert_eq!(post.read_time, 1);
        assert_eq!(post.views, 0);
        assert_eq!(post.author_id, author);
        assert!(!post.published);
    }

    #[test]
    fn test_explicit_excerpt_is_kept() {
        let mut fields = draft("body");
        fields.excerpt = Some("Hand written".to_string());

        let post = Post::new(Uuid::new_v4(), fields, vec![]);
        assert_eq!(post.excerpt, "Hand written");
    }

    #[test]
    fn test_apply_rederives_on_title_and_content() {
        let mut post = Post::new(Uuid::new_v4(), draft("short"), vec![]);
        let author = post.author_id;

        post.apply(
            PostChanges {
                title: Some("A Brand New Title".to_string()),
                content: Some(vec!["w"; 201].join(" ")),
                ..Default::default()
            },
            None,
        );

        assert_eq!(post.slug, "a-brand-new-title");
        assert_eq!(post.read_time, 2);
        assert!(post.excerpt.ends_with("..."));
        assert_eq!(post.author_id, author);
    }

    #[test]
    fn test_apply_content_with_explicit_excerpt() {
        let mut post = Post::new(Uuid::new_v4(), draft("short"), vec![]);

        post.apply(
            PostChanges {
                content: Some("longer body".to_string()),
                excerpt: Some("Custom".to_string()),
                ..Default::default()
            },
            None,
        );

        assert_eq!(post.excerpt, "Custom");
        assert_eq!(post.content, "longer body");
    }

    #[test]
    fn test_ownership_gate() {
        let post = Post::new(Uuid::new_v4(), draft("x"), vec![]);

        assert!(post.can_be_modified_by(&Actor::new(post.author_id, Role::User)));
        assert!(post.can_be_modified_by(&Actor::new(Uuid::new_v4(), Role::Admin)));
        assert!(!post.can_be_modified_by(&Actor::new(Uuid::new_v4(), Role::User)));
    }

    #[test]
    fn test_toggle_like() {
        let mut post = Post::new(Uuid::new_v4(), draft("x"), vec![]);
        let fan = Uuid::new_v4();

        assert!(post.toggle_like(fan));
        assert_eq!(post.likes, vec![fan]);
        assert!(!post.toggle_like(fan));
        assert!(post.likes.is_empty());
    }
}
