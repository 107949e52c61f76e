//! Post collection manager.

use std::collections::HashMap;
use std::sync::Arc;

use uuid::Uuid;

use super::require_slug;
use crate::domain::{
    Actor, Category, NewPost, Page, Post, PostChanges, PostQuery, Tag, TagFields, User,
};
use crate::error::DomainError;
use crate::ports::{CategoryRepository, PostRepository, TagRepository, UserRepository};
use crate::rules;

/// Longest accepted tag name, in characters.
const MAX_TAG_CHARS: usize = 30;

/// A post with its references resolved for presentation.
#[derive(Debug, Clone)]
pub struct PostDetails {
    pub post: Post,
    pub author: Option<User>,
    pub category: Option<Category>,
    pub tags: Vec<Tag>,
}

pub struct PostService {
    posts: Arc<dyn PostRepository>,
    categories: Arc<dyn CategoryRepository>,
    tags: Arc<dyn TagRepository>,
    users: Arc<dyn UserRepository>,
}

impl PostService {
    pub fn new(
        posts: Arc<dyn PostRepository>,
        categories: Arc<dyn CategoryRepository>,
        tags: Arc<dyn TagRepository>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            posts,
            categories,
            tags,
            users,
        }
    }

    pub async fn list(&self, query: &PostQuery) -> Result<Page<PostDetails>, DomainError> {
        let page = self.posts.list(query).await?;
        let items = self.populate_all(page.items).await?;

        Ok(Page {
            items,
            total: page.total,
            limit: page.limit,
        })
    }

    /// Fetch one post, counting the read.
    pub async fn get(&self, id: Uuid) -> Result<PostDetails, DomainError> {
        let post = self
            .posts
            .increment_views(id)
            .await?
            .ok_or(DomainError::NotFound("Post"))?;

        self.populate(post).await
    }

    pub async fn create(&self, actor: &Actor, fields: NewPost) -> Result<PostDetails, DomainError> {
        self.require_category(fields.category_id).await?;
        let tag_ids = self.resolve_tags(&fields.tags).await?;

        let post = Post::new(actor.user_id, fields, tag_ids);
        require_slug("title", &post.slug)?;
        self.ensure_unique_slug(&post).await?;

        let post = self.posts.create(post).await?;
        self.populate(post).await
    }

    pub async fn update(
        &self,
        id: Uuid,
        actor: &Actor,
        changes: PostChanges,
    ) -> Result<PostDetails, DomainError> {
        let mut post = self.load(id).await?;
        if !post.can_be_modified_by(actor) {
            return Err(DomainError::Forbidden(
                "Not authorized to update this post".to_string(),
            ));
        }

        if let Some(category_id) = changes.category_id {
            self.require_category(category_id).await?;
        }
        let tag_ids = match &changes.tags {
            Some(names) => Some(self.resolve_tags(names).await?),
            None => None,
        };

        post.apply(changes, tag_ids);
        require_slug("title", &post.slug)?;
        self.ensure_unique_slug(&post).await?;

        let post = self.posts.update(post).await?;
        self.populate(post).await
    }

    pub async fn delete(&self, id: Uuid, actor: &Actor) -> Result<(), DomainError> {
        let post = self.load(id).await?;
        if !post.can_be_modified_by(actor) {
            return Err(DomainError::Forbidden(
                "Not authorized to delete this post".to_string(),
            ));
        }

        self.posts.delete(post.id).await?;
        Ok(())
    }

    /// Published posts of one category, newest first.
    pub async fn list_by_category(
        &self,
        category_id: Uuid,
    ) -> Result<Vec<PostDetails>, DomainError> {
        let posts = self.posts.list_published_by_category(category_id).await?;
        self.populate_all(posts).await
    }

    /// Like the post on behalf of `actor`, or withdraw an existing like.
    pub async fn toggle_like(&self, id: Uuid, actor: &Actor) -> Result<PostDetails, DomainError> {
        let post = self
            .posts
            .toggle_like(id, actor.user_id)
            .await?
            .ok_or(DomainError::NotFound("Post"))?;

        self.populate(post).await
    }

    async fn load(&self, id: Uuid) -> Result<Post, DomainError> {
        self.posts
            .find_by_id(id)
            .await?
            .ok_or(DomainError::NotFound("Post"))
    }

    async fn require_category(&self, category_id: Uuid) -> Result<(), DomainError> {
        match self.categories.find_by_id(category_id).await? {
            Some(_) => Ok(()),
            None => Err(DomainError::invalid("category", "Category not found")),
        }
    }

    async fn ensure_unique_slug(&self, post: &Post) -> Result<(), DomainError> {
        let existing = self.posts.find_by_slug(&post.slug).await?;
        if existing.is_some_and(|other| other.id != post.id) {
            return Err(DomainError::Conflict(
                "A post with this title already exists".to_string(),
            ));
        }
        Ok(())
    }

    /// Map tag names to tag ids, creating tags that do not exist yet.
    async fn resolve_tags(&self, names: &[String]) -> Result<Vec<Uuid>, DomainError> {
        let mut ids = Vec::with_capacity(names.len());

        for raw in names {
            let name = rules::normalize_tag_name(raw);
            if name.is_empty() {
                continue;
            }
            if name.chars().count() > MAX_TAG_CHARS {
                return Err(DomainError::invalid(
                    "tags",
                    format!("Tag `{name}` is longer than {MAX_TAG_CHARS} characters"),
                ));
            }

            let tag = match self.tags.find_by_name(&name).await? {
                Some(tag) => tag,
                None => {
                    let tag = Tag::new(TagFields {
                        name,
                        description: None,
                    });
                    require_slug("tags", &tag.slug)?;
                    self.tags.create(tag).await?
                }
            };

            if !ids.contains(&tag.id) {
                ids.push(tag.id);
            }
        }

        Ok(ids)
    }

    async fn populate(&self, post: Post) -> Result<PostDetails, DomainError> {
        let mut populated = self.populate_all(vec![post]).await?;
        populated
            .pop()
            .ok_or_else(|| DomainError::Internal("post population returned nothing".to_string()))
    }

    async fn populate_all(&self, posts: Vec<Post>) -> Result<Vec<PostDetails>, DomainError> {
        let mut authors: HashMap<Uuid, Option<User>> = HashMap::new();
        let mut categories: HashMap<Uuid, Option<Category>> = HashMap::new();
        let mut tags: HashMap<Uuid, Option<Tag>> = HashMap::new();
        let mut details = Vec::with_capacity(posts.len());

        for post in posts {
            if !authors.contains_key(&post.author_id) {
                let author = self.users.find_by_id(post.author_id).await?;
                authors.insert(post.author_id, author);
            }
            if !categories.contains_key(&post.category_id) {
                let category = self.categories.find_by_id(post.category_id).await?;
                categories.insert(post.category_id, category);
            }
            for tag_id in &post.tag_ids {
                if !tags.contains_key(tag_id) {
                    let tag = self.tags.find_by_id(*tag_id).await?;
                    tags.insert(*tag_id, tag);
                }
            }

            // Deleted tags leave dangling ids behind; they are skipped here.
            let post_tags = post
                .tag_ids
                .iter()
                .filter_map(|id| tags.get(id).cloned().flatten())
                .collect();

            details.push(PostDetails {
                author: authors.get(&post.author_id).cloned().flatten(),
                category: categories.get(&post.category_id).cloned().flatten(),
                tags: post_tags,
                post,
            });
        }

        Ok(details)
    }
}
