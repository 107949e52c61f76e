use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Category, Page, Post, PostQuery, Tag, User};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Insert a new entity. Unique-key collisions surface as `RepoError::Constraint`.
    async fn create(&self, entity: T) -> Result<T, RepoError>;

    /// Overwrite an existing entity. Missing rows surface as `RepoError::NotFound`.
    ///
    /// Counters maintained by dedicated atomic operations are left as stored.
    async fn update(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// User repository with domain-specific methods.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    /// Find a user by their email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;
}

/// Post repository.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    /// Filtered page of posts, newest first.
    async fn list(&self, query: &PostQuery) -> Result<Page<Post>, RepoError>;

    /// Published posts in a category, newest first.
    async fn list_published_by_category(&self, category_id: Uuid)
    -> Result<Vec<Post>, RepoError>;

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError>;

    /// Atomically add one to the view counter and return the updated post.
    async fn increment_views(&self, id: Uuid) -> Result<Option<Post>, RepoError>;

    /// Atomically add or remove `user_id` from the post's likes and return the updated post.
    async fn toggle_like(&self, id: Uuid, user_id: Uuid) -> Result<Option<Post>, RepoError>;

    async fn count_by_category(&self, category_id: Uuid) -> Result<u64, RepoError>;
}

/// Category repository.
#[async_trait]
pub trait CategoryRepository: BaseRepository<Category, Uuid> {
    /// All categories ordered by name.
    async fn find_all(&self) -> Result<Vec<Category>, RepoError>;

    async fn find_by_name(&self, name: &str) -> Result<Option<Category>, RepoError>;

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Category>, RepoError>;
}

/// Tag repository.
#[async_trait]
pub trait TagRepository: BaseRepository<Tag, Uuid> {
    /// All tags ordered by name.
    async fn find_all(&self) -> Result<Vec<Tag>, RepoError>;

    async fn find_by_name(&self, name: &str) -> Result<Option<Tag>, RepoError>;

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Tag>, RepoError>;
}
