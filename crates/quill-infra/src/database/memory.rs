//! In-memory repositories - used when no database is configured.
//!
//! Data is lost on process restart. Unique keys are enforced the way the PostgreSQL
//! schema enforces them so both backends fail the same way.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use quill_core::domain::{Category, Page, Post, PostQuery, Tag, User};
use quill_core::error::RepoError;
use quill_core::ports::{
    BaseRepository, CategoryRepository, PostRepository, TagRepository, UserRepository,
};

/// A row the in-memory store can hold.
pub trait Record: Clone + Send + Sync + 'static {
    fn id(&self) -> Uuid;

    /// `(column, value)` pairs that must not repeat across rows.
    fn unique_keys(&self) -> Vec<(&'static str, String)>;

    /// Carry over fields that only dedicated operations may change when a row is overwritten.
    fn keep_counters(&mut self, _stored: &Self) {}
}

impl Record for User {
    fn id(&self) -> Uuid {
        self.id
    }

    fn unique_keys(&self) -> Vec<(&'static str, String)> {
        vec![("email", self.email.clone()), ("username", self.username.clone())]
    }
}

impl Record for Post {
    fn id(&self) -> Uuid {
        self.id
    }

    fn unique_keys(&self) -> Vec<(&'static str, String)> {
        vec![("slug", self.slug.clone())]
    }

    fn keep_counters(&mut self, stored: &Self) {
        self.views = stored.views;
        self.likes = stored.likes.clone();
    }
}

impl Record for Category {
    fn id(&self) -> Uuid {
        self.id
    }

    fn unique_keys(&self) -> Vec<(&'static str, String)> {
        vec![("name", self.name.clone()), ("slug", self.slug.clone())]
    }
}

impl Record for Tag {
    fn id(&self) -> Uuid {
        self.id
    }

    fn unique_keys(&self) -> Vec<(&'static str, String)> {
        vec![("name", self.name.clone()), ("slug", self.slug.clone())]
    }
}

/// HashMap-backed repository behind an async RwLock.
pub struct InMemoryRepository<T: Record> {
    rows: RwLock<HashMap<Uuid, T>>,
}

pub type InMemoryUserRepository = InMemoryRepository<User>;
pub type InMemoryPostRepository = InMemoryRepository<Post>;
pub type InMemoryCategoryRepository = InMemoryRepository<Category>;
pub type InMemoryTagRepository = InMemoryRepository<Tag>;

impl<T: Record> InMemoryRepository<T> {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(HashMap::new()),
        }
    }

    async fn find_one(&self, predicate: impl Fn(&T) -> bool) -> Option<T> {
        let rows = self.rows.read().await;
        rows.values().find(|row| predicate(row)).cloned()
    }

    async fn find_many(&self, predicate: impl Fn(&T) -> bool) -> Vec<T> {
        let rows = self.rows.read().await;
        rows.values().filter(|row| predicate(row)).cloned().collect()
    }

    fn check_unique(rows: &HashMap<Uuid, T>, entity: &T) -> Result<(), RepoError> {
        let keys = entity.unique_keys();
        let clash = rows
            .values()
            .filter(|row| row.id() != entity.id())
            .flat_map(Record::unique_keys)
            .find(|key| keys.contains(key));

        match clash {
            Some((column, _)) => Err(RepoError::Constraint(format!("duplicate {column}"))),
            None => Ok(()),
        }
    }
}

impl<T: Record> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Record> BaseRepository<T, Uuid> for InMemoryRepository<T> {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<T>, RepoError> {
        Ok(self.rows.read().await.get(&id).cloned())
    }

    async fn create(&self, entity: T) -> Result<T, RepoError> {
        let mut rows = self.rows.write().await;
        if rows.contains_key(&entity.id()) {
            return Err(RepoError::Constraint("duplicate id".to_string()));
        }
        Self::check_unique(&rows, &entity)?;

        rows.insert(entity.id(), entity.clone());
        Ok(entity)
    }

    async fn update(&self, mut entity: T) -> Result<T, RepoError> {
        let mut rows = self.rows.write().await;
        let Some(stored) = rows.get(&entity.id()) else {
            return Err(RepoError::NotFound);
        };
        entity.keep_counters(stored);
        Self::check_unique(&rows, &entity)?;

        rows.insert(entity.id(), entity.clone());
        Ok(entity)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        match self.rows.write().await.remove(&id) {
            Some(_) => Ok(()),
            None => Err(RepoError::NotFound),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        Ok(self.find_one(|user| user.email == email).await)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        Ok(self.find_one(|user| user.username == username).await)
    }
}

fn newest_first(posts: &mut [Post]) {
    posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn list(&self, query: &PostQuery) -> Result<Page<Post>, RepoError> {
        let needle = query
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);

        let mut posts = self
            .find_many(|post| {
                query.published.matches(post.published)
                    && query.category.is_none_or(|id| post.category_id == id)
                    && needle.as_deref().is_none_or(|needle| {
                        post.title.to_lowercase().contains(needle)
                            || post.content.to_lowercase().contains(needle)
                    })
            })
            .await;
        newest_first(&mut posts);

        let limit = query.limit.max(1);
        let total = posts.len() as u64;
        let offset = PostQuery { limit, ..query.clone() }.offset();
        let items = posts
            .into_iter()
            .skip(usize::try_from(offset).unwrap_or(usize::MAX))
            .take(usize::try_from(limit).unwrap_or(usize::MAX))
            .collect();

        Ok(Page {
            items,
            total,
            limit,
        })
    }

    async fn list_published_by_category(
        &self,
        category_id: Uuid,
    ) -> Result<Vec<Post>, RepoError> {
        let mut posts = self
            .find_many(|post| post.published && post.category_id == category_id)
            .await;
        newest_first(&mut posts);
        Ok(posts)
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError> {
        Ok(self.find_one(|post| post.slug == slug).await)
    }

    async fn increment_views(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let mut rows = self.rows.write().await;
        Ok(rows.get_mut(&id).map(|post| {
            post.views += 1;
            post.clone()
        }))
    }

    async fn toggle_like(&self, id: Uuid, user_id: Uuid) -> Result<Option<Post>, RepoError> {
        let mut rows = self.rows.write().await;
        Ok(rows.get_mut(&id).map(|post| {
            post.toggle_like(user_id);
            post.clone()
        }))
    }

    async fn count_by_category(&self, category_id: Uuid) -> Result<u64, RepoError> {
        let rows = self.rows.read().await;
        Ok(rows
            .values()
            .filter(|post| post.category_id == category_id)
            .count() as u64)
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn find_all(&self) -> Result<Vec<Category>, RepoError> {
        let mut categories = self.find_many(|_| true).await;
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Category>, RepoError> {
        Ok(self.find_one(|category| category.name == name).await)
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Category>, RepoError> {
        Ok(self.find_one(|category| category.slug == slug).await)
    }
}

#[async_trait]
impl TagRepository for InMemoryTagRepository {
    async fn find_all(&self) -> Result<Vec<Tag>, RepoError> {
        let mut tags = self.find_many(|_| true).await;
        tags.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(tags)
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Tag>, RepoError> {
        Ok(self.find_one(|tag| tag.name == name).await)
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Tag>, RepoError> {
        Ok(self.find_one(|tag| tag.slug == slug).await)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeDelta, Utc};
    use quill_core::domain::{CategoryFields, NewPost, PublishedFilter, Role};

    use super::*;

    fn post(title: &str, content: &str, category_id: Uuid, published: bool) -> Post {
        Post::new(
            Uuid::new_v4(),
            NewPost {
                title: title.to_string(),
                content: content.to_string(),
                category_id,
                published,
                ..Default::default()
            },
            vec![],
        )
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_email() {
        let repo = InMemoryUserRepository::new();
        let first = User::new("jane".into(), "jane@example.com".into(), "h".into(), Role::User);
        let second = User::new("john".into(), "jane@example.com".into(), "h".into(), Role::User);

        repo.create(first).await.unwrap();
        let result = repo.create(second).await;

        assert!(matches!(result, Err(RepoError::Constraint(_))));
    }

    #[tokio::test]
    async fn test_update_missing_row_is_not_found() {
        let repo = InMemoryCategoryRepository::new();
        let category = Category::new(
            CategoryFields {
                name: "Rust".into(),
                description: None,
            },
            Uuid::new_v4(),
        );

        assert!(matches!(
            repo.update(category).await,
            Err(RepoError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_update_keeps_own_unique_keys() {
        let repo = InMemoryCategoryRepository::new();
        let mut category = Category::new(
            CategoryFields {
                name: "Rust".into(),
                description: None,
            },
            Uuid::new_v4(),
        );
        repo.create(category.clone()).await.unwrap();

        category.description = Some("Systems".into());
        let updated = repo.update(category).await.unwrap();
        assert_eq!(updated.description.as_deref(), Some("Systems"));
    }

    #[tokio::test]
    async fn test_list_filters_searches_and_pages() {
        let repo = InMemoryPostRepository::new();
        let rust = Uuid::new_v4();
        let other = Uuid::new_v4();

        let mut older = post("Ownership in Rust", "borrowing", rust, true);
        older.created_at = Utc::now() - TimeDelta::hours(1);
        repo.create(older).await.unwrap();
        repo.create(post("Lifetimes", "RUST annotations", rust, true))
            .await
            .unwrap();
        repo.create(post("Draft", "rust", rust, false)).await.unwrap();
        repo.create(post("Gardening", "soil", other, true))
            .await
            .unwrap();

        let query = PostQuery {
            category: Some(rust),
            search: Some("rust".into()),
            limit: 1,
            ..Default::default()
        };
        let page = repo.list(&query).await.unwrap();
        assert_eq!(page.total, 2);
        assert_eq!(page.pages(), 2);
        assert_eq!(page.items[0].title, "Lifetimes");

        let second = repo.list(&PostQuery { page: 2, ..query }).await.unwrap();
        assert_eq!(second.items[0].title, "Ownership in Rust");

        let all = repo
            .list(&PostQuery {
                published: PublishedFilter::All,
                limit: 100,
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(all.total, 4);
    }

    #[tokio::test]
    async fn test_increment_views() {
        let repo = InMemoryPostRepository::new();
        let created = repo
            .create(post("Counting", "reads", Uuid::new_v4(), true))
            .await
            .unwrap();

        repo.increment_views(created.id).await.unwrap();
        let viewed = repo.increment_views(created.id).await.unwrap().unwrap();

        assert_eq!(viewed.views, 2);
        assert!(repo.increment_views(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_page_past_the_end_is_empty() {
        let repo = InMemoryPostRepository::new();
        repo.create(post("Only", "one", Uuid::new_v4(), true))
            .await
            .unwrap();

        let page = repo
            .list(&PostQuery {
                page: u64::MAX,
                limit: 10,
                ..Default::default()
            })
            .await
            .unwrap();

        assert!(page.items.is_empty());
        assert_eq!(page.total, 1);
    }

    #[tokio::test]
    async fn test_update_keeps_views_recorded_after_load() {
        let repo = InMemoryPostRepository::new();
        let created = repo
            .create(post("Counting", "reads", Uuid::new_v4(), true))
            .await
            .unwrap();
        let fan = Uuid::new_v4();

        let mut loaded = repo.find_by_id(created.id).await.unwrap().unwrap();
        repo.increment_views(created.id).await.unwrap();
        repo.toggle_like(created.id, fan).await.unwrap();

        loaded.title = "Counting again".into();
        let saved = repo.update(loaded).await.unwrap();

        assert_eq!(saved.title, "Counting again");
        assert_eq!(saved.views, 1);
        assert_eq!(saved.likes, vec![fan]);
        let stored = repo.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(stored.views, 1);
    }

    #[tokio::test]
    async fn test_toggle_like_keeps_views_and_concurrent_likes() {
        let repo = InMemoryPostRepository::new();
        let created = repo
            .create(post("Likes", "hearts", Uuid::new_v4(), true))
            .await
            .unwrap();
        let (jane, john) = (Uuid::new_v4(), Uuid::new_v4());

        repo.increment_views(created.id).await.unwrap();
        let (a, b) = tokio::join!(
            repo.toggle_like(created.id, jane),
            repo.toggle_like(created.id, john)
        );
        assert!(a.unwrap().is_some() && b.unwrap().is_some());

        let stored = repo.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(stored.views, 1);
        assert!(stored.likes.contains(&jane) && stored.likes.contains(&john));

        let withdrawn = repo.toggle_like(created.id, jane).await.unwrap().unwrap();
        assert_eq!(withdrawn.likes, vec![john]);
        assert!(repo.toggle_like(Uuid::new_v4(), jane).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_count_by_category_includes_drafts() {
        let repo = InMemoryPostRepository::new();
        let category = Uuid::new_v4();
        repo.create(post("One", "a", category, true)).await.unwrap();
        repo.create(post("Two", "b", category, false)).await.unwrap();

        assert_eq!(repo.count_by_category(category).await.unwrap(), 2);
        assert_eq!(
            repo.list_published_by_category(category)
                .await
                .unwrap()
                .len(),
            1
        );
    }
}
