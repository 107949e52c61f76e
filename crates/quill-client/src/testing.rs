//! In-memory [`BlogApi`] for store and view tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use quill_shared::dto::{
    CategoryRequest, CategoryResponse, CreatePostRequest, HealthResponse, LoginRequest,
    PostResponse, PostsQuery, RegisterUserRequest, TagResponse, UpdateDetailsRequest,
    UpdatePasswordRequest, UpdatePostRequest, UserResponse,
};
use tokio::sync::Notify;
use uuid::Uuid;

use crate::api::{AuthPayload, BlogApi, Paged};
use crate::error::ClientError;
use crate::session::tests::user;
use crate::state::tests::{category, post};

pub(crate) struct FakeApi {
    pub user: Mutex<UserResponse>,
    pub posts: Mutex<Vec<PostResponse>>,
    pub categories: Mutex<Vec<CategoryResponse>>,
    pub failure: Mutex<Option<ClientError>>,
    /// When set, `list_posts` waits for a permit before answering.
    pub gate: Option<Arc<Notify>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self {
            user: Mutex::new(user("user")),
            posts: Mutex::new(Vec::new()),
            categories: Mutex::new(vec![category("Tech")]),
            failure: Mutex::new(None),
            gate: None,
        }
    }

    pub fn fail_next(&self, err: ClientError) {
        *self.failure.lock().unwrap() = Some(err);
    }

    fn check(&self) -> Result<(), ClientError> {
        match self.failure.lock().unwrap().take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn auth(&self) -> AuthPayload {
        AuthPayload {
            user: self.user.lock().unwrap().clone(),
            token: format!("token-{}", Uuid::new_v4()),
        }
    }

    fn not_found(what: &str) -> ClientError {
        ClientError::Api {
            status: 404,
            message: format!("{what} not found"),
            errors: Vec::new(),
        }
    }
}

#[async_trait]
impl BlogApi for FakeApi {
    async fn health(&self) -> Result<HealthResponse, ClientError> {
        self.check()?;
        Ok(HealthResponse {
            status: "ok".to_string(),
            environment: "test".to_string(),
            database: "in-memory".to_string(),
            timestamp: Utc::now(),
        })
    }

    async fn register(&self, request: &RegisterUserRequest) -> Result<AuthPayload, ClientError> {
        self.check()?;
        {
            let mut user = self.user.lock().unwrap();
            user.username = request.username.clone();
            user.email = request.email.clone();
        }
        Ok(self.auth())
    }

    async fn login(&self, _request: &LoginRequest) -> Result<AuthPayload, ClientError> {
        self.check()?;
        Ok(self.auth())
    }

    async fn me(&self) -> Result<UserResponse, ClientError> {
        self.check()?;
        Ok(self.user.lock().unwrap().clone())
    }

    async fn update_details(
        &self,
        request: &UpdateDetailsRequest,
    ) -> Result<UserResponse, ClientError> {
        self.check()?;
        let mut user = self.user.lock().unwrap();
        if let Some(username) = &request.username {
            user.username = username.clone();
        }
        Ok(user.clone())
    }

    async fn update_password(
        &self,
        _request: &UpdatePasswordRequest,
    ) -> Result<AuthPayload, ClientError> {
        self.check()?;
        Ok(self.auth())
    }

    async fn list_posts(&self, _query: &PostsQuery) -> Result<Paged<PostResponse>, ClientError> {
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.check()?;
        let items = self.posts.lock().unwrap().clone();
        Ok(Paged {
            total: items.len() as u64,
            pages: 1,
            items,
        })
    }

    async fn get_post(&self, id: Uuid) -> Result<PostResponse, ClientError> {
        self.check()?;
        let mut posts = self.posts.lock().unwrap();
        let post = posts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| Self::not_found("Post"))?;
        post.views += 1;
        Ok(post.clone())
    }

    async fn create_post(
        &self,
        request: &CreatePostRequest,
    ) -> Result<PostResponse, ClientError> {
        self.check()?;
        let created = PostResponse {
            content: request.content.clone(),
            published: request.published.unwrap_or(false),
            ..post(&request.title)
        };
        self.posts.lock().unwrap().insert(0, created.clone());
        Ok(created)
    }

    async fn update_post(
        &self,
        id: Uuid,
        request: &UpdatePostRequest,
    ) -> Result<PostResponse, ClientError> {
        self.check()?;
        let mut posts = self.posts.lock().unwrap();
        let post = posts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| Self::not_found("Post"))?;
        if let Some(title) = &request.title {
            post.title = title.clone();
        }
        Ok(post.clone())
    }

    async fn delete_post(&self, id: Uuid) -> Result<(), ClientError> {
        self.check()?;
        self.posts.lock().unwrap().retain(|p| p.id != id);
        Ok(())
    }

    async fn toggle_like(&self, id: Uuid) -> Result<PostResponse, ClientError> {
        self.check()?;
        let fan = self.user.lock().unwrap().id;
        let mut posts = self.posts.lock().unwrap();
        let post = posts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| Self::not_found("Post"))?;
        match post.likes.iter().position(|l| *l == fan) {
            Some(pos) => {
                post.likes.remove(pos);
            }
            None => post.likes.push(fan),
        }
        Ok(post.clone())
    }

    async fn posts_by_category(
        &self,
        _category_id: Uuid,
    ) -> Result<Vec<PostResponse>, ClientError> {
        self.check()?;
        Ok(self.posts.lock().unwrap().clone())
    }

    async fn list_categories(&self) -> Result<Vec<CategoryResponse>, ClientError> {
        self.check()?;
        Ok(self.categories.lock().unwrap().clone())
    }

    async fn get_category(&self, id: Uuid) -> Result<CategoryResponse, ClientError> {
        self.check()?;
        self.categories
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| Self::not_found("Category"))
    }

    async fn create_category(
        &self,
        request: &CategoryRequest,
    ) -> Result<CategoryResponse, ClientError> {
        self.check()?;
        let created = CategoryResponse {
            description: request.description.clone(),
            ..category(&request.name)
        };
        self.categories.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn update_category(
        &self,
        id: Uuid,
        request: &CategoryRequest,
    ) -> Result<CategoryResponse, ClientError> {
        self.check()?;
        let mut categories = self.categories.lock().unwrap();
        let category = categories
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| Self::not_found("Category"))?;
        category.name = request.name.clone();
        Ok(category.clone())
    }

    async fn delete_category(&self, id: Uuid) -> Result<(), ClientError> {
        self.check()?;
        self.categories.lock().unwrap().retain(|c| c.id != id);
        Ok(())
    }

    async fn list_tags(&self) -> Result<Vec<TagResponse>, ClientError> {
        self.check()?;
        Ok(Vec::new())
    }
}
