//! Typed access to the Quill REST API.
//!
//! [`HttpBlogApi`] is the only place that talks HTTP. Every response passes through
//! one interceptor: a 401 clears the persisted session and sends the navigator to
//! the login route before the error reaches the caller.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use quill_shared::ApiResponse;
use quill_shared::dto::{
    CategoryRequest, CategoryResponse, CreatePostRequest, HealthResponse, LoginRequest,
    PostResponse, PostsQuery, RegisterUserRequest, TagResponse, UpdateDetailsRequest,
    UpdatePasswordRequest, UpdatePostRequest, UserResponse,
};
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::error::ClientError;
use crate::routes::{Navigator, Route};
use crate::session::SessionStore;

/// A signed-in user with the token the server issued for them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthPayload {
    pub user: UserResponse,
    pub token: String,
}

/// One page of a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paged<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub pages: u64,
}

#[async_trait]
pub trait BlogApi: Send + Sync {
    async fn health(&self) -> Result<HealthResponse, ClientError>;

    async fn register(&self, request: &RegisterUserRequest) -> Result<AuthPayload, ClientError>;
    async fn login(&self, request: &LoginRequest) -> Result<AuthPayload, ClientError>;
    async fn me(&self) -> Result<UserResponse, ClientError>;
    async fn update_details(
        &self,
        request: &UpdateDetailsRequest,
    ) -> Result<UserResponse, ClientError>;
    async fn update_password(
        &self,
        request: &UpdatePasswordRequest,
    ) -> Result<AuthPayload, ClientError>;

    async fn list_posts(&self, query: &PostsQuery) -> Result<Paged<PostResponse>, ClientError>;
    async fn get_post(&self, id: Uuid) -> Result<PostResponse, ClientError>;
    async fn create_post(&self, request: &CreatePostRequest)
    -> Result<PostResponse, ClientError>;
    async fn update_post(
        &self,
        id: Uuid,
        request: &UpdatePostRequest,
    ) -> Result<PostResponse, ClientError>;
    async fn delete_post(&self, id: Uuid) -> Result<(), ClientError>;
    async fn toggle_like(&self, id: Uuid) -> Result<PostResponse, ClientError>;
    async fn posts_by_category(&self, category_id: Uuid)
    -> Result<Vec<PostResponse>, ClientError>;

    async fn list_categories(&self) -> Result<Vec<CategoryResponse>, ClientError>;
    async fn get_category(&self, id: Uuid) -> Result<CategoryResponse, ClientError>;
    async fn create_category(
        &self,
        request: &CategoryRequest,
    ) -> Result<CategoryResponse, ClientError>;
    async fn update_category(
        &self,
        id: Uuid,
        request: &CategoryRequest,
    ) -> Result<CategoryResponse, ClientError>;
    async fn delete_category(&self, id: Uuid) -> Result<(), ClientError>;

    async fn list_tags(&self) -> Result<Vec<TagResponse>, ClientError>;
}

/// reqwest-backed [`BlogApi`].
pub struct HttpBlogApi {
    client: reqwest::Client,
    base_url: String,
    session: Arc<dyn SessionStore>,
    navigator: Navigator,
}

impl HttpBlogApi {
    pub const TIMEOUT: Duration = Duration::from_secs(10);

    /// `base_url` includes the `/api` prefix, e.g. `http://localhost:5000/api`.
    pub fn new(
        base_url: impl Into<String>,
        session: Arc<dyn SessionStore>,
        navigator: Navigator,
    ) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder().timeout(Self::TIMEOUT).build()?;
        Ok(Self::with_client(client, base_url, session, navigator))
    }

    pub fn with_client(
        client: reqwest::Client,
        base_url: impl Into<String>,
        session: Arc<dyn SessionStore>,
        navigator: Navigator,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session,
            navigator,
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.client.request(method, format!("{}{path}", self.base_url));
        match self.session.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<ApiResponse<T>, ClientError> {
        self.send(self.request(Method::GET, path)).await
    }

    async fn write<B, T>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<ApiResponse<T>, ClientError>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        self.send(self.request(method, path).json(body)).await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<ApiResponse<T>, ClientError> {
        let response = builder.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if status.is_success() {
            return Ok(serde_json::from_slice(&body)?);
        }

        let failure = serde_json::from_slice::<ApiResponse<serde_json::Value>>(&body).ok();
        let message = failure
            .as_ref()
            .and_then(|f| f.error.clone())
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("Request failed").to_string());

        if status == StatusCode::UNAUTHORIZED {
            self.on_unauthorized();
            return Err(ClientError::Unauthorized(message));
        }

        Err(ClientError::Api {
            status: status.as_u16(),
            message,
            errors: failure.and_then(|f| f.errors).unwrap_or_default(),
        })
    }

    fn on_unauthorized(&self) {
        tracing::info!("Session rejected by the server, signing out");
        if let Err(err) = self.session.clear() {
            tracing::warn!(error = %err, "Failed to clear session");
        }
        self.navigator.navigate(Route::Login);
    }
}

fn data<T>(envelope: ApiResponse<T>) -> Result<T, ClientError> {
    envelope
        .data
        .ok_or_else(|| ClientError::Decode("response carried no data".to_string()))
}

fn authenticated(envelope: ApiResponse<UserResponse>) -> Result<AuthPayload, ClientError> {
    let token = envelope
        .token
        .clone()
        .ok_or_else(|| ClientError::Decode("response carried no token".to_string()))?;
    Ok(AuthPayload {
        user: data(envelope)?,
        token,
    })
}

#[async_trait]
impl BlogApi for HttpBlogApi {
    async fn health(&self) -> Result<HealthResponse, ClientError> {
        data(self.get("/health").await?)
    }

    async fn register(&self, request: &RegisterUserRequest) -> Result<AuthPayload, ClientError> {
        authenticated(self.write(Method::POST, "/auth/register", request).await?)
    }

    async fn login(&self, request: &LoginRequest) -> Result<AuthPayload, ClientError> {
        authenticated(self.write(Method::POST, "/auth/login", request).await?)
    }

    async fn me(&self) -> Result<UserResponse, ClientError> {
        data(self.get("/auth/me").await?)
    }

    async fn update_details(
        &self,
        request: &UpdateDetailsRequest,
    ) -> Result<UserResponse, ClientError> {
        data(self.write(Method::PUT, "/auth/updatedetails", request).await?)
    }

    async fn update_password(
        &self,
        request: &UpdatePasswordRequest,
    ) -> Result<AuthPayload, ClientError> {
        authenticated(self.write(Method::PUT, "/auth/updatepassword", request).await?)
    }

    async fn list_posts(&self, query: &PostsQuery) -> Result<Paged<PostResponse>, ClientError> {
        let envelope: ApiResponse<Vec<PostResponse>> =
            self.send(self.request(Method::GET, "/posts").query(query)).await?;
        let total = envelope.total.unwrap_or_default();
        let pages = envelope.pages.unwrap_or_default();

        Ok(Paged {
            items: data(envelope)?,
            total,
            pages,
        })
    }

    async fn get_post(&self, id: Uuid) -> Result<PostResponse, ClientError> {
        data(self.get(&format!("/posts/{id}")).await?)
    }

    async fn create_post(
        &self,
        request: &CreatePostRequest,
    ) -> Result<PostResponse, ClientError> {
        data(self.write(Method::POST, "/posts", request).await?)
    }

    async fn update_post(
        &self,
        id: Uuid,
        request: &UpdatePostRequest,
    ) -> Result<PostResponse, ClientError> {
        data(self.write(Method::PUT, &format!("/posts/{id}"), request).await?)
    }

    async fn delete_post(&self, id: Uuid) -> Result<(), ClientError> {
        let _: ApiResponse<serde_json::Value> = self
            .send(self.request(Method::DELETE, &format!("/posts/{id}")))
            .await?;
        Ok(())
    }

    async fn toggle_like(&self, id: Uuid) -> Result<PostResponse, ClientError> {
        data(
            self.send(self.request(Method::POST, &format!("/posts/{id}/like")))
                .await?,
        )
    }

    async fn posts_by_category(
        &self,
        category_id: Uuid,
    ) -> Result<Vec<PostResponse>, ClientError> {
        data(self.get(&format!("/posts/category/{category_id}")).await?)
    }

    async fn list_categories(&self) -> Result<Vec<CategoryResponse>, ClientError> {
        data(self.get("/categories").await?)
    }

    async fn get_category(&self, id: Uuid) -> Result<CategoryResponse, ClientError> {
        data(self.get(&format!("/categories/{id}")).await?)
    }

    async fn create_category(
        &self,
        request: &CategoryRequest,
    ) -> Result<CategoryResponse, ClientError> {
        data(self.write(Method::POST, "/categories", request).await?)
    }

    async fn update_category(
        &self,
        id: Uuid,
        request: &CategoryRequest,
    ) -> Result<CategoryResponse, ClientError> {
        data(
            self.write(Method::PUT, &format!("/categories/{id}"), request)
                .await?,
        )
    }

    async fn delete_category(&self, id: Uuid) -> Result<(), ClientError> {
        let _: ApiResponse<serde_json::Value> = self
            .send(self.request(Method::DELETE, &format!("/categories/{id}")))
            .await?;
        Ok(())
    }

    async fn list_tags(&self) -> Result<Vec<TagResponse>, ClientError> {
        data(self.get("/tags").await?)
    }
}
