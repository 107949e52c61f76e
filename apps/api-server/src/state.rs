//! Application state - shared across all handlers.

use std::sync::Arc;

use quill_core::ports::{
    CategoryRepository, PasswordService, PostRepository, TagRepository, TokenService,
    UserRepository,
};
use quill_core::services::{AuthService, CategoryService, PostService, TagService};
use quill_infra::{
    Argon2PasswordService, InMemoryCategoryRepository, InMemoryPostRepository,
    InMemoryTagRepository, InMemoryUserRepository, JwtTokenService,
};

use crate::config::AppConfig;

#[cfg(feature = "postgres")]
use quill_infra::database::{
    DatabaseConnections, PostgresCategoryRepository, PostgresPostRepository,
    PostgresTagRepository, PostgresUserRepository,
};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub posts: Arc<PostService>,
    pub categories: Arc<CategoryService>,
    pub tags: Arc<TagService>,
    pub environment: String,
    #[cfg(feature = "postgres")]
    pub db: Option<Arc<DatabaseConnections>>,
}

/// One store backend, seen through the repository ports.
struct Repositories {
    users: Arc<dyn UserRepository>,
    posts: Arc<dyn PostRepository>,
    categories: Arc<dyn CategoryRepository>,
    tags: Arc<dyn TagRepository>,
}

impl Repositories {
    fn in_memory() -> Self {
        Self {
            users: Arc::new(InMemoryUserRepository::new()),
            posts: Arc::new(InMemoryPostRepository::new()),
            categories: Arc::new(InMemoryCategoryRepository::new()),
            tags: Arc::new(InMemoryTagRepository::new()),
        }
    }

    #[cfg(feature = "postgres")]
    fn postgres(connections: &DatabaseConnections) -> Self {
        let db = &connections.main;
        Self {
            users: Arc::new(PostgresUserRepository::new(db.clone())),
            posts: Arc::new(PostgresPostRepository::new(db.clone())),
            categories: Arc::new(PostgresCategoryRepository::new(db.clone())),
            tags: Arc::new(PostgresTagRepository::new(db.clone())),
        }
    }
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Self {
        #[cfg(feature = "postgres")]
        let (db, repositories) = match &config.database {
            Some(db_config) => match DatabaseConnections::init(db_config).await {
                Ok(connections) => {
                    let repositories = Repositories::postgres(&connections);
                    (Some(Arc::new(connections)), repositories)
                }
                Err(e) => {
                    tracing::error!(
                        "Failed to connect to database: {}. Using in-memory fallback.",
                        e
                    );
                    (None, Repositories::in_memory())
                }
            },
            None => {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                (None, Repositories::in_memory())
            }
        };

        #[cfg(not(feature = "postgres"))]
        let repositories = {
            tracing::info!("Running without postgres feature - using in-memory repositories");
            Repositories::in_memory()
        };

        #[allow(unused_mut)]
        let mut state = Self::assemble(
            repositories,
            JwtTokenService::new(config.jwt.clone()),
            config.environment.clone(),
        );
        #[cfg(feature = "postgres")]
        {
            state.db = db;
        }

        tracing::info!("Application state initialized");
        state
    }

    /// Fresh in-memory state, as used by the HTTP tests.
    #[cfg(test)]
    pub fn in_memory(jwt: quill_infra::JwtConfig) -> Self {
        Self::assemble(
            Repositories::in_memory(),
            JwtTokenService::new(jwt),
            "test".to_string(),
        )
    }

    fn assemble(
        repositories: Repositories,
        tokens: JwtTokenService,
        environment: String,
    ) -> Self {
        let Repositories {
            users,
            posts,
            categories,
            tags,
        } = repositories;

        let passwords: Arc<dyn PasswordService> = Arc::new(Argon2PasswordService::new());
        let tokens: Arc<dyn TokenService> = Arc::new(tokens);

        Self {
            auth: Arc::new(AuthService::new(users.clone(), passwords, tokens)),
            posts: Arc::new(PostService::new(
                posts.clone(),
                categories.clone(),
                tags.clone(),
                users,
            )),
            categories: Arc::new(CategoryService::new(categories, posts)),
            tags: Arc::new(TagService::new(tags)),
            environment,
            #[cfg(feature = "postgres")]
            db: None,
        }
    }

    /// Which store backs the repositories, for the health report.
    pub fn store_kind(&self) -> &'static str {
        #[cfg(feature = "postgres")]
        {
            if self.db.is_some() {
                return "postgres";
            }
        }
        "in-memory"
    }
}
