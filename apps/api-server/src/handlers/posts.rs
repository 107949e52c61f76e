//! Post handlers.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use quill_core::domain::{NewPost, PostChanges, PostQuery, PublishedFilter};
use quill_shared::dto::{CreatePostRequest, PostsQuery, UpdatePostRequest};
use quill_shared::{ApiResponse, Empty, FieldError};

use super::present;
use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::middleware::validation::ValidatedJson;
use crate::state::AppState;

fn invalid(field: &str, message: impl Into<String>) -> AppError {
    AppError::Validation(vec![FieldError::new(field, message)])
}

fn parse_id(field: &str, raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw.trim()).map_err(|_| invalid(field, "is not a valid id"))
}

/// Turn the raw query string into a listing query. Out-of-range values are rejected.
fn post_query(raw: PostsQuery) -> AppResult<PostQuery> {
    let published = match raw.published.as_deref() {
        None => PublishedFilter::default(),
        Some(value) => value
            .parse()
            .map_err(|message: String| invalid("published", message))?,
    };

    let category = match raw.category.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(id) => Some(parse_id("category", id)?),
    };

    let page = raw.page.unwrap_or(1);
    if page == 0 {
        return Err(invalid("page", "must be at least 1"));
    }

    let limit = raw.limit.unwrap_or(PostQuery::DEFAULT_LIMIT);
    if !(1..=PostQuery::MAX_LIMIT).contains(&limit) {
        return Err(invalid(
            "limit",
            format!("must be between 1 and {}", PostQuery::MAX_LIMIT),
        ));
    }

    let query = PostQuery {
        published,
        category,
        search: raw.search,
        page,
        limit,
    };
    if !query.offset_in_range() {
        return Err(invalid("page", "is too large"));
    }

    Ok(query)
}

/// GET /api/posts
pub async fn list(
    state: web::Data<AppState>,
    query: web::Query<PostsQuery>,
) -> AppResult<HttpResponse> {
    let query = post_query(query.into_inner())?;
    let page = state.posts.list(&query).await?;
    let pages = page.pages();

    Ok(HttpResponse::Ok().json(ApiResponse::paged(
        page.items.into_iter().map(present::post).collect(),
        page.total,
        pages,
    )))
}

/// GET /api/posts/{id} - counts as a view.
pub async fn get(state: web::Data<AppState>, id: web::Path<Uuid>) -> AppResult<HttpResponse> {
    let post = state.posts.get(id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(present::post(post))))
}

/// POST /api/posts
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    body: ValidatedJson<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let fields = NewPost {
        category_id: parse_id("category", &req.category)?,
        title: req.title,
        content: req.content,
        excerpt: req.excerpt,
        tags: req.tags,
        published: req.published.unwrap_or(false),
        featured_image: req.featured_image,
    };

    let post = state.posts.create(&identity.actor(), fields).await?;
    tracing::info!(post_id = %post.post.id, author_id = %identity.user.id, "Post created");

    Ok(HttpResponse::Created().json(ApiResponse::ok(present::post(post))))
}

/// PUT /api/posts/{id} - author or admin.
pub async fn update(
    state: web::Data<AppState>,
    identity: Identity,
    id: web::Path<Uuid>,
    body: ValidatedJson<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let changes = PostChanges {
        category_id: req
            .category
            .as_deref()
            .map(|id| parse_id("category", id))
            .transpose()?,
        title: req.title,
        content: req.content,
        excerpt: req.excerpt,
        tags: req.tags,
        published: req.published,
        featured_image: req.featured_image,
    };

    let post = state
        .posts
        .update(id.into_inner(), &identity.actor(), changes)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(present::post(post))))
}

/// DELETE /api/posts/{id} - author or admin.
pub async fn delete(
    state: web::Data<AppState>,
    identity: Identity,
    id: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = id.into_inner();
    state.posts.delete(id, &identity.actor()).await?;
    tracing::info!(post_id = %id, "Post deleted");

    Ok(HttpResponse::Ok().json(ApiResponse::ok(Empty {})))
}

/// GET /api/posts/category/{id} - published posts only.
pub async fn by_category(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let posts = state.posts.list_by_category(id.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::list(
        posts.into_iter().map(present::post).collect(),
    )))
}

/// POST /api/posts/{id}/like - likes, or withdraws an existing like.
pub async fn toggle_like(
    state: web::Data<AppState>,
    identity: Identity,
    id: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post = state
        .posts
        .toggle_like(id.into_inner(), &identity.actor())
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(present::post(post))))
}
