//! Actions: plain async functions over the API.
//!
//! Each action performs its request and yields an [`Outcome`]; [`apply`] folds an
//! outcome into a state, returning the new state and the [`ActionResult`]. The
//! [`Store`](crate::Store) applies outcomes to whatever state is current when the
//! request resolves, so actions in flight at the same time do not overwrite each
//! other.

use quill_shared::dto::{
    CategoryRequest, CategoryResponse, CreatePostRequest, LoginRequest, PostResponse, PostsQuery,
    RegisterUserRequest, UpdateDetailsRequest, UpdatePasswordRequest, UpdatePostRequest,
    UserResponse,
};
use uuid::Uuid;

use crate::api::{AuthPayload, BlogApi, Paged};
use crate::error::ClientError;
use crate::session::{Session, SessionStore};
use crate::state::BlogState;

pub type ActionResult = Result<(), ClientError>;

/// What an action produced.
#[derive(Debug)]
pub enum Outcome {
    SignedIn(UserResponse),
    SignedOut,
    Profile(UserResponse),
    Posts(Paged<PostResponse>),
    CategoryPosts(Vec<PostResponse>),
    PostLoaded(PostResponse),
    PostCreated(PostResponse),
    PostUpdated(PostResponse),
    PostDeleted(Uuid),
    Categories(Vec<CategoryResponse>),
    CategoryCreated(CategoryResponse),
    CategoryUpdated(CategoryResponse),
    CategoryDeleted(Uuid),
    Failed(ClientError),
}

impl From<ClientError> for Outcome {
    fn from(err: ClientError) -> Self {
        Outcome::Failed(err)
    }
}

/// Fold `outcome` into `state`. Failures record their message and keep the data.
pub fn apply(mut state: BlogState, outcome: Outcome) -> (BlogState, ActionResult) {
    match outcome {
        Outcome::Failed(err) => {
            if err.is_unauthorized() {
                state.signed_out();
            }
            state.error = Some(err.to_string());
            return (state, Err(err));
        }
        Outcome::SignedIn(user) | Outcome::Profile(user) => state.user = Some(user),
        Outcome::SignedOut => state.signed_out(),
        Outcome::Posts(page) => {
            state.posts = page.items;
            state.total_posts = page.total;
            state.pages = page.pages;
        }
        Outcome::CategoryPosts(posts) => {
            state.total_posts = posts.len() as u64;
            state.pages = 1;
            state.posts = posts;
        }
        Outcome::PostLoaded(post) => {
            state.current_post = Some(post.clone());
            state.post_changed(post);
        }
        Outcome::PostCreated(post) => state.post_created(post),
        Outcome::PostUpdated(post) => state.post_changed(post),
        Outcome::PostDeleted(id) => state.post_removed(id),
        Outcome::Categories(categories) => state.categories = categories,
        Outcome::CategoryCreated(category) => state.category_created(category),
        Outcome::CategoryUpdated(category) => state.category_changed(category),
        Outcome::CategoryDeleted(id) => state.category_removed(id),
    }

    state.error = None;
    (state, Ok(()))
}

fn remember(session: &dyn SessionStore, auth: AuthPayload) -> Outcome {
    let stored = Session {
        token: auth.token,
        user: auth.user.clone(),
    };
    match session.save(&stored) {
        Ok(()) => Outcome::SignedIn(auth.user),
        Err(err) => err.into(),
    }
}

pub async fn register(
    api: &dyn BlogApi,
    session: &dyn SessionStore,
    request: RegisterUserRequest,
) -> Outcome {
    match api.register(&request).await {
        Ok(auth) => remember(session, auth),
        Err(err) => err.into(),
    }
}

pub async fn login(api: &dyn BlogApi, session: &dyn SessionStore, request: LoginRequest) -> Outcome {
    match api.login(&request).await {
        Ok(auth) => remember(session, auth),
        Err(err) => err.into(),
    }
}

pub fn logout(session: &dyn SessionStore) -> Outcome {
    match session.clear() {
        Ok(()) => Outcome::SignedOut,
        Err(err) => err.into(),
    }
}

pub async fn load_user(api: &dyn BlogApi) -> Outcome {
    match api.me().await {
        Ok(user) => Outcome::Profile(user),
        Err(err) => err.into(),
    }
}

/// Update profile fields; the persisted user follows so a restart shows the new name.
pub async fn update_details(
    api: &dyn BlogApi,
    session: &dyn SessionStore,
    request: UpdateDetailsRequest,
) -> Outcome {
    let user = match api.update_details(&request).await {
        Ok(user) => user,
        Err(err) => return err.into(),
    };

    let saved = match session.load() {
        Ok(Some(current)) => session.save(&Session {
            token: current.token,
            user: user.clone(),
        }),
        Ok(None) => Ok(()),
        Err(err) => Err(err),
    };
    match saved {
        Ok(()) => Outcome::Profile(user),
        Err(err) => err.into(),
    }
}

pub async fn update_password(
    api: &dyn BlogApi,
    session: &dyn SessionStore,
    request: UpdatePasswordRequest,
) -> Outcome {
    match api.update_password(&request).await {
        Ok(auth) => remember(session, auth),
        Err(err) => err.into(),
    }
}

pub async fn load_posts(api: &dyn BlogApi, query: PostsQuery) -> Outcome {
    match api.list_posts(&query).await {
        Ok(page) => Outcome::Posts(page),
        Err(err) => err.into(),
    }
}

pub async fn load_category_posts(api: &dyn BlogApi, category_id: Uuid) -> Outcome {
    match api.posts_by_category(category_id).await {
        Ok(posts) => Outcome::CategoryPosts(posts),
        Err(err) => err.into(),
    }
}

/// Fetch one post. The server counts this as a view.
pub async fn load_post(api: &dyn BlogApi, id: Uuid) -> Outcome {
    match api.get_post(id).await {
        Ok(post) => Outcome::PostLoaded(post),
        Err(err) => err.into(),
    }
}

pub async fn create_post(api: &dyn BlogApi, request: CreatePostRequest) -> Outcome {
    match api.create_post(&request).await {
        Ok(post) => Outcome::PostCreated(post),
        Err(err) => err.into(),
    }
}

pub async fn update_post(api: &dyn BlogApi, id: Uuid, request: UpdatePostRequest) -> Outcome {
    match api.update_post(id, &request).await {
        Ok(post) => Outcome::PostUpdated(post),
        Err(err) => err.into(),
    }
}

pub async fn delete_post(api: &dyn BlogApi, id: Uuid) -> Outcome {
    match api.delete_post(id).await {
        Ok(()) => Outcome::PostDeleted(id),
        Err(err) => err.into(),
    }
}

pub async fn toggle_like(api: &dyn BlogApi, id: Uuid) -> Outcome {
    match api.toggle_like(id).await {
        Ok(post) => Outcome::PostUpdated(post),
        Err(err) => err.into(),
    }
}

pub async fn load_categories(api: &dyn BlogApi) -> Outcome {
    match api.list_categories().await {
        Ok(categories) => Outcome::Categories(categories),
        Err(err) => err.into(),
    }
}

pub async fn create_category(api: &dyn BlogApi, request: CategoryRequest) -> Outcome {
    match api.create_category(&request).await {
        Ok(category) => Outcome::CategoryCreated(category),
        Err(err) => err.into(),
    }
}

pub async fn update_category(api: &dyn BlogApi, id: Uuid, request: CategoryRequest) -> Outcome {
    match api.update_category(id, &request).await {
        Ok(category) => Outcome::CategoryUpdated(category),
        Err(err) => err.into(),
    }
}

pub async fn delete_category(api: &dyn BlogApi, id: Uuid) -> Outcome {
    match api.delete_category(id).await {
        Ok(()) => Outcome::CategoryDeleted(id),
        Err(err) => err.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::tests::post;

    #[test]
    fn test_failure_keeps_prior_state() {
        let state = BlogState {
            posts: vec![post("Kept")],
            ..Default::default()
        };

        let (next, result) = apply(
            state.clone(),
            Outcome::Failed(ClientError::Api {
                status: 409,
                message: "A post with this title already exists".to_string(),
                errors: Vec::new(),
            }),
        );

        assert!(result.is_err());
        assert_eq!(next.posts, state.posts);
        assert_eq!(
            next.error.as_deref(),
            Some("A post with this title already exists")
        );
    }

    #[test]
    fn test_success_clears_previous_error() {
        let state = BlogState {
            error: Some("earlier".to_string()),
            ..Default::default()
        };

        let (next, result) = apply(state, Outcome::PostCreated(post("Fresh")));

        assert!(result.is_ok());
        assert!(next.error.is_none());
        assert_eq!(next.posts.len(), 1);
    }

    #[test]
    fn test_unauthorized_signs_out() {
        let state = BlogState {
            user: Some(crate::session::tests::user("user")),
            ..Default::default()
        };

        let (next, _) = apply(
            state,
            Outcome::Failed(ClientError::Unauthorized("Not authorized".to_string())),
        );

        assert!(!next.is_signed_in());
    }

    #[test]
    fn test_loaded_post_becomes_current_and_refreshes_list() {
        let listed = post("Listed");
        let state = BlogState {
            posts: vec![listed.clone()],
            ..Default::default()
        };
        let fetched = PostResponse {
            views: 7,
            ..listed.clone()
        };

        let (next, _) = apply(state, Outcome::PostLoaded(fetched));

        assert_eq!(next.current_post.as_ref().map(|p| p.views), Some(7));
        assert_eq!(next.posts[0].views, 7);
    }
}
