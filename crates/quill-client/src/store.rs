//! The state container views are handed.

use std::future::Future;
use std::sync::Arc;

use quill_shared::dto::{
    CategoryRequest, CreatePostRequest, LoginRequest, PostsQuery, RegisterUserRequest,
    UpdateDetailsRequest, UpdatePasswordRequest, UpdatePostRequest,
};
use tokio::sync::watch;
use uuid::Uuid;

use crate::actions::{self, ActionResult, Outcome};
use crate::api::BlogApi;
use crate::session::SessionStore;
use crate::state::BlogState;

/// Owns the [`BlogState`] and runs actions against it.
///
/// Every dispatch sets `loading`, awaits the action, merges its outcome into the
/// current state and clears `loading` once nothing else is pending. Subscribers see
/// each step through a watch channel.
pub struct Store {
    api: Arc<dyn BlogApi>,
    session: Arc<dyn SessionStore>,
    state: watch::Sender<BlogState>,
}

impl Store {
    /// Starts signed in when the session store holds a user.
    pub fn new(api: Arc<dyn BlogApi>, session: Arc<dyn SessionStore>) -> Self {
        let user = match session.load() {
            Ok(stored) => stored.map(|s| s.user),
            Err(err) => {
                tracing::warn!(error = %err, "Could not restore session");
                None
            }
        };

        let (state, _) = watch::channel(BlogState {
            user,
            ..Default::default()
        });
        Self {
            api,
            session,
            state,
        }
    }

    pub fn snapshot(&self) -> BlogState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<BlogState> {
        self.state.subscribe()
    }

    pub fn api(&self) -> &dyn BlogApi {
        self.api.as_ref()
    }

    async fn dispatch(&self, action: impl Future<Output = Outcome>) -> ActionResult {
        self.state.send_modify(|state| {
            state.pending += 1;
            state.loading = true;
        });

        let outcome = action.await;

        let mut result = Ok(());
        self.state.send_modify(|state| {
            let (mut next, applied) = actions::apply(std::mem::take(state), outcome);
            next.pending = next.pending.saturating_sub(1);
            next.loading = next.pending > 0;
            *state = next;
            result = applied;
        });
        result
    }

    pub async fn register(&self, request: RegisterUserRequest) -> ActionResult {
        self.dispatch(actions::register(self.api(), self.session.as_ref(), request))
            .await
    }

    pub async fn login(&self, request: LoginRequest) -> ActionResult {
        self.dispatch(actions::login(self.api(), self.session.as_ref(), request))
            .await
    }

    pub async fn logout(&self) -> ActionResult {
        let outcome = actions::logout(self.session.as_ref());
        self.dispatch(async { outcome }).await
    }

    pub async fn load_user(&self) -> ActionResult {
        self.dispatch(actions::load_user(self.api())).await
    }

    pub async fn update_details(&self, request: UpdateDetailsRequest) -> ActionResult {
        self.dispatch(actions::update_details(
            self.api(),
            self.session.as_ref(),
            request,
        ))
        .await
    }

    pub async fn update_password(&self, request: UpdatePasswordRequest) -> ActionResult {
        self.dispatch(actions::update_password(
            self.api(),
            self.session.as_ref(),
            request,
        ))
        .await
    }

    pub async fn load_posts(&self, query: PostsQuery) -> ActionResult {
        self.dispatch(actions::load_posts(self.api(), query)).await
    }

    /// Posts and categories side by side, as the home page needs them.
    pub async fn load_home(&self, query: PostsQuery) -> ActionResult {
        let (posts, categories) = futures::join!(self.load_posts(query), self.load_categories());
        posts.and(categories)
    }

    pub async fn load_category_posts(&self, category_id: Uuid) -> ActionResult {
        self.dispatch(actions::load_category_posts(self.api(), category_id))
            .await
    }

    pub async fn load_post(&self, id: Uuid) -> ActionResult {
        self.dispatch(actions::load_post(self.api(), id)).await
    }

    pub async fn create_post(&self, request: CreatePostRequest) -> ActionResult {
        self.dispatch(actions::create_post(self.api(), request)).await
    }

    pub async fn update_post(&self, id: Uuid, request: UpdatePostRequest) -> ActionResult {
        self.dispatch(actions::update_post(self.api(), id, request))
            .await
    }

    pub async fn delete_post(&self, id: Uuid) -> ActionResult {
        self.dispatch(actions::delete_post(self.api(), id)).await
    }

    pub async fn toggle_like(&self, id: Uuid) -> ActionResult {
        self.dispatch(actions::toggle_like(self.api(), id)).await
    }

    pub async fn load_categories(&self) -> ActionResult {
        self.dispatch(actions::load_categories(self.api())).await
    }

    pub async fn create_category(&self, request: CategoryRequest) -> ActionResult {
        self.dispatch(actions::create_category(self.api(), request))
            .await
    }

    pub async fn update_category(&self, id: Uuid, request: CategoryRequest) -> ActionResult {
        self.dispatch(actions::update_category(self.api(), id, request))
            .await
    }

    pub async fn delete_category(&self, id: Uuid) -> ActionResult {
        self.dispatch(actions::delete_category(self.api(), id)).await
    }
}
