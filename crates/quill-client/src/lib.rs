//! # Quill Client
//!
//! Client side of the Quill blog platform: a typed API client with the session
//! interceptor, persisted session storage, the [`Store`] state container and the
//! text views rendered from its state.

pub mod actions;
pub mod api;
pub mod error;
pub mod routes;
pub mod session;
pub mod state;
pub mod store;
pub mod views;

#[cfg(test)]
mod testing;

pub use actions::{ActionResult, Outcome};
pub use api::{AuthPayload, BlogApi, HttpBlogApi, Paged};
pub use error::ClientError;
pub use routes::{Navigator, Route};
pub use session::{FileSessionStore, MemorySessionStore, Session, SessionStore};
pub use state::BlogState;
pub use store::Store;
