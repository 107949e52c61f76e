//! Domain entities - the core business objects.

mod category;
mod post;
mod query;
mod tag;
mod user;

pub use category::{Category, CategoryFields};
pub use post::{NewPost, Post, PostChanges};
pub use query::{Page, PostQuery, PublishedFilter};
pub use tag::{Tag, TagFields};
pub use user::{Actor, Profile, Role, User};
