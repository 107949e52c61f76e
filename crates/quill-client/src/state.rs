//! Client-side state and its merge rules.

use quill_shared::dto::{CategoryResponse, PostResponse, UserResponse};
use uuid::Uuid;

/// Everything the views render from. Only the session outlives the process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlogState {
    pub user: Option<UserResponse>,
    pub posts: Vec<PostResponse>,
    pub current_post: Option<PostResponse>,
    pub categories: Vec<CategoryResponse>,
    pub total_posts: u64,
    pub pages: u64,
    pub loading: bool,
    pub error: Option<String>,
    /// Actions in flight; `loading` is set while any are pending.
    pub(crate) pending: usize,
}

/// Entities merged into state by id.
pub trait Keyed {
    fn key(&self) -> Uuid;
}

impl Keyed for PostResponse {
    fn key(&self) -> Uuid {
        self.id
    }
}

impl Keyed for CategoryResponse {
    fn key(&self) -> Uuid {
        self.id
    }
}

/// Put `item` first, dropping any stale copy.
pub fn prepend<T: Keyed>(items: &mut Vec<T>, item: T) {
    items.retain(|existing| existing.key() != item.key());
    items.insert(0, item);
}

/// Swap `item` in at the position of its stale copy. Unknown items are ignored.
pub fn replace<T: Keyed>(items: &mut [T], item: T) {
    if let Some(slot) = items.iter_mut().find(|existing| existing.key() == item.key()) {
        *slot = item;
    }
}

pub fn remove<T: Keyed>(items: &mut Vec<T>, id: Uuid) -> bool {
    let before = items.len();
    items.retain(|existing| existing.key() != id);
    items.len() != before
}

impl BlogState {
    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(UserResponse::is_admin)
    }

    /// Mirrors the server's gate: the author or an admin.
    pub fn can_modify(&self, post: &PostResponse) -> bool {
        match &self.user {
            Some(user) => user.is_admin() || post.is_authored_by(user.id),
            None => false,
        }
    }

    pub fn category_name(&self, id: Uuid) -> Option<&str> {
        self.categories
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.name.as_str())
    }

    pub(crate) fn post_created(&mut self, post: PostResponse) {
        prepend(&mut self.posts, post);
        self.total_posts += 1;
    }

    pub(crate) fn post_changed(&mut self, post: PostResponse) {
        if self.current_post.as_ref().is_some_and(|p| p.id == post.id) {
            self.current_post = Some(post.clone());
        }
        replace(&mut self.posts, post);
    }

    pub(crate) fn post_removed(&mut self, id: Uuid) {
        if remove(&mut self.posts, id) {
            self.total_posts = self.total_posts.saturating_sub(1);
        }
        if self.current_post.as_ref().is_some_and(|p| p.id == id) {
            self.current_post = None;
        }
    }

    pub(crate) fn category_created(&mut self, category: CategoryResponse) {
        prepend(&mut self.categories, category);
    }

    pub(crate) fn category_changed(&mut self, category: CategoryResponse) {
        replace(&mut self.categories, category);
    }

    pub(crate) fn category_removed(&mut self, id: Uuid) {
        remove(&mut self.categories, id);
    }

    pub(crate) fn signed_out(&mut self) {
        self.user = None;
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use chrono::Utc;

    use super::*;

    pub(crate) fn post(title: &str) -> PostResponse {
        PostResponse {
            id: Uuid::new_v4(),
            title: title.to_string(),
            slug: title.to_lowercase().replace(' ', "-"),
            content: format!("{title} body"),
            excerpt: format!("{title} body..."),
            author: None,
            category: None,
            tags: Vec::new(),
            published: true,
            featured_image: None,
            read_time: 1,
            views: 0,
            likes: Vec::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    pub(crate) fn category(name: &str) -> CategoryResponse {
        CategoryResponse {
            id: Uuid::new_v4(),
            name: name.to_string(),
            slug: name.to_lowercase(),
            description: None,
            created_by: Uuid::new_v4(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_created_post_goes_first() {
        let mut state = BlogState {
            posts: vec![post("Old")],
            total_posts: 1,
            ..Default::default()
        };

        state.post_created(post("New"));

        assert_eq!(state.posts[0].title, "New");
        assert_eq!(state.total_posts, 2);
    }

    #[test]
    fn test_update_replaces_in_place() {
        let (a, b, c) = (post("A"), post("B"), post("C"));
        let mut state = BlogState {
            posts: vec![a.clone(), b.clone(), c.clone()],
            current_post: Some(b.clone()),
            ..Default::default()
        };

        let edited = PostResponse {
            title: "B2".to_string(),
            ..b
        };
        state.post_changed(edited);

        let titles: Vec<_> = state.posts.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "B2", "C"]);
        assert_eq!(state.current_post.unwrap().title, "B2");
    }

    #[test]
    fn test_update_of_unloaded_post_is_ignored() {
        let mut state = BlogState {
            posts: vec![post("A")],
            ..Default::default()
        };

        state.post_changed(post("Elsewhere"));

        assert_eq!(state.posts.len(), 1);
        assert_eq!(state.posts[0].title, "A");
    }

    #[test]
    fn test_remove_post() {
        let doomed = post("Doomed");
        let mut state = BlogState {
            posts: vec![post("Keep"), doomed.clone()],
            current_post: Some(doomed.clone()),
            total_posts: 2,
            ..Default::default()
        };

        state.post_removed(doomed.id);

        assert_eq!(state.posts.len(), 1);
        assert_eq!(state.total_posts, 1);
        assert!(state.current_post.is_none());
    }

    #[test]
    fn test_category_merges() {
        let tech = category("Tech");
        let mut state = BlogState::default();

        state.category_created(tech.clone());
        state.category_changed(CategoryResponse {
            name: "Technology".to_string(),
            ..tech.clone()
        });
        assert_eq!(state.category_name(tech.id), Some("Technology"));

        state.category_removed(tech.id);
        assert!(state.categories.is_empty());
    }
}
