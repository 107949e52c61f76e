//! Category manager. Every write is admin-only.

use std::sync::Arc;

use uuid::Uuid;

use super::{require_role, require_slug};
use crate::domain::{Actor, Category, CategoryFields, Role};
use crate::error::DomainError;
use crate::ports::{CategoryRepository, PostRepository};

pub struct CategoryService {
    categories: Arc<dyn CategoryRepository>,
    posts: Arc<dyn PostRepository>,
}

impl CategoryService {
    pub fn new(categories: Arc<dyn CategoryRepository>, posts: Arc<dyn PostRepository>) -> Self {
        Self { categories, posts }
    }

    pub async fn list(&self) -> Result<Vec<Category>, DomainError> {
        Ok(self.categories.find_all().await?)
    }

    pub async fn get(&self, id: Uuid) -> Result<Category, DomainError> {
        self.categories
            .find_by_id(id)
            .await?
            .ok_or(DomainError::NotFound("Category"))
    }

    pub async fn create(
        &self,
        actor: &Actor,
        fields: CategoryFields,
    ) -> Result<Category, DomainError> {
        require_role(actor, Role::Admin)?;

        let category = Category::new(fields, actor.user_id);
        require_slug("name", &category.slug)?;
        self.ensure_unique(&category).await?;

        Ok(self.categories.create(category).await?)
    }

    pub async fn update(
        &self,
        id: Uuid,
        actor: &Actor,
        fields: CategoryFields,
    ) -> Result<Category, DomainError> {
        require_role(actor, Role::Admin)?;

        let mut category = self.get(id).await?;
        category.apply(fields);
        require_slug("name", &category.slug)?;
        self.ensure_unique(&category).await?;

        Ok(self.categories.update(category).await?)
    }

    /// Remove a category. Categories that still hold posts are kept.
    pub async fn delete(&self, id: Uuid, actor: &Actor) -> Result<(), DomainError> {
        require_role(actor, Role::Admin)?;

        let category = self.get(id).await?;
        if self.posts.count_by_category(category.id).await? > 0 {
            return Err(DomainError::Conflict(
                "Category still has posts and cannot be deleted".to_string(),
            ));
        }

        self.categories.delete(category.id).await?;
        Ok(())
    }

    async fn ensure_unique(&self, category: &Category) -> Result<(), DomainError> {
        let by_name = self.categories.find_by_name(&category.name).await?;
        let by_slug = self.categories.find_by_slug(&category.slug).await?;

        if by_name
            .into_iter()
            .chain(by_slug)
            .any(|other| other.id != category.id)
        {
            return Err(DomainError::Conflict("Category already exists".to_string()));
        }
        Ok(())
    }
}
