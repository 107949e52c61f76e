//! Tag manager. Every explicit write is admin-only; authors create tags implicitly
//! by naming them on a post.

use std::sync::Arc;

use uuid::Uuid;

use super::{require_role, require_slug};
use crate::domain::{Actor, Role, Tag, TagFields};
use crate::error::DomainError;
use crate::ports::TagRepository;

pub struct TagService {
    tags: Arc<dyn TagRepository>,
}

impl TagService {
    pub fn new(tags: Arc<dyn TagRepository>) -> Self {
        Self { tags }
    }

    pub async fn list(&self) -> Result<Vec<Tag>, DomainError> {
        Ok(self.tags.find_all().await?)
    }

    pub async fn get(&self, id: Uuid) -> Result<Tag, DomainError> {
        self.tags
            .find_by_id(id)
            .await?
            .ok_or(DomainError::NotFound("Tag"))
    }

    pub async fn create(&self, actor: &Actor, fields: TagFields) -> Result<Tag, DomainError> {
        require_role(actor, Role::Admin)?;

        let tag = Tag::new(fields);
        require_slug("name", &tag.slug)?;
        self.ensure_unique(&tag).await?;

        Ok(self.tags.create(tag).await?)
    }

    pub async fn update(
        &self,
        id: Uuid,
        actor: &Actor,
        fields: TagFields,
    ) -> Result<Tag, DomainError> {
        require_role(actor, Role::Admin)?;

        let mut tag = self.get(id).await?;
        tag.apply(fields);
        require_slug("name", &tag.slug)?;
        self.ensure_unique(&tag).await?;

        Ok(self.tags.update(tag).await?)
    }

    pub async fn delete(&self, id: Uuid, actor: &Actor) -> Result<(), DomainError> {
        require_role(actor, Role::Admin)?;

        let tag = self.get(id).await?;
        self.tags.delete(tag.id).await?;
        Ok(())
    }

    async fn ensure_unique(&self, tag: &Tag) -> Result<(), DomainError> {
        let by_name = self.tags.find_by_name(&tag.name).await?;
        let by_slug = self.tags.find_by_slug(&tag.slug).await?;

        if by_name
            .into_iter()
            .chain(by_slug)
            .any(|other| other.id != tag.id)
        {
            return Err(DomainError::Conflict("Tag already exists".to_string()));
        }
        Ok(())
    }
}
