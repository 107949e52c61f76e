use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::rules;

/// Category entity - groups posts under an admin-curated heading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Writable category fields.
#[derive(Debug, Clone, Default)]
pub struct CategoryFields {
    pub name: String,
    pub description: Option<String>,
}

impl Category {
    pub fn new(fields: CategoryFields, created_by: Uuid) -> Self {
        let now = Utc::now();
        let name = fields.name.trim().to_string();
        Self {
            id: Uuid::new_v4(),
            slug: rules::slugify(&name),
            name,
            description: fields.description,
            created_by,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite the name (re-deriving the slug) and, when given, the description.
    pub fn apply(&mut self, fields: CategoryFields) {
        let name = fields.name.trim().to_string();
        if name != self.name {
            self.slug = rules::slugify(&name);
            self.name = name;
        }
        if fields.description.is_some() {
            self.description = fields.description;
        }
        self.updated_at = Utc::now();
    }
}
