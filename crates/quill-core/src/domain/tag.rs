use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::rules;

/// Tag entity. Names are stored lowercased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Writable tag fields.
#[derive(Debug, Clone, Default)]
pub struct TagFields {
    pub name: String,
    pub description: Option<String>,
}

impl Tag {
    pub fn new(fields: TagFields) -> Self {
        let now = Utc::now();
        let name = rules::normalize_tag_name(&fields.name);
        Self {
            id: Uuid::new_v4(),
            slug: rules::slugify(&name),
            name,
            description: fields.description,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, fields: TagFields) {
        let name = rules::normalize_tag_name(&fields.name);
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_name_is_lowercased() {
        let tag = Tag::new(TagFields {
            name: " Web Dev ".to_string(),
            description: None,
        });

        assert_eq!(tag.name, "web dev");
        assert_eq!(tag.slug, "web-dev");
    }
}
