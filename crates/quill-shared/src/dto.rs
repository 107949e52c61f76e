//! Data Transfer Objects - request/response types for the API.
//!
//! Requests carry their `garde` rule sets; JSON keys are camelCase throughout.

use chrono::{DateTime, Utc};
use garde::Validate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::validation::{
    identifier, optional_identifier, optional_username, required,
};

/// Request to register a new user.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct RegisterUserRequest {
    #[garde(custom(crate::validation::username))]
    pub username: String,
    #[garde(email)]
    pub email: String,
    #[garde(length(chars, min = 6))]
    pub password: String,
    #[garde(custom(crate::validation::role))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// Request to login. Presence is checked by the auth service.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct LoginRequest {
    #[garde(skip)]
    pub email: String,
    #[garde(skip)]
    pub password: String,
}

/// Public profile fields of an account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateDetailsRequest {
    #[garde(custom(optional_username))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[garde(email)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[garde(skip)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<ProfileData>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdatePasswordRequest {
    #[garde(custom(required))]
    pub current_password: String,
    #[garde(length(chars, min = 6))]
    pub new_password: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct CreatePostRequest {
    #[garde(custom(required), length(chars, max = 200))]
    pub title: String,
    #[garde(custom(required))]
    pub content: String,
    #[garde(length(chars, max = 500))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    /// Category id.
    #[garde(custom(identifier))]
    pub category: String,
    /// Tag names; unknown names are created on the fly.
    #[garde(inner(length(chars, max = 30)))]
    pub tags: Vec<String>,
    #[garde(skip)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published: Option<bool>,
    #[garde(skip)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured_image: Option<String>,
}

/// Partial post update; absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdatePostRequest {
    #[garde(length(chars, min = 1, max = 200))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[garde(length(chars, min = 1))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[garde(length(chars, max = 500))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[garde(custom(optional_identifier))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[garde(skip)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[garde(skip)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published: Option<bool>,
    #[garde(skip)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured_image: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct CategoryRequest {
    #[garde(custom(required), length(chars, max = 50))]
    pub name: String,
    #[garde(length(chars, max = 200))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct TagRequest {
    #[garde(custom(required), length(chars, max = 30))]
    pub name: String,
    #[garde(length(chars, max = 200))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Query string of `GET /api/posts`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PostsQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// `true`, `false` or `all`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published: Option<String>,
}

/// Response containing a user's public information. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub role: String,
    #[serde(default)]
    pub profile: ProfileData,
    pub created_at: DateTime<Utc>,
}

impl UserResponse {
    pub fn is_admin(&self) -> bool {
        self.role == "admin"
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorSummary {
    pub id: Uuid,
    pub username: String,
    #[serde(default)]
    pub profile: ProfileData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySummary {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagSummary {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponse {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagResponse {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A post with author, category and tags populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub excerpt: String,
    pub author: Option<AuthorSummary>,
    pub category: Option<CategorySummary>,
    pub tags: Vec<TagSummary>,
    pub published: bool,
    pub featured_image: Option<String>,
    pub read_time: i32,
    pub views: i64,
    pub likes: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PostResponse {
    pub fn is_authored_by(&self, user_id: Uuid) -> bool {
        self.author.as_ref().is_some_and(|author| author.id == user_id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub environment: String,
    /// `postgres` or `in-memory`.
    pub database: String,
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use crate::validation::check;

    use super::*;

    fn valid_post() -> CreatePostRequest {
        CreatePostRequest {
            title: "Hello".into(),
            content: "World".into(),
            category: Uuid::new_v4().to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_create_post_accepts_minimal_body() {
        assert!(check(&valid_post()).is_ok());
    }

    #[test]
    fn test_create_post_reports_each_field() {
        let request = CreatePostRequest {
            title: "x".repeat(201),
            content: "  ".into(),
            category: "not-an-id".into(),
            ..Default::default()
        };

        let errors = check(&request).unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();

        assert!(fields.contains(&"title"));
        assert!(fields.contains(&"content"));
        assert!(fields.contains(&"category"));
    }

    #[test]
    fn test_create_post_limits_tag_length() {
        let request = CreatePostRequest {
            tags: vec!["rust".into(), "t".repeat(31)],
            ..valid_post()
        };

        let errors = check(&request).unwrap_err();
        assert!(errors.iter().all(|e| e.field.starts_with("tags")));
    }

    #[test]
    fn test_register_rules() {
        let request = RegisterUserRequest {
            username: "jo".into(),
            email: "not-an-email".into(),
            password: "12345".into(),
            role: Some("root".into()),
        };

        assert_eq!(check(&request).unwrap_err().len(), 4);

        let request = RegisterUserRequest {
            username: "jane".into(),
            email: "jane@example.com".into(),
            password: "123456".into(),
            role: None,
        };
        assert!(check(&request).is_ok());
    }

    #[test]
    fn test_update_password_field_names_are_camel_case() {
        let errors = check(&UpdatePasswordRequest::default()).unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();

        assert_eq!(fields, vec!["currentPassword", "newPassword"]);
    }

    #[test]
    fn test_category_name_limit() {
        let request = CategoryRequest {
            name: "n".repeat(51),
            description: None,
        };
        assert!(check(&request).is_err());
    }

    #[test]
    fn test_request_body_deserializes_camel_case() {
        let request: CreatePostRequest = serde_json::from_str(
            r#"{"title":"T","content":"C","category":"c","featuredImage":"a.png"}"#,
        )
        .unwrap();

        assert_eq!(request.featured_image.as_deref(), Some("a.png"));
        assert!(request.tags.is_empty());
    }
}
