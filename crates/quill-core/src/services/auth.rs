//! Registration, login and self-service account updates.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::domain::{Actor, Profile, Role, User};
use crate::error::{DomainError, FieldViolation};
use crate::ports::{AuthError, PasswordService, TokenService, UserRepository};

/// Input for a new account.
#[derive(Debug, Clone)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// Mutable account fields. `None` leaves the field untouched.
#[derive(Debug, Clone, Default)]
pub struct DetailChanges {
    pub username: Option<String>,
    pub email: Option<String>,
    pub profile: Option<Profile>,
}

/// A user together with a freshly issued session token.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub user: User,
    pub token: String,
}

pub struct AuthService {
    users: Arc<dyn UserRepository>,
    passwords: Arc<dyn PasswordService>,
    tokens: Arc<dyn TokenService>,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        passwords: Arc<dyn PasswordService>,
        tokens: Arc<dyn TokenService>,
    ) -> Self {
        Self {
            users,
            passwords,
            tokens,
        }
    }

    pub async fn register(&self, registration: Registration) -> Result<AuthSession, DomainError> {
        let username = registration.username.trim().to_string();
        let email = normalize_email(&registration.email);

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(DomainError::Conflict("Email already registered".to_string()));
        }
        if self.users.find_by_username(&username).await?.is_some() {
            return Err(DomainError::Conflict("Username already taken".to_string()));
        }

        let password_hash = self.passwords.hash(&registration.password)?;
        let user = User::new(username, email, password_hash, registration.role);
        let user = self.users.create(user).await?;

        self.issue(user)
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<AuthSession, DomainError> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(DomainError::Validation(vec![FieldViolation::new(
                "email",
                "Please provide an email and password",
            )]));
        }

        let user = self
            .users
            .find_by_email(&normalize_email(email))
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !self.passwords.verify(password, &user.password_hash)? {
            return Err(AuthError::InvalidCredentials.into());
        }

        self.issue(user)
    }

    /// Resolve a session token to the user it was issued for.
    pub async fn current_user(&self, token: &str) -> Result<User, DomainError> {
        let claims = self.tokens.validate_token(token)?;
        self.user(claims.user_id).await
    }

    /// Load the account behind an authenticated identity.
    pub async fn user(&self, user_id: Uuid) -> Result<User, DomainError> {
        self.users.find_by_id(user_id).await?.ok_or_else(|| {
            DomainError::Unauthenticated("User no longer exists".to_string())
        })
    }

    pub async fn update_details(
        &self,
        actor: &Actor,
        changes: DetailChanges,
    ) -> Result<User, DomainError> {
        let mut user = self.user(actor.user_id).await?;

        if let Some(username) = changes.username {
            let username = username.trim().to_string();
            if username != user.username {
                let taken = self.users.find_by_username(&username).await?;
                if taken.is_some_and(|other| other.id != user.id) {
                    return Err(DomainError::Conflict("Username already taken".to_string()));
                }
                user.username = username;
            }
        }

        if let Some(email) = changes.email {
            let email = normalize_email(&email);
            if email != user.email {
                let taken = self.users.find_by_email(&email).await?;
                if taken.is_some_and(|other| other.id != user.id) {
                    return Err(DomainError::Conflict("Email already registered".to_string()));
                }
                user.email = email;
            }
        }

        if let Some(profile) = changes.profile {
            user.profile = profile;
        }

        user.updated_at = Utc::now();
        Ok(self.users.update(user).await?)
    }

    pub async fn update_password(
        &self,
        actor: &Actor,
        current_password: &str,
        new_password: &str,
    ) -> Result<AuthSession, DomainError> {
        let mut user = self.user(actor.user_id).await?;

        if !self.passwords.verify(current_password, &user.password_hash)? {
            return Err(DomainError::Unauthenticated(
                "Password is incorrect".to_string(),
            ));
        }

        user.password_hash = self.passwords.hash(new_password)?;
        user.updated_at = Utc::now();
        let user = self.users.update(user).await?;

        self.issue(user)
    }

    fn issue(&self, user: User) -> Result<AuthSession, DomainError> {
        let token = self.tokens.generate_token(user.id, user.role)?;
        Ok(AuthSession { user, token })
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
