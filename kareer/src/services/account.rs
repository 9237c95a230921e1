use chrono::Utc;
use uuid::Uuid;
use validator::ValidateEmail;

use crate::auth::{hash_password, issue_token, verify_password};
use crate::config::AuthConfig;
use crate::db::{Database, UserRepository};
use crate::error::{KareerError, Result};
use crate::models::{ContactKind, UserAccount};

#[derive(Debug)]
pub struct AuthOutcome {
    pub user_id: String,
    pub token: String,
}

/// Registration and login over the relational user store. The contact
/// string doubles as the login key: an email when it contains `@`,
/// otherwise a phone number.
pub struct AccountService {
    db: Database,
    auth: AuthConfig,
}

impl AccountService {
    pub fn new(db: Database, auth: AuthConfig) -> Self {
        Self { db, auth }
    }

    pub async fn register(
        &self,
        contact: &str,
        password: &str,
        username: Option<String>,
    ) -> Result<AuthOutcome> {
        if contact.trim().is_empty() || password.is_empty() {
            return Err(KareerError::Validation(
                "contact and password are required".to_string(),
            ));
        }

        let contact = contact.trim();
        let kind = ContactKind::classify(contact);
        if kind == ContactKind::Email && !contact.validate_email() {
            return Err(KareerError::Validation(format!(
                "'{contact}' is not a valid email address"
            )));
        }

        let conn = self.db.connect()?;

        if UserRepository::get_by_contact(&conn, contact).await?.is_some() {
            return Err(KareerError::Conflict(
                "An account with this contact already exists".to_string(),
            ));
        }

        let user = UserAccount {
            id: Uuid::new_v4().to_string(),
            username,
            email: (kind == ContactKind::Email).then(|| contact.to_string()),
            phone: (kind == ContactKind::Phone).then(|| contact.to_string()),
            password_hash: hash_password(password)?,
            created_at: Utc::now(),
        };

        UserRepository::create(&conn, &user).await.map_err(|e| {
            // Two registrations can race past the existence check; the
            // unique index turns the loser into a conflict.
            if e.to_string().contains("UNIQUE") {
                KareerError::Conflict("An account with this contact already exists".to_string())
            } else {
                e
            }
        })?;

        let token = issue_token(&user.id, &self.auth)?;
        tracing::info!(user_id = %user.id, "Registered new account");

        Ok(AuthOutcome {
            user_id: user.id,
            token,
        })
    }

    pub async fn login(&self, contact: &str, password: &str) -> Result<AuthOutcome> {
        if contact.trim().is_empty() || password.is_empty() {
            return Err(KareerError::Validation(
                "contact and password are required".to_string(),
            ));
        }

        let conn = self.db.connect()?;
        let user = UserRepository::get_by_contact(&conn, contact.trim())
            .await?
            .ok_or_else(|| {
                KareerError::NotFound("No account found for this contact".to_string())
            })?;

        if !verify_password(password, &user.password_hash) {
            return Err(KareerError::Auth("Invalid password".to_string()));
        }

        let token = issue_token(&user.id, &self.auth)?;

        Ok(AuthOutcome {
            user_id: user.id,
            token,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatabaseConfig;

    async fn service() -> AccountService {
        let db = Database::new(&DatabaseConfig {
            url: ":memory:".to_string(),
            auth_token: None,
            local_path: None,
        })
        .await
        .unwrap();

        AccountService::new(
            db,
            AuthConfig {
                jwt_secret: "test-secret".to_string(),
                token_ttl_secs: 3600,
            },
        )
    }

    #[tokio::test]
    async fn register_then_login_round_trips() {
        let service = service().await;

        let registered = service.register("a@b.com", "x", None).await.unwrap();
        assert!(!registered.token.is_empty());

        let logged_in = service.login("a@b.com", "x").await.unwrap();
        assert_eq!(logged_in.user_id, registered.user_id);
    }

    #[tokio::test]
    async fn duplicate_registration_conflicts() {
        let service = service().await;

        service.register("a@b.com", "x", None).await.unwrap();
        let err = service.register("a@b.com", "y", None).await.unwrap_err();
        assert!(matches!(err, KareerError::Conflict(_)));
    }

    #[tokio::test]
    async fn wrong_password_is_an_auth_failure() {
        let service = service().await;

        service.register("a@b.com", "x", None).await.unwrap();
        let err = service.login("a@b.com", "wrong").await.unwrap_err();
        assert!(matches!(err, KareerError::Auth(_)));
    }

    #[tokio::test]
    async fn unknown_contact_is_not_found() {
        let service = service().await;
        let err = service.login("ghost@b.com", "x").await.unwrap_err();
        assert!(matches!(err, KareerError::NotFound(_)));
    }

    #[tokio::test]
    async fn phone_contacts_register_into_the_phone_column() {
        let service = service().await;

        let registered = service
            .register("+15550100", "x", Some("phone-user".to_string()))
            .await
            .unwrap();

        let logged_in = service.login("+15550100", "x").await.unwrap();
        assert_eq!(logged_in.user_id, registered.user_id);
    }

    #[tokio::test]
    async fn invalid_email_is_rejected() {
        let service = service().await;
        let err = service.register("bad@", "x", None).await.unwrap_err();
        assert!(matches!(err, KareerError::Validation(_)));
    }

    #[tokio::test]
    async fn missing_fields_are_rejected() {
        let service = service().await;
        assert!(service.register("", "x", None).await.is_err());
        assert!(service.register("a@b.com", "", None).await.is_err());
        assert!(service.login("", "x").await.is_err());
    }
}
