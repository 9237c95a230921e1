use chrono::{DateTime, Utc};
use libsql::{params, Connection, Row};

use crate::error::{KareerError, Result};
use crate::models::{ContactKind, UserAccount};

pub struct UserRepository;

impl UserRepository {
    pub async fn create(conn: &Connection, user: &UserAccount) -> Result<()> {
        conn.execute(
            r#"
            INSERT INTO users (id, username, email, phone, password_hash, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![
                user.id.clone(),
                user.username.clone(),
                user.email.clone(),
                user.phone.clone(),
                user.password_hash.clone(),
                user.created_at.to_rfc3339(),
            ],
        )
        .await?;

        Ok(())
    }

    pub async fn get_by_id(conn: &Connection, id: &str) -> Result<Option<UserAccount>> {
        let mut rows = conn
            .query(
                "SELECT id, username, email, phone, password_hash, created_at FROM users WHERE id = ?1",
                params![id],
            )
            .await?;

        match rows.next().await? {
            Some(row) => Ok(Some(Self::row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    /// Look up by whichever contact field the value belongs to.
    pub async fn get_by_contact(conn: &Connection, contact: &str) -> Result<Option<UserAccount>> {
        let column = match ContactKind::classify(contact) {
            ContactKind::Email => "email",
            ContactKind::Phone => "phone",
        };

        let sql = format!(
            "SELECT id, username, email, phone, password_hash, created_at FROM users WHERE {column} = ?1"
        );
        let mut rows = conn.query(&sql, params![contact]).await?;

        match rows.next().await? {
            Some(row) => Ok(Some(Self::row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    fn row_to_user(row: &Row) -> Result<UserAccount> {
        let created_at_raw: String = row.get(5)?;
        let created_at: DateTime<Utc> = created_at_raw
            .parse()
            .map_err(|e| KareerError::Internal(format!("Invalid created_at timestamp: {e}")))?;

        Ok(UserAccount {
            id: row.get(0)?,
            username: row.get::<Option<String>>(1)?,
            email: row.get::<Option<String>>(2)?,
            phone: row.get::<Option<String>>(3)?,
            password_hash: row.get(4)?,
            created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;

    async fn test_db() -> Database {
        Database::new(&crate::config::DatabaseConfig {
            url: ":memory:".to_string(),
            auth_token: None,
            local_path: None,
        })
        .await
        .unwrap()
    }

    fn email_user(id: &str, email: &str) -> UserAccount {
        UserAccount {
            id: id.to_string(),
            username: Some("tester".to_string()),
            email: Some(email.to_string()),
            phone: None,
            password_hash: "hash".to_string(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn create_and_fetch_by_id() {
        let db = test_db().await;
        let conn = db.connect().unwrap();

        let user = email_user("u1", "a@b.com");
        UserRepository::create(&conn, &user).await.unwrap();

        let fetched = UserRepository::get_by_id(&conn, "u1").await.unwrap().unwrap();
        assert_eq!(fetched.email.as_deref(), Some("a@b.com"));
        assert_eq!(fetched.username.as_deref(), Some("tester"));
    }

    #[tokio::test]
    async fn fetch_by_email_contact() {
        let db = test_db().await;
        let conn = db.connect().unwrap();

        UserRepository::create(&conn, &email_user("u1", "a@b.com"))
            .await
            .unwrap();

        let fetched = UserRepository::get_by_contact(&conn, "a@b.com")
            .await
            .unwrap();
        assert!(fetched.is_some());

        let missing = UserRepository::get_by_contact(&conn, "other@b.com")
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn fetch_by_phone_contact() {
        let db = test_db().await;
        let conn = db.connect().unwrap();

        let user = UserAccount {
            id: "u2".to_string(),
            username: None,
            email: None,
            phone: Some("+15550100".to_string()),
            password_hash: "hash".to_string(),
            created_at: Utc::now(),
        };
        UserRepository::create(&conn, &user).await.unwrap();

        let fetched = UserRepository::get_by_contact(&conn, "+15550100")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fetched.id, "u2");
    }

    #[tokio::test]
    async fn duplicate_email_insert_fails() {
        let db = test_db().await;
        let conn = db.connect().unwrap();

        UserRepository::create(&conn, &email_user("u1", "a@b.com"))
            .await
            .unwrap();
        let dup = UserRepository::create(&conn, &email_user("u2", "a@b.com")).await;
        assert!(dup.is_err());
    }
}
