use libsql::Connection;

use crate::error::Result;

pub async fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        -- User accounts
        CREATE TABLE IF NOT EXISTS users (
            id TEXT PRIMARY KEY,
            username TEXT,
            password_hash TEXT NOT NULL,
            created_at TEXT NOT NULL
        );
        "#,
    )
    .await?;

    migrate_contact_columns(conn).await?;

    Ok(())
}

/// Early deployments keyed accounts on username only; `email` and
/// `phone` arrived later. Adding them here keeps old databases usable
/// without a manual migration step.
async fn migrate_contact_columns(conn: &Connection) -> Result<()> {
    for column in ["email", "phone"] {
        let column_exists: bool = conn
            .query(
                "SELECT COUNT(*) FROM pragma_table_info('users') WHERE name = ?1",
                libsql::params![column],
            )
            .await?
            .next()
            .await?
            .map(|row| row.get::<i64>(0).unwrap_or(0) > 0)
            .unwrap_or(false);

        if !column_exists {
            tracing::info!("Migrating users table: adding {column} column");
            conn.execute(&format!("ALTER TABLE users ADD COLUMN {column} TEXT"), ())
                .await?;
            tracing::info!("Migration complete: {column} column added");
        }
    }

    // ALTER TABLE cannot add UNIQUE, so uniqueness lives in partial
    // indexes that skip NULLs.
    conn.execute_batch(
        r#"
        CREATE UNIQUE INDEX IF NOT EXISTS idx_users_email ON users(email) WHERE email IS NOT NULL;
        CREATE UNIQUE INDEX IF NOT EXISTS idx_users_phone ON users(phone) WHERE phone IS NOT NULL;
        "#,
    )
    .await?;

    Ok(())
}
