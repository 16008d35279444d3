use sqlx::SqlitePool;
use time::OffsetDateTime;

use super::dto::ValidNewUser;
use super::repo_types::User;
use crate::validation::RepoError;

const EMAIL_TAKEN: &str = "The email address you entered already exists";

impl User {
    /// Find a user by login email.
    pub async fn find_by_email(db: &SqlitePool, email: &str) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, first_name, last_name, email_address, password, created_at, updated_at
            FROM users
            WHERE email_address = ?
            "#,
        )
        .bind(email)
        .fetch_optional(db)
        .await
    }

    /// Insert a validated signup, storing `password_hash` in place of the
    /// plaintext it was derived from.
    pub async fn create(
        db: &SqlitePool,
        new: &ValidNewUser<'_>,
        password_hash: &str,
    ) -> Result<User, RepoError> {
        let now = OffsetDateTime::now_utc();
        let id = sqlx::query(
            r#"
            INSERT INTO users (first_name, last_name, email_address, password, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(new.first_name)
        .bind(new.last_name)
        .bind(new.email_address)
        .bind(password_hash)
        .bind(now)
        .bind(now)
        .execute(db)
        .await
        .map_err(|e| RepoError::from_write(e, EMAIL_TAKEN))?
        .last_insert_rowid();

        Ok(User {
            id,
            first_name: new.first_name.to_string(),
            last_name: new.last_name.to_string(),
            email_address: new.email_address.to_string(),
            password: password_hash.to_string(),
            created_at: now,
            updated_at: now,
        })
    }
}
