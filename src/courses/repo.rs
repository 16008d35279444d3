use sqlx::SqlitePool;
use time::OffsetDateTime;

use super::dto::{CourseChanges, NewCourse};
use super::repo_types::{Course, CourseOwnerRow, CourseWithOwner};
use crate::validation::RepoError;

const SELECT_WITH_OWNER: &str = r#"
    SELECT c.id, c.user_id, c.title, c.description, c.estimated_time, c.materials_needed,
           c.created_at, c.updated_at,
           u.first_name AS owner_first_name,
           u.last_name AS owner_last_name,
           u.email_address AS owner_email_address
    FROM courses c
    JOIN users u ON u.id = c.user_id
"#;

impl Course {
    /// All courses, each with its owner embedded.
    pub async fn find_all(db: &SqlitePool) -> Result<Vec<CourseWithOwner>, sqlx::Error> {
        let rows = sqlx::query_as::<_, CourseOwnerRow>(&format!("{SELECT_WITH_OWNER} ORDER BY c.id"))
            .fetch_all(db)
            .await?;
        Ok(rows.into_iter().map(CourseWithOwner::from).collect())
    }

    pub async fn find_with_owner(
        db: &SqlitePool,
        id: i64,
    ) -> Result<Option<CourseWithOwner>, sqlx::Error> {
        let row = sqlx::query_as::<_, CourseOwnerRow>(&format!("{SELECT_WITH_OWNER} WHERE c.id = ?"))
            .bind(id)
            .fetch_optional(db)
            .await?;
        Ok(row.map(CourseWithOwner::from))
    }

    pub async fn find_by_id(db: &SqlitePool, id: i64) -> Result<Option<Course>, sqlx::Error> {
        sqlx::query_as::<_, Course>(
            r#"
            SELECT id, user_id, title, description, estimated_time, materials_needed,
                   created_at, updated_at
            FROM courses
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
    }

    /// Validate and insert a course owned by `user_id`.
    pub async fn create(db: &SqlitePool, user_id: i64, new: &NewCourse) -> Result<Course, RepoError> {
        let (title, description) = new.validate()?;
        let now = OffsetDateTime::now_utc();
        let id = sqlx::query(
            r#"
            INSERT INTO courses
                (user_id, title, description, estimated_time, materials_needed, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(user_id)
        .bind(title)
        .bind(description)
        .bind(new.estimated_time.as_deref())
        .bind(new.materials_needed.as_deref())
        .bind(now)
        .bind(now)
        .execute(db)
        .await?
        .last_insert_rowid();

        Ok(Course {
            id,
            user_id,
            title: title.to_string(),
            description: description.to_string(),
            estimated_time: new.estimated_time.clone(),
            materials_needed: new.materials_needed.clone(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Validate and apply `changes`; fields left out are kept.
    pub async fn update(&self, db: &SqlitePool, changes: &CourseChanges) -> Result<Course, RepoError> {
        changes.validate()?;
        let now = OffsetDateTime::now_utc();
        sqlx::query(
            r#"
            UPDATE courses
            SET title = COALESCE(?, title),
                description = COALESCE(?, description),
                estimated_time = COALESCE(?, estimated_time),
                materials_needed = COALESCE(?, materials_needed),
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(changes.title.as_deref())
        .bind(changes.description.as_deref())
        .bind(changes.estimated_time.as_deref())
        .bind(changes.materials_needed.as_deref())
        .bind(now)
        .bind(self.id)
        .execute(db)
        .await?;

        Ok(Course {
            title: changes.title.clone().unwrap_or_else(|| self.title.clone()),
            description: changes
                .description
                .clone()
                .unwrap_or_else(|| self.description.clone()),
            estimated_time: changes
                .estimated_time
                .clone()
                .or_else(|| self.estimated_time.clone()),
            materials_needed: changes
                .materials_needed
                .clone()
                .or_else(|| self.materials_needed.clone()),
            updated_at: now,
            ..self.clone()
        })
    }

    pub async fn delete(&self, db: &SqlitePool) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM courses WHERE id = ?")
            .bind(self.id)
            .execute(db)
            .await?;
        Ok(())
    }
}
