use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;

/// Course record in the database.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: i64,
    pub user_id: i64, // owner, always an existing user
    pub title: String,
    pub description: String,
    pub estimated_time: Option<String>,
    pub materials_needed: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// Public part of the owning user embedded in course responses.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseOwner {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CourseWithOwner {
    #[serde(flatten)]
    pub course: Course,
    pub user: CourseOwner,
}

/// One row of courses joined with their owner.
#[derive(Debug, FromRow)]
pub struct CourseOwnerRow {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub description: String,
    pub estimated_time: Option<String>,
    pub materials_needed: Option<String>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
    pub owner_first_name: String,
    pub owner_last_name: String,
    pub owner_email_address: String,
}

impl From<CourseOwnerRow> for CourseWithOwner {
    fn from(r: CourseOwnerRow) -> Self {
        Self {
            user: CourseOwner {
                id: r.user_id,
                first_name: r.owner_first_name,
                last_name: r.owner_last_name,
                email_address: r.owner_email_address,
            },
            course: Course {
                id: r.id,
                user_id: r.user_id,
                title: r.title,
                description: r.description,
                estimated_time: r.estimated_time,
                materials_needed: r.materials_needed,
                created_at: r.created_at,
                updated_at: r.updated_at,
            },
        }
    }
}
