use serde::Serialize;
use time::OffsetDateTime;

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Favorite {
    pub id: i64,
    pub user_id: i64,
    pub doctor_id: i64,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Listing row: a bookmarked doctor joined with their specialty.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct FavoriteDoctor {
    pub doctor_id: i64,
    pub doctor_name: String,
    pub specialty_id: i64,
    pub specialty_name: String,
}
