use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct DoctorProfile {
    pub id: i64,
    pub user_id: i64,
    pub full_name: String,
    pub bio: String,
    pub clinic_name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub specialty_id: i64,
    pub is_active: bool,
}

/// Upsert payload for a doctor's own profile.
#[derive(Debug, Deserialize, Validate)]
pub struct DoctorProfileUpsert {
    #[validate(length(min = 1, message = "full_name must not be empty"))]
    pub full_name: String,
    #[serde(default)]
    pub bio: String,
    pub clinic_name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub specialty_id: i64,
}

/// Public listing row: profile joined with its specialty and review aggregates.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct DoctorListing {
    pub id: i64,
    pub full_name: String,
    pub bio: String,
    pub clinic_name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub specialty_id: i64,
    pub specialty_name: String,
    pub is_active: bool,
    pub avg_rating: f64,
    pub reviews_count: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DoctorFilter {
    pub name: Option<String>,
    pub specialty_id: Option<i64>,
    pub specialty_name: Option<String>,
    pub is_active: Option<bool>,
}
