use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Specialty {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct NewSpecialty {
    #[validate(length(min = 2, message = "name must be at least 2 characters"))]
    pub name: String,
}
