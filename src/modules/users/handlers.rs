use axum::Json;

use crate::auth::CurrentUser;
use crate::db::models::UserOut;
use crate::error::AppResult;

pub async fn get_me(current: CurrentUser) -> AppResult<Json<UserOut>> {
    Ok(Json(current.user.into()))
}
