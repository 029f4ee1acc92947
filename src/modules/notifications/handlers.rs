use axum::{extract::State, Json};

use crate::app_state::AppState;
use crate::auth::CurrentUser;
use crate::db::models::{Notification, Role};
use crate::db::repositories::NotificationRepository;
use crate::error::AppResult;

pub async fn my_notifications(
    State(state): State<AppState>,
    current: CurrentUser,
) -> AppResult<Json<Vec<Notification>>> {
    let user = current.require(&[Role::Client, Role::Doctor])?;
    let rows = NotificationRepository::list_for_user(&state.db, user.id).await?;
    Ok(Json(rows))
}
