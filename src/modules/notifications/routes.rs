use axum::{routing::get, Router};

use crate::app_state::AppState;
use crate::modules::notifications::handlers::my_notifications;

pub fn notification_routes() -> Router<AppState> {
    Router::new().route("/notifications", get(my_notifications))
}
