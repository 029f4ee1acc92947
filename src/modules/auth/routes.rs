use axum::{routing::post, Router};

use crate::app_state::AppState;
use crate::modules::auth::handlers::{login, register_client, register_doctor};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register-client", post(register_client))
        .route("/auth/register-doctor", post(register_doctor))
        .route("/auth/login", post(login))
}
