use axum::{routing::get, Router};

use crate::app_state::AppState;
use crate::modules::reviews::handlers::{create_review, list_reviews, my_reviews};

pub fn review_routes() -> Router<AppState> {
    Router::new()
        .route("/reviews/mine", get(my_reviews))
        .route(
            "/doctors/{doctor_id}/reviews",
            get(list_reviews).post(create_review),
        )
}
