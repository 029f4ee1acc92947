pub mod handlers;
pub mod routes;

pub use routes::review_routes;
