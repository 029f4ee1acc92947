pub mod handlers;
pub mod routes;

pub use routes::user_routes;
