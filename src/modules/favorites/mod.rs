pub mod handlers;
pub mod routes;

pub use routes::favorite_routes;
