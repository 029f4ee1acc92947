pub mod handlers;
pub mod routes;

pub use routes::slot_routes;
