pub mod handlers;
pub mod routes;

pub use routes::specialty_routes;
