pub mod handlers;
pub mod routes;

pub use routes::doctor_appointment_routes;
