pub mod admin;
pub mod appointments;
pub mod auth;
pub mod doctor_appointments;
pub mod doctors;
pub mod favorites;
pub mod notifications;
pub mod reviews;
pub mod slots;
pub mod specialties;
pub mod users;
