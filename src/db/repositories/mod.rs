mod appointment_repository;
mod doctor_repository;
mod favorite_repository;
mod notification_repository;
mod review_repository;
mod slot_repository;
mod specialty_repository;
mod user_repository;

pub use appointment_repository::{AdminAppointmentFilter, AppointmentRepository};
pub use doctor_repository::DoctorRepository;
pub use favorite_repository::FavoriteRepository;
pub use notification_repository::NotificationRepository;
pub use review_repository::ReviewRepository;
pub use slot_repository::SlotRepository;
pub use specialty_repository::SpecialtyRepository;
pub use user_repository::UserRepository;
