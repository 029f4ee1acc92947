mod appointment;
mod doctor_profile;
mod favorite;
mod notification;
mod review;
mod slot;
mod specialty;
mod user;

pub use appointment::*;
pub use doctor_profile::*;
pub use favorite::*;
pub use notification::*;
pub use review::*;
pub use slot::*;
pub use specialty::*;
pub use user::*;
