mod extract;
mod password;
mod token;

pub use extract::CurrentUser;
pub use password::{hash_password, verify_password};
pub use token::{issue_token, verify_token};
