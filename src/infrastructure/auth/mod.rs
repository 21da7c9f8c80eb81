mod jwt;
mod password;

pub use jwt::{decode_token, issue_token, Claims};
pub use password::{hash_password, verify_password};
