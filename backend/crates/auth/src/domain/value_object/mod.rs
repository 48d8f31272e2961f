//! Value Object Module

pub mod email;
pub mod person_name;
pub mod phone;
pub mod token_salt;
pub mod user_id;
pub mod user_password;
pub mod verification_token;
