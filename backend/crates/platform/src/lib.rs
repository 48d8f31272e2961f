//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (OS randomness, SHA-256, hex tokens)
//! - Password policy and Argon2id hashing
//! - Bearer token extraction from request headers

pub mod bearer;
pub mod crypto;
pub mod password;
