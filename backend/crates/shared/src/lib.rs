//! Shared Kernel
//!
//! Vocabulary shared by every backend crate:
//! - The unified error type ([`error::app_error::AppError`]) and its HTTP mapping
//! - Typed identifiers ([`id::Id`]) for users, line items and orders
//!
//! Only things whose meaning is identical in the auth and shop domains
//! belong here.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
