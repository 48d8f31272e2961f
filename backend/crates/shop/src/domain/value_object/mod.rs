//! Value Object Module

pub mod money;
pub mod order_number;
pub mod order_status;
pub mod payment_method;
pub mod product;
