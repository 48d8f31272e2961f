//! Entity Module

pub mod cart;
pub mod line_item;
pub mod order;
pub mod wishlist;
