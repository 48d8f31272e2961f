//! User identifier, shared with the shop crate so carts and orders key on
//! the same value the tokens carry in `sub`.

pub use kernel::id::UserId;
