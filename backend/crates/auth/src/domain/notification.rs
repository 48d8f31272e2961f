//! Outbound Notifications
//!
//! Delivery is fire-and-forget: a failed send never fails the request that
//! triggered it.

use crate::domain::value_object::email::Email;

pub trait VerificationNotifier: Send + Sync {
    /// Hand a verification link for `to` to the delivery channel
    fn send_verification(&self, to: &Email, link: &str);
}
