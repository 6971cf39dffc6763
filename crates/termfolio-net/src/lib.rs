//! Outbound delivery for the contact form.
//!
//! One operation exists: post a [`ContactMessage`] to a third-party email
//! relay. The [`EmailRelay`] trait is the seam; [`HttpsRelay`] is the real
//! client and tests substitute their own implementations.

pub mod http;
pub mod relay;

use serde::Serialize;
use termfolio_types::error::Result;

pub use relay::HttpsRelay;

/// A filled-in contact form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

/// Something that can deliver a contact message.
///
/// Called from a worker thread, hence `Send + Sync`.
pub trait EmailRelay: Send + Sync {
    fn send(&self, msg: &ContactMessage) -> Result<()>;
}
