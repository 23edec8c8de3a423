//! Email provider abstraction for sitedesk.
//!
//! [`Mailer`] is the strongly-typed trait implemented by concrete providers
//! (see `sitedesk-resend`); [`DynMailer`] is its object-safe counterpart used
//! behind `Arc<dyn DynMailer>` in the server.

pub mod error;
pub mod log;
pub mod mailer;
pub mod recording;

pub use error::ProviderError;
pub use log::LogMailer;
pub use mailer::{DynMailer, Mailer, OutboundEmail, SentEmail};
pub use recording::RecordingMailer;
