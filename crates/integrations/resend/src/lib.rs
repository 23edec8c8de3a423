//! Resend mailer for sitedesk.
//!
//! This crate implements the [`Mailer`](sitedesk_provider::Mailer) trait on
//! top of the [Resend](https://resend.com/docs/api-reference/emails/send-email)
//! transactional email API.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use sitedesk_resend::{ResendConfig, ResendMailer};
//!
//! let config = ResendConfig::new("re_123").with_from_address("site@example.com");
//! let mailer = ResendMailer::new(config);
//! ```

pub mod config;
pub mod error;
pub mod provider;
pub mod types;

pub use config::ResendConfig;
pub use error::ResendError;
pub use provider::ResendMailer;
pub use types::{ResendErrorResponse, ResendSendRequest, ResendSendResponse};
