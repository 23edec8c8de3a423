pub mod api;
pub mod config;
pub mod error;
pub mod mailer_factory;
pub mod store_factory;
pub mod telemetry;
