//! HTTP client wrapper for a single-page-application backend.
//!
//! [`RequestClient`] prefixes every call with a base path, applies default
//! headers and maps failed statuses to user-facing behavior through injected
//! [`host`] collaborators: a login redirect on 401, session teardown and a
//! delayed redirect on 403, a toast on 404.

pub mod client;
pub mod commands;
pub mod config;
pub mod handler;
pub mod host;
pub mod http;

pub use client::{Delivery, RequestClient, RequestError};
pub use config::{ClientConfig, SuccessPolicy};
pub use handler::{ScheduledRedirect, StatusAction, classify_status};
pub use host::Host;
pub use http::{Method, RequestConfig, ResponseEnvelope};
