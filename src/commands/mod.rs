//! Command implementations behind the `apireq` binary.

mod request;
mod services;
mod token;

use std::path::PathBuf;
use std::time::Duration;

use crate::config::{DEFAULT_BASE_PATH, DEFAULT_ORIGIN};
use crate::host::ConnectivityMode;

pub use request::{RequestOptions, request};
pub use services::{Session, build_session, build_token_store};
pub use token::{TokenAction, token};

/// Settings shared by every command.
#[derive(Debug, Clone)]
pub struct Options {
    pub origin: String,
    pub base_path: String,
    pub storage: Option<PathBuf>,
    pub attach_token: bool,
    pub timeout: Option<Duration>,
    pub current_path: String,
    pub accept_2xx: bool,
    pub connectivity: ConnectivityMode,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            origin: DEFAULT_ORIGIN.to_string(),
            base_path: DEFAULT_BASE_PATH.to_string(),
            storage: None,
            attach_token: false,
            timeout: None,
            current_path: "/".to_string(),
            accept_2xx: false,
            connectivity: ConnectivityMode::default(),
        }
    }
}
