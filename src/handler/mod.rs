//! Status code classification and the side effects attached to it.

mod redirect;

use log::{info, warn};
use std::time::Duration;

use crate::config::ClientConfig;
use crate::host::Host;

pub use redirect::{ScheduledRedirect, redirect_to_login};

pub const SESSION_EXPIRED_MESSAGE: &str = "login expired, please log in again";
pub const NOT_FOUND_MESSAGE: &str = "requested resource does not exist";

/// What a failed status means for the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusAction {
    /// 401: not logged in. Go to the login page now.
    RedirectToLogin,
    /// 403: token expired. Notify, forget the token, go to login shortly.
    SessionExpired,
    /// 404: notify only.
    NotFound,
    /// Anything else: log the server message.
    LogOnly,
}

pub fn classify_status(status: u16) -> StatusAction {
    match status {
        401 => StatusAction::RedirectToLogin,
        403 => StatusAction::SessionExpired,
        404 => StatusAction::NotFound,
        _ => StatusAction::LogOnly,
    }
}

/// Applies [`StatusAction`]s through the host collaborators.
#[derive(Clone)]
pub struct ErrorHandler {
    host: Host,
    login_path: String,
    token_key: String,
    toast_duration: Duration,
    redirect_delay: Duration,
}

impl ErrorHandler {
    pub fn new(host: Host, config: &ClientConfig) -> Self {
        Self {
            host,
            login_path: config.login_path.clone(),
            token_key: config.token_key.clone(),
            toast_duration: config.toast_duration,
            redirect_delay: config.redirect_delay,
        }
    }

    /// Runs the side effects for a failed status.
    ///
    /// Returns the pending login redirect when one was scheduled. Collaborator
    /// failures are logged and otherwise ignored. Must be called from within a
    /// tokio runtime.
    #[tracing::instrument(skip(self))]
    pub fn handle(&self, status: u16, message: Option<&str>) -> Option<ScheduledRedirect> {
        match classify_status(status) {
            StatusAction::RedirectToLogin => {
                if let Err(e) = redirect_to_login(&*self.host.navigator, &self.login_path) {
                    warn!("Login redirect failed: {:#}", e);
                }
                None
            }
            StatusAction::SessionExpired => {
                self.host
                    .notifier
                    .show_toast(SESSION_EXPIRED_MESSAGE, self.toast_duration);
                if let Err(e) = self.host.tokens.remove(&self.token_key) {
                    warn!("Failed to clear stored token: {:#}", e);
                }
                self.host.state.set_logged_in(false);
                Some(ScheduledRedirect::schedule(
                    self.host.navigator.clone(),
                    self.login_path.clone(),
                    self.redirect_delay,
                ))
            }
            StatusAction::NotFound => {
                self.host
                    .notifier
                    .show_toast(NOT_FOUND_MESSAGE, self.toast_duration);
                None
            }
            StatusAction::LogOnly => {
                info!("HTTP {}: {}", status, message.unwrap_or_default());
                None
            }
        }
    }
}
