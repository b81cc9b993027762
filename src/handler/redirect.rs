//! Login redirects, immediate and scheduled.

use anyhow::Result;
use log::{debug, warn};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::host::{Location, Navigator};

/// Replace the current route with the login page, carrying the current full
/// path as the `redirect` query parameter.
pub fn redirect_to_login(navigator: &dyn Navigator, login_path: &str) -> Result<()> {
    let current = navigator.current_path();
    let location = Location::new(login_path).with_query("redirect", current);
    debug!("Redirecting to {}", location.full_path());
    navigator.replace(&location)
}

/// A login redirect that fires after a delay.
///
/// Dropping the handle detaches it; the redirect still fires. Use
/// [`ScheduledRedirect::cancel`] to stop it.
#[derive(Debug)]
pub struct ScheduledRedirect {
    handle: JoinHandle<()>,
}

impl ScheduledRedirect {
    /// Spawns the delayed redirect on the current tokio runtime.
    ///
    /// The current path is read when the redirect fires, not when it is
    /// scheduled.
    pub fn schedule(navigator: Arc<dyn Navigator>, login_path: String, delay: Duration) -> Self {
        let deadline = Instant::now() + delay;
        let handle = tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            if let Err(e) = redirect_to_login(&*navigator, &login_path) {
                warn!("Delayed login redirect failed: {:#}", e);
            }
        });
        Self { handle }
    }

    /// Stops the redirect if it has not fired yet.
    pub fn cancel(&self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Waits for the redirect. Returns false if it was cancelled.
    pub async fn wait(self) -> bool {
        match self.handle.await {
            Ok(()) => true,
            Err(e) if e.is_cancelled() => false,
            Err(e) => {
                warn!("Delayed login redirect task failed: {}", e);
                false
            }
        }
    }
}
