//! Network and login flags.

use log::debug;
use std::sync::atomic::{AtomicBool, Ordering};

use super::AppStateHandle;

/// Shared application flags.
#[derive(Debug)]
pub struct AppState {
    online: AtomicBool,
    logged_in: AtomicBool,
}

impl AppState {
    pub fn new(online: bool, logged_in: bool) -> Self {
        Self {
            online: AtomicBool::new(online),
            logged_in: AtomicBool::new(logged_in),
        }
    }

    pub fn is_online(&self) -> bool {
        self.online.load(Ordering::SeqCst)
    }

    pub fn is_logged_in(&self) -> bool {
        self.logged_in.load(Ordering::SeqCst)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(true, false)
    }
}

impl AppStateHandle for AppState {
    fn set_online(&self, online: bool) {
        debug!("Network status changed: online={}", online);
        self.online.store(online, Ordering::SeqCst);
    }

    fn set_logged_in(&self, logged_in: bool) {
        debug!("Login status changed: logged_in={}", logged_in);
        self.logged_in.store(logged_in, Ordering::SeqCst);
    }
}
