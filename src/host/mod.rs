//! Host collaborators the request client talks to.
//!
//! The client never reaches for global state. Everything it touches outside
//! the network (routing, notifications, local storage, app flags and
//! connectivity) is injected through the traits below and bundled in [`Host`].
//!
//! # Structure
//!
//! - `navigation` - Route locations and an in-memory history
//! - `notify` - Toast output
//! - `storage` - Token stores (memory and JSON file)
//! - `state` - Network and login flags
//! - `network` - Connectivity detection

mod navigation;
mod network;
mod notify;
mod state;
mod storage;

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

pub use navigation::{Location, RouteHistory};
pub use network::{ConnectivityMode, FixedConnectivity, RouteConnectivity};
pub use notify::ConsoleNotifier;
pub use state::AppState;
pub use storage::{FileTokenStore, MemoryTokenStore, default_storage_path};

/// Client-side routing.
#[cfg_attr(test, mockall::automock)]
pub trait Navigator: Send + Sync {
    /// Full path (with query) of the current route.
    fn current_path(&self) -> String;

    /// Navigate to `location` without adding a history entry.
    fn replace(&self, location: &Location) -> Result<()>;
}

/// User-visible transient messages.
#[cfg_attr(test, mockall::automock)]
pub trait Notifier: Send + Sync {
    fn show_toast(&self, text: &str, duration: Duration);
}

/// Persistent key/value storage holding the auth token.
#[cfg_attr(test, mockall::automock)]
pub trait TokenStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

/// Application-wide flags owned by the surrounding application.
#[cfg_attr(test, mockall::automock)]
pub trait AppStateHandle: Send + Sync {
    fn set_online(&self, online: bool);
    fn set_logged_in(&self, logged_in: bool);
}

/// Whether the host believes it has network access.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Connectivity: Send + Sync {
    async fn is_online(&self) -> bool;
}

/// The injected collaborators of a request client.
#[derive(Clone)]
pub struct Host {
    pub navigator: Arc<dyn Navigator>,
    pub notifier: Arc<dyn Notifier>,
    pub tokens: Arc<dyn TokenStore>,
    pub state: Arc<dyn AppStateHandle>,
    pub connectivity: Arc<dyn Connectivity>,
}

/// Test helpers for assembling a [`Host`] out of mocks.
#[cfg(test)]
pub mod test_utils {
    use super::*;

    /// Mocks for every collaborator. Unset expectations panic when called.
    #[derive(Default)]
    pub struct HostMocks {
        pub navigator: MockNavigator,
        pub notifier: MockNotifier,
        pub tokens: MockTokenStore,
        pub state: MockAppStateHandle,
        pub connectivity: MockConnectivity,
    }

    impl HostMocks {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn into_host(self) -> Host {
            Host {
                navigator: Arc::new(self.navigator),
                notifier: Arc::new(self.notifier),
                tokens: Arc::new(self.tokens),
                state: Arc::new(self.state),
                connectivity: Arc::new(self.connectivity),
            }
        }
    }
}
