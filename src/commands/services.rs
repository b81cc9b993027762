//! Service factory for building a CLI session.
//!
//! This module separates the construction of the host collaborators and the
//! request client from the command logic that uses them.

use std::sync::Arc;

use anyhow::{Context, Result};
use log::debug;

use crate::{
    client::RequestClient,
    config::{ClientConfig, SuccessPolicy},
    host::{
        AppState, Connectivity, ConnectivityMode, ConsoleNotifier, FileTokenStore,
        FixedConnectivity, Host, RouteConnectivity, RouteHistory, TokenStore,
        default_storage_path,
    },
};

use super::Options;

/// A request client plus the concrete collaborators the CLI inspects after
/// a call.
pub struct Session {
    pub client: RequestClient,
    pub history: Arc<RouteHistory>,
    pub state: Arc<AppState>,
    pub tokens: Arc<FileTokenStore>,
}

/// Resolve the storage file from options or the platform config directory.
pub fn build_token_store(options: &Options) -> Result<FileTokenStore> {
    let path = match &options.storage {
        Some(path) => path.clone(),
        None => default_storage_path()
            .context("Could not determine config directory. Pass --storage explicitly.")?,
    };
    debug!("Using storage file {:?}", path);
    Ok(FileTokenStore::new(path))
}

pub fn build_connectivity(mode: ConnectivityMode) -> Arc<dyn Connectivity> {
    match mode {
        ConnectivityMode::Auto => Arc::new(RouteConnectivity::default()),
        ConnectivityMode::Online => Arc::new(FixedConnectivity::new(true)),
        ConnectivityMode::Offline => Arc::new(FixedConnectivity::new(false)),
    }
}

pub fn build_client_config(options: &Options) -> ClientConfig {
    ClientConfig {
        origin: options.origin.clone(),
        base_path: options.base_path.clone(),
        timeout: options.timeout,
        attach_token: options.attach_token,
        success_policy: if options.accept_2xx {
            SuccessPolicy::Any2xx
        } else {
            SuccessPolicy::Exact200
        },
        ..ClientConfig::default()
    }
}

/// Build the collaborators and the request client from CLI options.
pub fn build_session(options: &Options) -> Result<Session> {
    let config = build_client_config(options);
    let tokens = Arc::new(build_token_store(options)?);
    let logged_in = tokens.get(&config.token_key)?.is_some();

    let history = Arc::new(RouteHistory::new(options.current_path.clone()));
    let state = Arc::new(AppState::new(true, logged_in));
    let host = Host {
        navigator: history.clone(),
        notifier: Arc::new(ConsoleNotifier),
        tokens: tokens.clone(),
        state: state.clone(),
        connectivity: build_connectivity(options.connectivity),
    };

    let client = RequestClient::new(config, host)?;
    debug!("Request client ready for {}", client.base_url());

    Ok(Session {
        client,
        history,
        state,
        tokens,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::Navigator;
    use std::time::Duration;
    use tempfile::tempdir;

    #[test]
    fn test_build_client_config_maps_options() {
        let options = Options {
            origin: "http://example.com".to_string(),
            base_path: "/v1".to_string(),
            timeout: Some(Duration::from_millis(250)),
            attach_token: true,
            accept_2xx: true,
            ..Options::default()
        };

        let config = build_client_config(&options);
        assert_eq!(config.origin, "http://example.com");
        assert_eq!(config.base_path, "/v1");
        assert_eq!(config.timeout, Some(Duration::from_millis(250)));
        assert!(config.attach_token);
        assert_eq!(config.success_policy, SuccessPolicy::Any2xx);
        assert_eq!(config.login_path, "/login");
    }

    #[tokio::test]
    async fn test_build_connectivity_fixed_modes() {
        assert!(build_connectivity(ConnectivityMode::Online).is_online().await);
        assert!(!build_connectivity(ConnectivityMode::Offline).is_online().await);
    }

    #[test]
    fn test_build_session_reads_login_state_from_storage() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("storage.json");
        FileTokenStore::new(&path).set("token", "abc")?;

        let options = Options {
            storage: Some(path),
            current_path: "/profile".to_string(),
            ..Options::default()
        };
        let session = build_session(&options)?;

        assert!(session.state.is_logged_in());
        assert!(session.state.is_online());
        assert_eq!(session.history.current_path(), "/profile");
        assert_eq!(session.client.base_url(), "http://127.0.0.1:8080/api");
        Ok(())
    }

    #[test]
    fn test_build_session_rejects_bad_origin() -> Result<()> {
        let dir = tempdir()?;
        let options = Options {
            origin: "nope".to_string(),
            storage: Some(dir.path().join("storage.json")),
            ..Options::default()
        };
        assert!(build_session(&options).is_err());
        Ok(())
    }
}
