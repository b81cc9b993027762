use anyhow::{Context, Result, bail};
use log::debug;

use crate::client::{Delivery, RequestError};
use crate::host::Navigator;
use crate::http::{Method, RequestConfig, TransportErrorKind};

use super::services::Session;

/// One request as given on the command line.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub data: Option<String>,
}

impl RequestOptions {
    fn into_config(self) -> Result<RequestConfig> {
        let mut config = RequestConfig::new(self.method, self.path);
        config.query = self.query;
        if let Some(data) = self.data {
            let body = serde_json::from_str(&data).context("--data is not valid JSON")?;
            config = config.with_json(body);
        }
        Ok(config)
    }
}

/// Send a request and report the outcome.
///
/// The body of an accepted response goes to stdout. A rejected response
/// fails the command after any scheduled login redirect has fired.
#[tracing::instrument(skip(session, options))]
pub async fn request(session: &Session, options: RequestOptions) -> Result<()> {
    let start_path = session.history.current_path();
    let config = options.into_config()?;

    let result = session.client.send(config).await;
    let outcome = match result {
        Ok(Delivery::Received(envelope)) => {
            println!("{}", envelope.body);
            Ok(())
        }
        Ok(Delivery::Offline) => {
            eprintln!("Network is offline; the request was not completed.");
            Ok(())
        }
        Err(mut e) => {
            if let Some(redirect) = e.take_redirect() {
                debug!("Waiting for scheduled login redirect");
                redirect.wait().await;
            }
            Err(e)
        }
    };

    let end_path = session.history.current_path();
    if end_path != start_path {
        eprintln!("Redirected to {}", end_path);
    }
    if let Err(e) = outcome {
        if let Some(hint) = failure_hint(&e) {
            eprintln!("{}", hint);
        }
        bail!("Request failed: {}", e);
    }
    Ok(())
}

fn failure_hint(error: &RequestError) -> Option<&'static str> {
    let RequestError::Transport(transport) = error else {
        return None;
    };
    match transport.kind() {
        TransportErrorKind::Connect => Some("Is the server running? Check --origin."),
        TransportErrorKind::Timeout => {
            Some("The server did not answer in time. Try a larger --timeout-ms.")
        }
        TransportErrorKind::Body | TransportErrorKind::Other => None,
    }
}
