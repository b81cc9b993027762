//! The shared request client.
//!
//! Every call runs through the request interceptor (URL joining, default
//! headers, optional auth token), the transport, and the response
//! interceptor, which decides between resolving and rejecting and triggers
//! the status side effects of [`crate::handler`].

mod error;
mod interceptor;

use anyhow::Result;
use log::debug;
use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::handler::ErrorHandler;
use crate::host::Host;
use crate::http::{
    RequestConfig, ReqwestTransport, ResponseEnvelope, Transport, TransportError,
};

pub use error::RequestError;

/// Outcome of a call that did not fail.
#[derive(Debug)]
pub enum Delivery {
    /// A response with an accepted status.
    Received(ResponseEnvelope),
    /// The transport failed while the host was offline. The network flag was
    /// cleared and the failure absorbed.
    Offline,
}

impl Delivery {
    pub fn into_envelope(self) -> Option<ResponseEnvelope> {
        match self {
            Delivery::Received(envelope) => Some(envelope),
            Delivery::Offline => None,
        }
    }
}

pub struct RequestClient<T: Transport = ReqwestTransport> {
    transport: T,
    host: Host,
    config: ClientConfig,
    base_url: String,
    handler: ErrorHandler,
}

impl RequestClient<ReqwestTransport> {
    /// Creates a client backed by reqwest.
    pub fn new(config: ClientConfig, host: Host) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("apireq/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Self::with_transport(ReqwestTransport::new(client), config, host)
    }
}

impl<T: Transport> RequestClient<T> {
    pub fn with_transport(transport: T, config: ClientConfig, host: Host) -> Result<Self> {
        let base_url = config.base_url()?;
        let handler = ErrorHandler::new(host.clone(), &config);
        Ok(Self {
            transport,
            host,
            config,
            base_url,
            handler,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sends a request through both interceptors.
    ///
    /// Resolves with the envelope when the success policy accepts its status.
    /// Other 2xx statuses are rejected as they are. Any other status is
    /// classified (toast, token clearing, login redirect) and then rejected.
    /// A transport failure while offline clears the network flag and resolves
    /// with [`Delivery::Offline`]; while online it is returned unchanged.
    #[tracing::instrument(skip(self, request), fields(method = %request.method, path = %request.path))]
    pub async fn send(&self, request: RequestConfig) -> Result<Delivery, RequestError> {
        let prepared =
            interceptor::prepare_request(request, &self.base_url, &self.config, &*self.host.tokens)?;
        debug!("{} {}", prepared.method, prepared.url);

        match self.transport.execute(prepared).await {
            Ok(envelope) => self.on_response(envelope),
            Err(error) => self.on_transport_error(error).await,
        }
    }

    /// GET `path` and deserialize the body.
    pub async fn get_json<R: DeserializeOwned>(&self, path: &str) -> Result<R, RequestError> {
        let delivery = self.send(RequestConfig::get(path)).await?;
        decode(delivery)
    }

    /// POST `body` as JSON to `path` and deserialize the response body.
    pub async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R, RequestError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let body = serde_json::to_value(body).map_err(RequestError::Encode)?;
        let delivery = self.send(RequestConfig::post(path).with_json(body)).await?;
        decode(delivery)
    }

    fn on_response(&self, envelope: ResponseEnvelope) -> Result<Delivery, RequestError> {
        if self.config.success_policy.accepts(envelope.status) {
            return Ok(Delivery::Received(envelope));
        }

        if envelope.is_success() {
            debug!("Rejecting HTTP {} under {:?}", envelope.status, self.config.success_policy);
            return Err(RequestError::Status {
                envelope,
                redirect: None,
            });
        }

        let message = envelope.message();
        let redirect = self.handler.handle(envelope.status, message.as_deref());
        Err(RequestError::Status { envelope, redirect })
    }

    async fn on_transport_error(&self, error: TransportError) -> Result<Delivery, RequestError> {
        if self.host.connectivity.is_online().await {
            debug!("Transport failure while online: {}", error);
            return Err(RequestError::Transport(error));
        }

        debug!("Transport failure while offline: {}", error);
        self.host.state.set_online(false);
        Ok(Delivery::Offline)
    }
}

fn decode<R: DeserializeOwned>(delivery: Delivery) -> Result<R, RequestError> {
    match delivery {
        Delivery::Received(envelope) => envelope.json().map_err(RequestError::Decode),
        Delivery::Offline => Err(RequestError::Offline),
    }
}
