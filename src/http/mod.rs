//! HTTP request/response types and the transport that carries them.

mod request;
mod response;
mod transport;

pub use request::{Method, PreparedRequest, RequestConfig};
pub use response::ResponseEnvelope;
pub use transport::{ReqwestTransport, Transport, TransportError, TransportErrorKind};

#[cfg(test)]
pub use transport::MockTransport;
