//! Request interceptor: URL joining, default headers and the optional auth
//! token.

use log::{debug, warn};
use reqwest::Url;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderValue};

use super::error::RequestError;
use crate::config::ClientConfig;
use crate::host::TokenStore;
use crate::http::{PreparedRequest, RequestConfig};

/// Rejects anything that is not a relative path below the base URL.
///
/// Only the part before `?` or `#` is inspected for escapes, so query values
/// may carry URLs or spaces.
pub(crate) fn validate_path(path: &str) -> Result<(), RequestError> {
    let route = path.split(['?', '#']).next().unwrap_or_default();

    let reason = if has_scheme(route) || route.starts_with("//") {
        Some("absolute URLs are not allowed")
    } else if path.chars().any(char::is_control) || route.chars().any(char::is_whitespace) {
        Some("whitespace and control characters are not allowed")
    } else if route.split('/').any(|segment| segment == "..") {
        Some("parent directory segments are not allowed")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(RequestError::InvalidPath {
            path: path.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}

/// `scheme:` prefix as in RFC 3986: a letter, then letters, digits, `+`, `-`
/// or `.`.
fn has_scheme(route: &str) -> bool {
    match route.split_once(':') {
        Some((scheme, _)) => {
            scheme.starts_with(|c: char| c.is_ascii_alphabetic())
                && scheme
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
        None => false,
    }
}

/// Joins base URL and relative path with exactly one `/` between them.
pub(crate) fn join_url(base_url: &str, path: &str) -> Result<Url, RequestError> {
    let joined = if path.is_empty() {
        base_url.to_string()
    } else {
        format!(
            "{}/{}",
            base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    };
    Url::parse(&joined).map_err(|_| RequestError::InvalidPath {
        path: path.to_string(),
        reason: "does not form a valid URL",
    })
}

/// Turns a [`RequestConfig`] into the request the transport executes.
pub(crate) fn prepare_request(
    request: RequestConfig,
    base_url: &str,
    config: &ClientConfig,
    tokens: &dyn TokenStore,
) -> Result<PreparedRequest, RequestError> {
    validate_path(&request.path)?;
    let mut url = join_url(base_url, &request.path)?;
    if !request.query.is_empty() {
        url.query_pairs_mut().extend_pairs(&request.query);
    }

    let mut headers = request.headers;
    let body = match request.body {
        Some(value) => {
            if !headers.contains_key(CONTENT_TYPE) {
                headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
            }
            Some(serde_json::to_string(&value).map_err(RequestError::Encode)?)
        }
        None => None,
    };

    if config.attach_token && !headers.contains_key(AUTHORIZATION) {
        match tokens.get(&config.token_key) {
            Ok(Some(token)) => match HeaderValue::from_str(&token) {
                Ok(mut value) => {
                    value.set_sensitive(true);
                    headers.insert(AUTHORIZATION, value);
                }
                Err(_) => warn!("Stored token is not a valid header value, not attaching it"),
            },
            Ok(None) => debug!("No stored token to attach"),
            Err(e) => warn!("Failed to read stored token: {:#}", e),
        }
    }

    Ok(PreparedRequest {
        method: request.method,
        url,
        headers,
        body,
        timeout: config.timeout,
    })
}
