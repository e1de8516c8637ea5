//! Client address extraction.
//!
//! Todo records carry the address of the client that created them. The
//! `X-Forwarded-For` header wins when a proxy supplies it, then the peer
//! socket address, then the literal `"unknown"`. The extractor never
//! rejects; a request with no determinable address still creates its
//! record.

use std::convert::Infallible;
use std::net::SocketAddr;

use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::request::Parts;

/// Fallback when no address can be determined (e.g. in-process tests
/// without connect info).
const UNKNOWN_ADDRESS: &str = "unknown";

/// The originating client address as recorded on created todos.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientIp(pub String);

impl ClientIp {
    /// Returns the address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<S> FromRequestParts<S> for ClientIp
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if let Some(forwarded) = parts
            .headers
            .get("x-forwarded-for")
            .and_then(|value| value.to_str().ok())
        {
            // Only the first hop names the client; later entries are proxies.
            if let Some(client) = forwarded
                .split(',')
                .next()
                .map(str::trim)
                .filter(|address| !address.is_empty())
            {
                return Ok(Self(client.to_owned()));
            }
        }

        let address = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map_or_else(
                || UNKNOWN_ADDRESS.to_owned(),
                |ConnectInfo(address)| address.ip().to_string(),
            );
        Ok(Self(address))
    }
}
