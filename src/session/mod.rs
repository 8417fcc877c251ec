mod catalog;
mod http;
mod token;

pub use catalog::{CatalogEntry, ServiceCatalog};
pub use http::{HttpSession, HttpSessionBuilder, AUTH_TOKEN_HEADER};
pub use token::StaticTokenAuth;

use async_trait::async_trait;
use bytes::Bytes;
use serde::de::DeserializeOwned;

use crate::endpoint::EndpointFilter;
use crate::error::Result;

/// Header names are case-insensitive; inserting replaces every earlier value.
pub type Headers = reqwest::header::HeaderMap;

/// Raw HTTP response handed back by a session
#[derive(Debug, Clone, Default)]
pub struct Response {
    pub status: Option<u16>,
    pub headers: Headers,
    pub body: Bytes,
}

impl Response {
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status: Some(status),
            headers: Headers::new(),
            body: body.into(),
        }
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    /// Body as text, replacing invalid UTF-8
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Transport capable of issuing requests against the key manager.
///
/// Authentication is entirely the session's business: an authenticated
/// session signs requests and can discover the service endpoint, an
/// unauthenticated one needs both endpoint and project supplied by the caller.
#[async_trait]
pub trait Session: Send + Sync {
    /// Whether requests made through this session carry credentials
    fn is_authenticated(&self) -> bool;

    /// Look up the service URL in the session's catalog
    async fn get_endpoint(&self, filter: &EndpointFilter) -> Result<String>;

    async fn get(
        &self,
        url: &str,
        query: &[(String, String)],
        headers: &Headers,
    ) -> Result<Response>;

    async fn post(&self, url: &str, body: Vec<u8>, headers: &Headers) -> Result<Response>;

    async fn delete(
        &self,
        url: &str,
        body: Option<Vec<u8>>,
        headers: &Headers,
    ) -> Result<Response>;
}

/// Credentials source for [`HttpSession`]
#[async_trait]
pub trait AuthPlugin: Send + Sync {
    /// Token sent as `X-Auth-Token` with every request
    async fn token(&self) -> Result<String>;

    /// Resolve a service URL from the identity service's catalog
    async fn endpoint(&self, filter: &EndpointFilter) -> Result<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_text_is_lossy() {
        let response = Response::new(500, vec![b'o', b'o', 0xff, b'p', b's']);
        assert_eq!(response.text(), "oo\u{fffd}ps");
    }

    #[test]
    fn test_response_json() {
        let response = Response::new(200, r#"{"secret_ref": "http://h/v1/secrets/1"}"#);
        let value: serde_json::Value = response.json().unwrap();
        assert_eq!(value["secret_ref"], "http://h/v1/secrets/1");
    }
}
