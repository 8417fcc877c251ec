use super::{AuthPlugin, Headers, Response, Session};
use crate::endpoint::EndpointFilter;
use crate::error::{BarbicanError, Result};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

pub const AUTH_TOKEN_HEADER: &str = "X-Auth-Token";
const DEFAULT_USER_AGENT: &str = concat!("barbican-client/", env!("CARGO_PKG_VERSION"));

pub struct HttpSessionBuilder {
    verify: bool,
    timeout: Option<Duration>,
    application_name: Option<String>,
    auth: Option<Arc<dyn AuthPlugin>>,
}

impl Default for HttpSessionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpSessionBuilder {
    pub fn new() -> Self {
        Self {
            verify: true,
            timeout: None,
            application_name: None,
            auth: None,
        }
    }

    /// Disabling verification accepts any TLS certificate. Use with caution.
    pub fn verify(mut self, verify: bool) -> Self {
        self.verify = verify;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn application_name(mut self, name: impl Into<String>) -> Self {
        self.application_name = Some(name.into());
        self
    }

    pub fn auth(mut self, auth: Arc<dyn AuthPlugin>) -> Self {
        self.auth = Some(auth);
        self
    }

    pub fn build(self) -> Result<HttpSession> {
        let user_agent = self
            .application_name
            .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());

        let mut builder = reqwest::Client::builder()
            .user_agent(user_agent)
            .danger_accept_invalid_certs(!self.verify);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(HttpSession {
            client: builder.build()?,
            auth: self.auth,
        })
    }
}

/// reqwest-backed session. Authenticated only when built with an [`AuthPlugin`].
pub struct HttpSession {
    client: reqwest::Client,
    auth: Option<Arc<dyn AuthPlugin>>,
}

impl HttpSession {
    pub fn builder() -> HttpSessionBuilder {
        HttpSessionBuilder::new()
    }

    /// Unauthenticated session
    pub fn new(verify: bool) -> Result<Self> {
        HttpSessionBuilder::new().verify(verify).build()
    }

    async fn send(
        &self,
        request: reqwest::RequestBuilder,
        headers: &Headers,
    ) -> Result<Response> {
        let mut request = request.headers(headers.clone());
        if let Some(ref auth) = self.auth {
            request = request.header(AUTH_TOKEN_HEADER, auth.token().await?);
        }

        let response = request.send().await?;

        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = response.bytes().await?;

        Ok(Response {
            status: Some(status),
            headers,
            body,
        })
    }
}

#[async_trait]
impl Session for HttpSession {
    fn is_authenticated(&self) -> bool {
        self.auth.is_some()
    }

    async fn get_endpoint(&self, filter: &EndpointFilter) -> Result<String> {
        match self.auth {
            Some(ref auth) => auth.endpoint(filter).await,
            None => Err(BarbicanError::Config(
                "endpoint discovery requires an authenticated session".to_string(),
            )),
        }
    }

    async fn get(
        &self,
        url: &str,
        query: &[(String, String)],
        headers: &Headers,
    ) -> Result<Response> {
        let mut request = self.client.get(url);
        if !query.is_empty() {
            request = request.query(query);
        }
        self.send(request, headers).await
    }

    async fn post(&self, url: &str, body: Vec<u8>, headers: &Headers) -> Result<Response> {
        self.send(self.client.post(url).body(body), headers).await
    }

    async fn delete(
        &self,
        url: &str,
        body: Option<Vec<u8>>,
        headers: &Headers,
    ) -> Result<Response> {
        let mut request = self.client.delete(url);
        if let Some(body) = body {
            request = request.body(body);
        }
        self.send(request, headers).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::StaticTokenAuth;

    #[test]
    fn test_session_without_auth_is_unauthenticated() {
        let session = HttpSession::new(true).unwrap();
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_session_with_auth_is_authenticated() {
        let session = HttpSession::builder()
            .verify(false)
            .auth(Arc::new(StaticTokenAuth::new("token")))
            .build()
            .unwrap();
        assert!(session.is_authenticated());
    }

    #[tokio::test]
    async fn test_discovery_without_auth_fails() {
        let session = HttpSession::new(true).unwrap();
        let result = session.get_endpoint(&EndpointFilter::default()).await;
        assert!(matches!(result, Err(BarbicanError::Config(_))));
    }
}
