use crate::classify::check_status;
use crate::config::{
    env_first, env_flag, ENV_AUTH_TOKEN, ENV_ENDPOINT, ENV_INSECURE, ENV_INTERFACE,
    ENV_PROJECT_ID, ENV_REGION_NAME, ENV_TENANT_ID,
};
use crate::containers::ContainerManager;
use crate::endpoint::{
    base_root, normalize_endpoint, EndpointFilter, DEFAULT_INTERFACE, DEFAULT_SERVICE_TYPE,
};
use crate::error::{BarbicanError, Result};
use crate::orders::OrderManager;
use crate::secrets::SecretManager;
use crate::session::{Headers, HttpSession, Session, StaticTokenAuth};
use bytes::Bytes;
use reqwest::header::{HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

pub const PROJECT_ID_HEADER: &str = "X-Project-Id";
const PROJECT_ID_HEADER_NAME: HeaderName = HeaderName::from_static("x-project-id");
const JSON_CONTENT_TYPE: &str = "application/json";

pub struct ClientBuilder {
    session: Option<Arc<dyn Session>>,
    endpoint: Option<String>,
    project_id: Option<String>,
    token: Option<String>,
    verify: bool,
    service_type: String,
    service_name: Option<String>,
    interface: String,
    region_name: Option<String>,
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientBuilder {
    pub fn new() -> Self {
        Self {
            session: None,
            endpoint: None,
            project_id: None,
            token: None,
            verify: true,
            service_type: DEFAULT_SERVICE_TYPE.to_string(),
            service_name: None,
            interface: DEFAULT_INTERFACE.to_string(),
            region_name: None,
        }
    }

    /// Builder seeded from `BARBICAN_ENDPOINT`, `OS_PROJECT_ID`/`OS_TENANT_ID`,
    /// `OS_AUTH_TOKEN`, `OS_REGION_NAME`, `OS_INTERFACE` and `BARBICAN_INSECURE`
    pub fn from_env() -> Self {
        let mut builder = Self::new();
        builder.endpoint = env_first(&[ENV_ENDPOINT]);
        builder.project_id = env_first(&[ENV_PROJECT_ID, ENV_TENANT_ID]);
        builder.token = env_first(&[ENV_AUTH_TOKEN]);
        builder.region_name = env_first(&[ENV_REGION_NAME]);
        if let Some(interface) = env_first(&[ENV_INTERFACE]) {
            builder.interface = interface;
        }
        builder.verify = !env_flag(ENV_INSECURE);
        builder
    }

    pub fn session(mut self, session: Arc<dyn Session>) -> Self {
        self.session = Some(session);
        self
    }

    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn project_id(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }

    /// Token for the default session. Ignored when a session is supplied.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// TLS verification for the default session. Ignored when a session is supplied.
    pub fn verify(mut self, verify: bool) -> Self {
        self.verify = verify;
        self
    }

    pub fn service_type(mut self, service_type: impl Into<String>) -> Self {
        self.service_type = service_type.into();
        self
    }

    pub fn service_name(mut self, service_name: impl Into<String>) -> Self {
        self.service_name = Some(service_name.into());
        self
    }

    pub fn interface(mut self, interface: impl Into<String>) -> Self {
        self.interface = interface.into();
        self
    }

    pub fn region_name(mut self, region_name: impl Into<String>) -> Self {
        self.region_name = Some(region_name.into());
        self
    }

    pub async fn build(self) -> Result<Client> {
        tracing::debug!("Creating Client object");

        let ClientBuilder {
            session,
            endpoint,
            project_id,
            token,
            verify,
            service_type,
            service_name,
            interface,
            region_name,
        } = self;

        let session: Arc<dyn Session> = match session {
            Some(session) => session,
            None => {
                let mut builder = HttpSession::builder().verify(verify);
                if let Some(token) = token {
                    builder = builder.auth(Arc::new(StaticTokenAuth::new(token)));
                }
                Arc::new(builder.build()?)
            }
        };

        if !session.is_authenticated() {
            validate_endpoint_and_project_id(endpoint.as_deref(), project_id.as_deref())?;
        }

        let endpoint = match endpoint {
            Some(endpoint) => endpoint,
            None => {
                let filter = EndpointFilter {
                    service_type,
                    service_name,
                    interface,
                    region_name,
                };
                session.get_endpoint(&filter).await?
            }
        };
        let endpoint = normalize_endpoint(&endpoint).to_string();

        let mut default_headers = Headers::new();
        if let Some(project_id) = project_id {
            let value = HeaderValue::from_str(&project_id).map_err(|e| {
                BarbicanError::Config(format!("invalid project id {}: {}", project_id, e))
            })?;
            default_headers.insert(PROJECT_ID_HEADER_NAME, value);
        }

        let base_url = base_root(&endpoint);
        tracing::info!("Using key manager at {}", base_url);

        Ok(Client {
            inner: Arc::new(ClientInner {
                endpoint,
                base_url,
                session,
                default_headers,
            }),
        })
    }
}

fn validate_endpoint_and_project_id(
    endpoint: Option<&str>,
    project_id: Option<&str>,
) -> Result<()> {
    if endpoint.is_none() {
        return Err(BarbicanError::Config(
            "endpoint must be provided when session is unauthenticated".to_string(),
        ));
    }
    if project_id.is_none() {
        return Err(BarbicanError::Config(
            "project id must be provided when session is unauthenticated".to_string(),
        ));
    }
    Ok(())
}

/// Refs are the hrefs returned by the service; an empty one is a caller bug.
pub(crate) fn ensure_href(href: &str) -> Result<()> {
    if href.is_empty() {
        return Err(BarbicanError::Config("resource ref must not be empty".to_string()));
    }
    Ok(())
}

/// Pull the new resource's ref out of a create response
pub(crate) fn created_ref(response: &serde_json::Value, field: &str) -> Result<String> {
    response
        .get(field)
        .and_then(serde_json::Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| BarbicanError::InvalidResponse(format!("response has no {}", field)))
}

struct ClientInner {
    endpoint: String,
    base_url: String,
    session: Arc<dyn Session>,
    default_headers: Headers,
}

/// Key manager client. Cloning shares the same context.
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

impl Client {
    pub async fn from_env() -> Result<Self> {
        ClientBuilder::from_env().build().await
    }

    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Service endpoint without trailing slash
    pub fn endpoint(&self) -> &str {
        &self.inner.endpoint
    }

    /// Endpoint with the API version appended
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    pub fn default_headers(&self) -> &Headers {
        &self.inner.default_headers
    }

    pub fn secrets(&self) -> SecretManager<'_> {
        SecretManager::new(self)
    }

    pub fn orders(&self) -> OrderManager<'_> {
        OrderManager::new(self)
    }

    pub fn containers(&self) -> ContainerManager<'_> {
        ContainerManager::new(self)
    }

    /// `{base_url}/{path}`
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.inner.base_url, path)
    }

    /// Default headers are applied last, so the client's project always wins.
    /// Names compare case-insensitively and every caller value for a name is replaced.
    fn with_default_headers(&self, mut headers: Headers) -> Headers {
        for (name, value) in &self.inner.default_headers {
            headers.insert(name.clone(), value.clone());
        }
        headers
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        href: &str,
        params: &[(String, String)],
    ) -> Result<T> {
        let mut headers = Headers::new();
        headers.insert(ACCEPT, HeaderValue::from_static(JSON_CONTENT_TYPE));
        let headers = self.with_default_headers(headers);

        let response = self.inner.session.get(href, params, &headers).await?;
        check_status(response.status, &response.body)?;
        response.json()
    }

    pub async fn get_raw(&self, href: &str, headers: Headers) -> Result<Bytes> {
        let headers = self.with_default_headers(headers);

        let response = self.inner.session.get(href, &[], &headers).await?;
        check_status(response.status, &response.body)?;
        Ok(response.body)
    }

    /// POST to `{base_url}/{path}/`; the service expects the trailing slash.
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}/{}/", self.inner.base_url, path);
        let mut headers = Headers::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
        let headers = self.with_default_headers(headers);

        let body = serde_json::to_vec(body)?;
        let response = self.inner.session.post(&url, body, &headers).await?;
        check_status(response.status, &response.body)?;
        response.json()
    }

    pub async fn delete(&self, href: &str, body: Option<&serde_json::Value>) -> Result<()> {
        let mut headers = Headers::new();
        let body = match body {
            Some(body) => {
                headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
                Some(serde_json::to_vec(body)?)
            }
            None => None,
        };
        let headers = self.with_default_headers(headers);

        let response = self.inner.session.delete(href, body, &headers).await?;
        check_status(response.status, &response.body)?;
        Ok(())
    }
}
