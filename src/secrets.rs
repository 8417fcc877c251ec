use crate::client::{created_ref, ensure_href, Client};
use crate::error::{BarbicanError, Result};
use crate::page::{ListParams, Page};
use crate::session::Headers;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use reqwest::header::{HeaderValue, ACCEPT};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

const SECRETS_PATH: &str = "secrets";

/// Secret metadata. The payload is fetched separately.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Secret {
    pub secret_ref: String,
    pub name: Option<String>,
    pub status: Option<String>,
    pub secret_type: Option<String>,
    pub algorithm: Option<String>,
    pub bit_length: Option<u32>,
    pub mode: Option<String>,
    #[serde(default, deserialize_with = "crate::timestamp::deserialize_optional")]
    pub expiration: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "crate::timestamp::deserialize_optional")]
    pub created: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "crate::timestamp::deserialize_optional")]
    pub updated: Option<DateTime<Utc>>,
    /// Payload content types keyed by name, `default` being the stored one
    pub content_types: Option<HashMap<String, String>>,
    pub creator_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NewSecret {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload_content_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload_content_encoding: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub algorithm: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bit_length: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_type: Option<String>,
}

impl NewSecret {
    /// Plain-text secret
    pub fn text(name: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            payload: Some(payload.into()),
            payload_content_type: Some("text/plain".to_string()),
            ..Self::default()
        }
    }
}

pub struct SecretManager<'a> {
    client: &'a Client,
}

impl<'a> SecretManager<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Store a secret and return its ref
    pub async fn store(&self, secret: &NewSecret) -> Result<String> {
        let response: serde_json::Value = self.client.post(SECRETS_PATH, secret).await?;
        created_ref(&response, "secret_ref")
    }

    pub async fn get(&self, secret_ref: &str) -> Result<Secret> {
        ensure_href(secret_ref)?;
        self.client.get(secret_ref, &[]).await
    }

    /// Decrypted payload in the requested content type
    pub async fn payload(&self, secret_ref: &str, content_type: &str) -> Result<Bytes> {
        ensure_href(secret_ref)?;
        let accept = HeaderValue::from_str(content_type).map_err(|e| {
            BarbicanError::Config(format!("invalid content type {}: {}", content_type, e))
        })?;
        let mut headers = Headers::new();
        headers.insert(ACCEPT, accept);
        let url = format!("{}/payload", secret_ref.trim_end_matches('/'));
        self.client.get_raw(&url, headers).await
    }

    pub async fn list(&self, params: &ListParams) -> Result<Page<Secret>> {
        let url = self.client.url(SECRETS_PATH);
        let value = self.client.get(&url, &params.to_query()).await?;
        Page::from_value(value, SECRETS_PATH)
    }

    /// Fetch the page a `next`/`previous` link points at
    pub async fn list_page(&self, href: &str) -> Result<Page<Secret>> {
        ensure_href(href)?;
        let value = self.client.get(href, &[]).await?;
        Page::from_value(value, SECRETS_PATH)
    }

    pub async fn delete(&self, secret_ref: &str) -> Result<()> {
        ensure_href(secret_ref)?;
        self.client.delete(secret_ref, None).await
    }
}
