use crate::client::{created_ref, ensure_href, Client};
use crate::error::Result;
use crate::page::{ListParams, Page};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const CONTAINERS_PATH: &str = "containers";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerType {
    Generic,
    Rsa,
    Certificate,
}

/// Named reference to a secret held by a container
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub secret_ref: String,
}

impl SecretRef {
    pub fn new(name: impl Into<String>, secret_ref: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            secret_ref: secret_ref.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewContainer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub container_type: ContainerType,
    pub secret_refs: Vec<SecretRef>,
}

impl NewContainer {
    pub fn generic(name: impl Into<String>, secret_refs: Vec<SecretRef>) -> Self {
        Self {
            name: Some(name.into()),
            container_type: ContainerType::Generic,
            secret_refs,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Container {
    pub container_ref: String,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub container_type: Option<ContainerType>,
    pub status: Option<String>,
    #[serde(default)]
    pub secret_refs: Vec<SecretRef>,
    #[serde(default, deserialize_with = "crate::timestamp::deserialize_optional")]
    pub created: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "crate::timestamp::deserialize_optional")]
    pub updated: Option<DateTime<Utc>>,
    pub creator_id: Option<String>,
}

impl Container {
    /// Ref of the secret stored under `name`, e.g. `private_key` in an RSA container
    pub fn secret_ref(&self, name: &str) -> Option<&str> {
        self.secret_refs
            .iter()
            .find(|r| r.name.as_deref() == Some(name))
            .map(|r| r.secret_ref.as_str())
    }
}

pub struct ContainerManager<'a> {
    client: &'a Client,
}

impl<'a> ContainerManager<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Create a container and return its ref
    pub async fn create(&self, container: &NewContainer) -> Result<String> {
        let response: serde_json::Value = self.client.post(CONTAINERS_PATH, container).await?;
        created_ref(&response, "container_ref")
    }

    pub async fn get(&self, container_ref: &str) -> Result<Container> {
        ensure_href(container_ref)?;
        self.client.get(container_ref, &[]).await
    }

    pub async fn list(&self, params: &ListParams) -> Result<Page<Container>> {
        let url = self.client.url(CONTAINERS_PATH);
        let value = self.client.get(&url, &params.to_query()).await?;
        Page::from_value(value, CONTAINERS_PATH)
    }

    pub async fn list_page(&self, href: &str) -> Result<Page<Container>> {
        ensure_href(href)?;
        let value = self.client.get(href, &[]).await?;
        Page::from_value(value, CONTAINERS_PATH)
    }

    pub async fn delete(&self, container_ref: &str) -> Result<()> {
        ensure_href(container_ref)?;
        self.client.delete(container_ref, None).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_container_deserialize_and_lookup() {
        let json = r#"{
            "container_ref": "http://localhost:9311/v1/containers/6f7e4a5b",
            "name": "rsa-keys",
            "type": "rsa",
            "status": "ACTIVE",
            "secret_refs": [
                {"name": "private_key", "secret_ref": "http://localhost:9311/v1/secrets/1"},
                {"name": "public_key", "secret_ref": "http://localhost:9311/v1/secrets/2"}
            ],
            "created": "2015-03-04T21:41:19",
            "updated": "2015-03-04T21:41:19"
        }"#;
        let container: Container = serde_json::from_str(json).unwrap();
        assert_eq!(container.container_type, Some(ContainerType::Rsa));
        assert_eq!(
            container.secret_ref("public_key"),
            Some("http://localhost:9311/v1/secrets/2")
        );
        assert!(container.secret_ref("passphrase").is_none());
    }

    #[test]
    fn test_new_container_serialize() {
        let container = NewContainer::generic(
            "app-credentials",
            vec![SecretRef::new("password", "http://b/v1/secrets/1")],
        );
        let json = serde_json::to_value(&container).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": "app-credentials",
                "type": "generic",
                "secret_refs": [{"name": "password", "secret_ref": "http://b/v1/secrets/1"}]
            })
        );
    }
}
