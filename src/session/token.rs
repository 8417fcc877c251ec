use super::{AuthPlugin, ServiceCatalog};
use crate::endpoint::EndpointFilter;
use crate::error::Result;
use async_trait::async_trait;

/// Pre-issued token, with the catalog that came along with it
pub struct StaticTokenAuth {
    token: String,
    catalog: ServiceCatalog,
}

impl StaticTokenAuth {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            catalog: ServiceCatalog::default(),
        }
    }

    pub fn with_catalog(mut self, catalog: ServiceCatalog) -> Self {
        self.catalog = catalog;
        self
    }
}

#[async_trait]
impl AuthPlugin for StaticTokenAuth {
    async fn token(&self) -> Result<String> {
        Ok(self.token.clone())
    }

    async fn endpoint(&self, filter: &EndpointFilter) -> Result<String> {
        self.catalog.endpoint_for(filter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::CatalogEntry;
    use crate::BarbicanError;

    #[tokio::test]
    async fn test_static_token_auth() {
        let auth = StaticTokenAuth::new("my-token");
        assert_eq!(auth.token().await.unwrap(), "my-token");
    }

    #[tokio::test]
    async fn test_endpoint_from_catalog() {
        let auth = StaticTokenAuth::new("my-token").with_catalog(
            ServiceCatalog::default()
                .with_entry(CatalogEntry::new("key-manager", "public", "http://b:9311")),
        );
        let url = auth.endpoint(&EndpointFilter::default()).await.unwrap();
        assert_eq!(url, "http://b:9311");
    }

    #[tokio::test]
    async fn test_empty_catalog_is_config_error() {
        let auth = StaticTokenAuth::new("my-token");
        let result = auth.endpoint(&EndpointFilter::default()).await;
        assert!(matches!(result, Err(BarbicanError::Config(_))));
    }
}
