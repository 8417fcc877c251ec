use serde::{Deserialize, Serialize};

use crate::endpoint::EndpointFilter;
use crate::error::{BarbicanError, Result};

/// Single endpoint record of a service catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    #[serde(rename = "type")]
    pub service_type: String,
    #[serde(default)]
    pub service_name: Option<String>,
    pub interface: String,
    #[serde(default)]
    pub region: Option<String>,
    pub url: String,
}

impl CatalogEntry {
    pub fn new(
        service_type: impl Into<String>,
        interface: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            service_type: service_type.into(),
            service_name: None,
            interface: interface.into(),
            region: None,
            url: url.into(),
        }
    }

    pub fn with_service_name(mut self, name: impl Into<String>) -> Self {
        self.service_name = Some(name.into());
        self
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    fn matches(&self, filter: &EndpointFilter) -> bool {
        if self.service_type != filter.service_type || self.interface != filter.interface {
            return false;
        }
        if let Some(ref name) = filter.service_name {
            if self.service_name.as_ref() != Some(name) {
                return false;
            }
        }
        if let Some(ref region) = filter.region_name {
            if self.region.as_ref() != Some(region) {
                return false;
            }
        }
        true
    }
}

/// Endpoints known to an authenticated session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceCatalog {
    entries: Vec<CatalogEntry>,
}

impl ServiceCatalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    pub fn with_entry(mut self, entry: CatalogEntry) -> Self {
        self.entries.push(entry);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First entry matching every field set on the filter
    pub fn find(&self, filter: &EndpointFilter) -> Option<&CatalogEntry> {
        self.entries.iter().find(|entry| entry.matches(filter))
    }

    pub fn endpoint_for(&self, filter: &EndpointFilter) -> Result<String> {
        self.find(filter)
            .map(|entry| entry.url.clone())
            .ok_or_else(|| {
                BarbicanError::Config(format!(
                    "no {} endpoint for service type {} in catalog",
                    filter.interface, filter.service_type
                ))
            })
    }
}
