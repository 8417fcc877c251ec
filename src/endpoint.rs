pub const DEFAULT_SERVICE_TYPE: &str = "key-manager";
pub const DEFAULT_INTERFACE: &str = "public";
pub const API_VERSION: &str = "v1";

/// Filter used to pick the key manager out of a service catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointFilter {
    pub service_type: String,
    pub service_name: Option<String>,
    pub interface: String,
    pub region_name: Option<String>,
}

impl Default for EndpointFilter {
    fn default() -> Self {
        Self {
            service_type: DEFAULT_SERVICE_TYPE.to_string(),
            service_name: None,
            interface: DEFAULT_INTERFACE.to_string(),
            region_name: None,
        }
    }
}

/// Strip a single trailing slash, leaving the rest of the URL untouched
pub fn normalize_endpoint(endpoint: &str) -> &str {
    endpoint.strip_suffix('/').unwrap_or(endpoint)
}

/// Versioned API root for an already normalized endpoint
pub fn base_root(endpoint: &str) -> String {
    format!("{}/{}", endpoint, API_VERSION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_one_trailing_slash() {
        assert_eq!(normalize_endpoint("http://host:9311/"), "http://host:9311");
        assert_eq!(normalize_endpoint("http://host:9311"), "http://host:9311");
        assert_eq!(normalize_endpoint("http://host:9311//"), "http://host:9311/");
    }

    #[test]
    fn test_normalize_keeps_interior_segments() {
        assert_eq!(
            normalize_endpoint("https://cloud.example/key-manager/"),
            "https://cloud.example/key-manager"
        );
    }

    #[test]
    fn test_base_root_is_idempotent_under_trailing_slash() {
        let with_slash = base_root(normalize_endpoint("http://host:9311/"));
        let without_slash = base_root(normalize_endpoint("http://host:9311"));
        assert_eq!(with_slash, "http://host:9311/v1");
        assert_eq!(with_slash, without_slash);
    }

    #[test]
    fn test_filter_defaults() {
        let filter = EndpointFilter::default();
        assert_eq!(filter.service_type, "key-manager");
        assert_eq!(filter.interface, "public");
        assert!(filter.service_name.is_none());
        assert!(filter.region_name.is_none());
    }
}
