use crate::error::{BarbicanError, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;

const DEFAULT_LIMIT: u32 = 10;

/// One page of a listing with the service's cursor links
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: Option<u64>,
    pub next: Option<String>,
    pub previous: Option<String>,
}

impl<T: DeserializeOwned> Page<T> {
    /// Listings wrap their items under a resource-specific key, e.g. `secrets`
    pub(crate) fn from_value(mut value: Value, key: &str) -> Result<Self> {
        let items = value
            .get_mut(key)
            .map(Value::take)
            .ok_or_else(|| BarbicanError::InvalidResponse(format!("listing has no {}", key)))?;

        Ok(Self {
            items: serde_json::from_value(items)?,
            total: value.get("total").and_then(Value::as_u64),
            next: link(&value, "next"),
            previous: link(&value, "previous"),
        })
    }
}

fn link(value: &Value, name: &str) -> Option<String> {
    value.get(name).and_then(Value::as_str).map(str::to_string)
}

/// Query for list operations. Filters a resource doesn't support are ignored by the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListParams {
    pub limit: u32,
    pub offset: u32,
    pub name: Option<String>,
    pub algorithm: Option<String>,
    pub mode: Option<String>,
    pub bits: Option<u32>,
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: 0,
            name: None,
            algorithm: None,
            mode: None,
            bits: None,
        }
    }
}

impl ListParams {
    pub fn new(limit: u32, offset: u32) -> Self {
        Self {
            limit,
            offset,
            ..Self::default()
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub(crate) fn to_query(&self) -> Vec<(String, String)> {
        let mut query = vec![
            ("limit".to_string(), self.limit.to_string()),
            ("offset".to_string(), self.offset.to_string()),
        ];
        if let Some(ref name) = self.name {
            query.push(("name".to_string(), name.clone()));
        }
        if let Some(ref algorithm) = self.algorithm {
            query.push(("alg".to_string(), algorithm.clone()));
        }
        if let Some(ref mode) = self.mode {
            query.push(("mode".to_string(), mode.clone()));
        }
        if let Some(bits) = self.bits {
            query.push(("bits".to_string(), bits.to_string()));
        }
        query
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_listing_has_no_links() {
        let page: Page<Value> = Page::from_value(json!({"secrets": []}), "secrets").unwrap();
        assert!(page.items.is_empty());
        assert!(page.total.is_none());
        assert!(page.next.is_none());
        assert!(page.previous.is_none());
    }

    #[test]
    fn test_listing_links() {
        let page: Page<Value> = Page::from_value(
            json!({
                "orders": [{"order_ref": "a"}, {"order_ref": "b"}],
                "total": 5,
                "next": "http://b/v1/orders?limit=2&offset=3",
                "previous": null
            }),
            "orders",
        )
        .unwrap();
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.total, Some(5));
        assert_eq!(page.next.as_deref(), Some("http://b/v1/orders?limit=2&offset=3"));
        assert!(page.previous.is_none());
    }

    #[test]
    fn test_listing_without_key_is_invalid() {
        let result: Result<Page<Value>> = Page::from_value(json!({"total": 0}), "containers");
        assert!(matches!(result, Err(BarbicanError::InvalidResponse(_))));
    }

    #[test]
    fn test_query_only_includes_set_filters() {
        let query = ListParams::new(5, 10).name("db-password").to_query();
        assert_eq!(
            query,
            vec![
                ("limit".to_string(), "5".to_string()),
                ("offset".to_string(), "10".to_string()),
                ("name".to_string(), "db-password".to_string()),
            ]
        );

        let query = ListParams {
            algorithm: Some("aes".to_string()),
            bits: Some(256),
            ..ListParams::default()
        }
        .to_query();
        assert!(query.contains(&("alg".to_string(), "aes".to_string())));
        assert!(query.contains(&("bits".to_string(), "256".to_string())));
        assert!(query.contains(&("limit".to_string(), "10".to_string())));
    }
}
