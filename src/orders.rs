use crate::client::{created_ref, ensure_href, Client};
use crate::error::Result;
use crate::page::{ListParams, Page};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

const ORDERS_PATH: &str = "orders";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    Key,
    Asymmetric,
    Certificate,
}

/// Parameters of the secret an order should generate
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub algorithm: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bit_length: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload_content_type: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::timestamp::deserialize_optional"
    )]
    pub expiration: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewOrder {
    #[serde(rename = "type")]
    pub order_type: OrderType,
    pub meta: OrderMeta,
}

impl NewOrder {
    /// Symmetric key order, e.g. `NewOrder::key("backup", "aes", 256)`
    pub fn key(name: impl Into<String>, algorithm: impl Into<String>, bit_length: u32) -> Self {
        Self {
            order_type: OrderType::Key,
            meta: OrderMeta {
                name: Some(name.into()),
                algorithm: Some(algorithm.into()),
                bit_length: Some(bit_length),
                payload_content_type: Some("application/octet-stream".to_string()),
                ..OrderMeta::default()
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub order_ref: String,
    #[serde(rename = "type")]
    pub order_type: Option<OrderType>,
    pub status: Option<String>,
    pub secret_ref: Option<String>,
    pub container_ref: Option<String>,
    #[serde(default)]
    pub meta: OrderMeta,
    #[serde(default, deserialize_with = "crate::timestamp::deserialize_optional")]
    pub created: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "crate::timestamp::deserialize_optional")]
    pub updated: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "status_code")]
    pub error_status_code: Option<String>,
    pub error_reason: Option<String>,
    pub creator_id: Option<String>,
}

// Reported as either a number or a string depending on the service version.
fn status_code<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<serde_json::Value>::deserialize(deserializer)? {
        Some(serde_json::Value::String(code)) => Some(code),
        Some(serde_json::Value::Number(code)) => Some(code.to_string()),
        _ => None,
    })
}

pub struct OrderManager<'a> {
    client: &'a Client,
}

impl<'a> OrderManager<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Submit an order and return its ref
    pub async fn create(&self, order: &NewOrder) -> Result<String> {
        let response: serde_json::Value = self.client.post(ORDERS_PATH, order).await?;
        created_ref(&response, "order_ref")
    }

    pub async fn get(&self, order_ref: &str) -> Result<Order> {
        ensure_href(order_ref)?;
        self.client.get(order_ref, &[]).await
    }

    pub async fn list(&self, params: &ListParams) -> Result<Page<Order>> {
        let url = self.client.url(ORDERS_PATH);
        let value = self.client.get(&url, &params.to_query()).await?;
        Page::from_value(value, ORDERS_PATH)
    }

    pub async fn list_page(&self, href: &str) -> Result<Page<Order>> {
        ensure_href(href)?;
        let value = self.client.get(href, &[]).await?;
        Page::from_value(value, ORDERS_PATH)
    }

    pub async fn delete(&self, order_ref: &str) -> Result<()> {
        ensure_href(order_ref)?;
        self.client.delete(order_ref, None).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_order_serialize() {
        let order = NewOrder::key("test_secret", "aes", 256);
        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "type": "key",
                "meta": {
                    "name": "test_secret",
                    "algorithm": "aes",
                    "bit_length": 256,
                    "payload_content_type": "application/octet-stream"
                }
            })
        );
    }

    #[test]
    fn test_order_deserialize() {
        let json = r#"{
            "status": "ACTIVE",
            "type": "key",
            "secret_ref": "http://localhost:9311/v1/secrets/57060549-2fcf-46eb-92bb-bf49fcf5d089",
            "updated": "2013-06-07T19:00:37.338386",
            "created": "2013-06-07T19:00:37.298704",
            "meta": {
                "name": "test_secret",
                "algorithm": "aes",
                "bit_length": 256,
                "mode": "cbc",
                "expiration": null,
                "payload_content_type": "application/octet-stream"
            },
            "order_ref": "http://localhost:9311/v1/orders/003f2b91-2f53-4c0a-a0f3-33796671efc3"
        }"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.order_type, Some(OrderType::Key));
        assert_eq!(order.meta.bit_length, Some(256));
        assert!(order.meta.expiration.is_none());
        assert!(order.error_status_code.is_none());
    }

    #[test]
    fn test_error_status_code_number_or_string() {
        let order: Order = serde_json::from_str(
            r#"{"order_ref": "http://b/v1/orders/1", "status": "ERROR",
                "error_status_code": 400, "error_reason": "bad algorithm"}"#,
        )
        .unwrap();
        assert_eq!(order.error_status_code.as_deref(), Some("400"));

        let order: Order = serde_json::from_str(
            r#"{"order_ref": "http://b/v1/orders/1", "error_status_code": "500"}"#,
        )
        .unwrap();
        assert_eq!(order.error_status_code.as_deref(), Some("500"));
    }
}
