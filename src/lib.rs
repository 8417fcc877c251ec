//! barbican-client - Rust client for the Barbican key manager
//!
//! Endpoint resolution:
//! 1. explicit endpoint → used as is
//! 2. authenticated session → looked up in the session's service catalog
//! 3. otherwise → configuration error, before any request is made

mod classify;
mod client;
mod config;
mod containers;
mod endpoint;
mod error;
mod orders;
mod page;
mod secrets;
pub mod session;
mod timestamp;

pub use classify::{check_status, error_message};
pub use client::{Client, ClientBuilder, PROJECT_ID_HEADER};
pub use config::env_first;
pub use containers::{Container, ContainerManager, ContainerType, NewContainer, SecretRef};
pub use endpoint::{normalize_endpoint, EndpointFilter, API_VERSION};
pub use error::{BarbicanError, HttpError, HttpErrorKind, Result};
pub use orders::{NewOrder, Order, OrderManager, OrderMeta, OrderType};
pub use page::{ListParams, Page};
pub use secrets::{NewSecret, Secret, SecretManager};
