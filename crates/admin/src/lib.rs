//! Connection layer for the administered Silo cluster.
//!
//! Provides the cached connection factory (`ConnectionCache`), the HTTP
//! transport builder, and the admin API client used to probe configuration
//! and fetch cluster status.

pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod kv;
pub mod transport;

pub use cache::ConnectionCache;
pub use client::{AdminApi, AdminClient, ConfigKeyHelp, ConfigSchema};
pub use config::ConnectionConfig;
pub use error::{AdminError, Result};
pub use transport::{HttpTransport, REQUEST_TIMEOUT, build_client};
