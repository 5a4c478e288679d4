//! Core domain types and shared logic for the Silo administration toolkit.
//!
//! This crate defines the canonical data model used across the other crates:
//! - Cluster status as reported by the admin API
//! - Registration info derived from a status snapshot
//! - The opaque registration token format

pub mod error;
pub mod registration;
pub mod status;

pub use error::{Error, Result};
pub use registration::{
    ClusterInfo, ClusterRegistrationInfo, decode_registration_token, encode_registration_token,
    summarize,
};
pub use status::{ClusterStatus, CountStat, DriveStatus, ServerStatus, UsageStats};
