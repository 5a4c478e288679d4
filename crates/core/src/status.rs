//! Cluster status as reported by the administered cluster's admin API.

use serde::{Deserialize, Serialize};

/// Snapshot of a cluster returned by the admin status endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterStatus {
    pub deployment_id: String,
    pub servers: Vec<ServerStatus>,
    pub usage: UsageStats,
    pub buckets: CountStat,
    pub objects: CountStat,
}

/// Per-server status within a cluster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerStatus {
    pub endpoint: String,
    pub version: String,
    /// 1-based pool index this server belongs to. Single-pool deployments
    /// report 1, not 0.
    pub pool_index: u32,
    pub drives: Vec<DriveStatus>,
}

/// Per-drive capacity counters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriveStatus {
    pub path: String,
    pub total_space: u64,
    pub used_space: u64,
}

/// Aggregate usage counters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsageStats {
    pub size: u64,
}

/// A plain object/bucket count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountStat {
    pub count: u64,
}
