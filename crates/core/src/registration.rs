//! Registration payload derived from a cluster status snapshot, and the
//! opaque token it is shipped in.

use crate::status::ClusterStatus;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Deserialize, Serialize};

/// Cluster description submitted to the Hub when registering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterRegistrationInfo {
    pub deployment_id: String,
    pub cluster_name: String,
    pub used_capacity: u64,
    pub info: ClusterInfo,
}

/// Nested sizing information inside [`ClusterRegistrationInfo`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterInfo {
    pub version: String,
    pub server_pools: u32,
    pub servers: u64,
    pub drives: u64,
    pub total_drive_space: u64,
    pub used_drive_space: u64,
    pub buckets: u64,
    pub objects: u64,
}

/// Derive registration info from an already-fetched status snapshot.
///
/// Pool count is the maximum pool index observed across servers, clamped to
/// a minimum of 1. Drive count and space counters are additive over every
/// drive on every server.
pub fn summarize(status: &ClusterStatus, cluster_name: &str) -> ClusterRegistrationInfo {
    let mut pools: u32 = 1;
    let mut drives: u64 = 0;
    let mut total_space: u64 = 0;
    let mut used_space: u64 = 0;

    for server in &status.servers {
        pools = pools.max(server.pool_index);
        drives += server.drives.len() as u64;
        for drive in &server.drives {
            total_space += drive.total_space;
            used_space += drive.used_space;
        }
    }

    let version = status
        .servers
        .first()
        .map(|s| s.version.clone())
        .unwrap_or_default();

    ClusterRegistrationInfo {
        deployment_id: status.deployment_id.clone(),
        cluster_name: cluster_name.to_string(),
        used_capacity: status.usage.size,
        info: ClusterInfo {
            version,
            server_pools: pools,
            servers: status.servers.len() as u64,
            drives,
            total_drive_space: total_space,
            used_drive_space: used_space,
            buckets: status.buckets.count,
            objects: status.objects.count,
        },
    }
}

/// Serialize registration info into its opaque token form: canonical JSON,
/// standard base64. Deterministic for identical input.
pub fn encode_registration_token(info: &ClusterRegistrationInfo) -> crate::Result<String> {
    let bytes = serde_json::to_vec(info).map_err(|e| crate::Error::Serialization(e.to_string()))?;
    Ok(BASE64.encode(bytes))
}

/// Decode a registration token back into its structured form.
pub fn decode_registration_token(token: &str) -> crate::Result<ClusterRegistrationInfo> {
    let bytes = BASE64
        .decode(token)
        .map_err(|e| crate::Error::InvalidToken(e.to_string()))?;
    serde_json::from_slice(&bytes).map_err(|e| crate::Error::InvalidToken(e.to_string()))
}
