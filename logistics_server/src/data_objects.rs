use logistics_engine::db_types::{DashboardStats, Pagination, Platform};
use serde::{Deserialize, Serialize};

/// Service information returned by the root endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub message: String,
    pub version: String,
}

impl ServiceInfo {
    pub fn new<S: Into<String>>(message: S) -> Self {
        Self { message: message.into(), version: env!("CARGO_PKG_VERSION").to_string() }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl From<PaginationParams> for Pagination {
    fn from(params: PaginationParams) -> Self {
        let default = Pagination::default();
        Pagination { limit: params.limit.unwrap_or(default.limit), offset: params.offset.unwrap_or(default.offset) }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SyncParams {
    #[serde(default = "default_only_pending")]
    pub only_pending: bool,
}

fn default_only_pending() -> bool {
    true
}

impl Default for SyncParams {
    fn default() -> Self {
        Self { only_pending: default_only_pending() }
    }
}

/// Dashboard counters. When the counters could not be read, they are all zero and `error` says why.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardResponse {
    #[serde(flatten)]
    pub stats: DashboardStats,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DashboardResponse {
    pub fn ok(stats: DashboardStats) -> Self {
        Self { stats, error: None }
    }

    pub fn fallback<S: ToString>(error: S) -> Self {
        Self { stats: DashboardStats::default(), error: Some(error.to_string()) }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncType {
    PendingOnly,
    Full,
}

impl From<bool> for SyncType {
    fn from(only_pending: bool) -> Self {
        if only_pending {
            Self::PendingOnly
        } else {
            Self::Full
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformSyncResult {
    pub platform: Platform,
    pub orders_synced: usize,
    pub orders_fetched: usize,
    pub only_pending: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncResult {
    pub falabella: Option<PlatformSyncResult>,
    pub mercadolibre: Option<PlatformSyncResult>,
    pub total_synced: usize,
    /// One entry per platform that failed, prefixed with the platform name.
    pub errors: Vec<String>,
    pub sync_type: SyncType,
    pub execution_time_ms: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncResponse<T> {
    pub message: String,
    pub result: T,
}

impl<T> SyncResponse<T> {
    pub fn new<S: Into<String>>(message: S, result: T) -> Self {
        Self { message: message.into(), result }
    }
}
