//! Configuration model loaded from external sources.

use std::time::Duration;

use serde::Deserialize;

use crate::domain::types::ClientId;
use crate::repository::DEFAULT_SALES_GOAL;

fn default_toast_duration_ms() -> u64 {
    3000
}

fn default_sales_goal() -> u32 {
    DEFAULT_SALES_GOAL
}

fn default_unassigned_filter_on_start() -> bool {
    true
}

fn default_seed_path() -> String {
    "data/seed.json".to_string()
}

#[derive(Clone, Debug, Deserialize)]
/// Settings shared by the session and the report binary.
pub struct EngineConfig {
    #[serde(default = "default_toast_duration_ms")]
    pub toast_duration_ms: u64,
    #[serde(default = "default_sales_goal")]
    pub sales_goal: u32,
    #[serde(default = "default_unassigned_filter_on_start")]
    pub unassigned_filter_on_start: bool,
    /// Client record representing the shopper ("You" in the client filter).
    #[serde(default)]
    pub self_client_id: Option<i64>,
    #[serde(default = "default_seed_path")]
    pub seed_path: String,
}

impl EngineConfig {
    pub fn toast_duration(&self) -> Duration {
        Duration::from_millis(self.toast_duration_ms)
    }

    /// The configured "you" client, ignoring non-positive ids.
    pub fn me(&self) -> Option<ClientId> {
        self.self_client_id.and_then(|id| ClientId::new(id).ok())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            toast_duration_ms: default_toast_duration_ms(),
            sales_goal: default_sales_goal(),
            unassigned_filter_on_start: default_unassigned_filter_on_start(),
            self_client_id: None,
            seed_path: default_seed_path(),
        }
    }
}
