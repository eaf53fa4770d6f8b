use serde::Deserialize;
use std::time::Duration;

/// Limits enforced by the call operation itself
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RpcConfig {
    pub connect_timeout_ms: u64,
    pub call_timeout_ms: u64,
}

impl RpcConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    pub fn call_timeout(&self) -> Duration {
        Duration::from_millis(self.call_timeout_ms)
    }
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            connect_timeout_ms: 1_000,
            call_timeout_ms: 5_000,
        }
    }
}
