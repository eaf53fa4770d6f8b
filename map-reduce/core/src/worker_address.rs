use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque address used to reach a registered worker
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct WorkerAddress(String);

impl WorkerAddress {
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WorkerAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WorkerAddress {
    fn from(address: &str) -> Self {
        Self::new(address)
    }
}

impl From<String> for WorkerAddress {
    fn from(address: String) -> Self {
        Self(address)
    }
}
