use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of tasks scheduled in one phase invocation
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JobPhase {
    Map,
    Reduce,
}

impl fmt::Display for JobPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobPhase::Map => write!(f, "mapPhase"),
            JobPhase::Reduce => write!(f, "reducePhase"),
        }
    }
}
