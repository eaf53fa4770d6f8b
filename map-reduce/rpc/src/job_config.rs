use map_reduce_rpc::RpcConfig;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct JobConfig {
    pub job_name: String,
    pub input_files: Vec<String>,
    pub n_reduce: usize,
    pub num_workers: usize,
    /// Percentage of calls each local worker fails on purpose
    pub failure_rate: u32,
    pub task_latency_ms: u64,
    /// Delay before the last worker registers
    pub late_registration_ms: u64,
    pub rpc: RpcConfig,
}

impl JobConfig {
    pub fn load(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = fs::read_to_string(path)?;
        let config: JobConfig = serde_json::from_str(&contents)?;
        Ok(config)
    }
}

impl Default for JobConfig {
    fn default() -> Self {
        Self {
            job_name: "wordcount".to_string(),
            input_files: (0..8).map(|i| format!("input-{}.txt", i)).collect(),
            n_reduce: 4,
            num_workers: 3,
            failure_rate: 20,
            task_latency_ms: 20,
            late_registration_ms: 200,
            rpc: RpcConfig::default(),
        }
    }
}
