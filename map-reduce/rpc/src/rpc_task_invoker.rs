use crate::rpc_error::{Result, RpcError};
use crate::rpc_message::{
    expect_message, frame_stream, send_message, Connection, RpcRequest, RpcResponse,
};
use crate::RpcConfig;
use async_trait::async_trait;
use map_reduce_core::{TaskAssignment, TaskInvoker, WorkerAddress};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::debug;

/// Calls workers over TCP, one connection per call
#[derive(Debug, Clone, Default)]
pub struct RpcTaskInvoker {
    config: RpcConfig,
}

impl RpcTaskInvoker {
    pub fn new(config: RpcConfig) -> Self {
        Self { config }
    }

    pub async fn call(
        &self,
        worker: &WorkerAddress,
        method: &str,
        assignment: &TaskAssignment,
    ) -> Result<()> {
        let stream = timeout(
            self.config.connect_timeout(),
            TcpStream::connect(worker.as_str()),
        )
        .await
        .map_err(|_| RpcError::Timeout)??;

        let mut connection = frame_stream(stream);
        let request = RpcRequest {
            method: method.to_string(),
            assignment: assignment.clone(),
        };

        let response = timeout(
            self.config.call_timeout(),
            exchange(&mut connection, &request),
        )
        .await
        .map_err(|_| RpcError::Timeout)??;

        if response.ok {
            Ok(())
        } else {
            Err(RpcError::Rejected(response.error.unwrap_or_default()))
        }
    }
}

async fn exchange(connection: &mut Connection, request: &RpcRequest) -> Result<RpcResponse> {
    send_message(connection, request).await?;
    expect_message(connection).await
}

#[async_trait]
impl TaskInvoker for RpcTaskInvoker {
    async fn invoke(
        &self,
        worker: &WorkerAddress,
        method: &str,
        assignment: &TaskAssignment,
    ) -> bool {
        match self.call(worker, method, assignment).await {
            Ok(()) => true,
            Err(e) => {
                debug!(%worker, method, task = assignment.task_number, "call failed: {}", e);
                false
            }
        }
    }
}
