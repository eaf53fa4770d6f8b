use crate::rpc_error::Result;
use crate::rpc_message::{frame_stream, recv_message, send_message, RpcRequest, RpcResponse};
use crate::TaskHandler;
use map_reduce_core::{WorkerAddress, DO_TASK_METHOD};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::{TcpListener, TcpStream};
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::{debug, info, warn};

/// Worker endpoint answering `Worker.DoTask` calls with a `TaskHandler`
pub struct TaskServer<H> {
    listener: TcpListener,
    handler: Arc<H>,
}

impl<H: TaskHandler> TaskServer<H> {
    pub async fn bind(addr: &str, handler: H) -> Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        Ok(Self {
            listener,
            handler: Arc::new(handler),
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Address to register with the master
    pub fn address(&self) -> Result<WorkerAddress> {
        Ok(WorkerAddress::new(self.local_addr()?.to_string()))
    }

    /// Serves until `shutdown` fires, then waits for open connections to finish.
    pub async fn run(self, shutdown: CancellationToken) {
        let connections = TaskTracker::new();
        info!("Task server listening on {:?}", self.listener.local_addr());

        loop {
            let accepted = tokio::select! {
                _ = shutdown.cancelled() => break,
                accepted = self.listener.accept() => accepted,
            };

            match accepted {
                Ok((stream, peer)) => {
                    let handler = self.handler.clone();
                    let shutdown = shutdown.clone();
                    connections.spawn(async move {
                        if let Err(e) = serve_connection(stream, handler, shutdown).await {
                            debug!(%peer, "connection ended with error: {}", e);
                        }
                    });
                }
                Err(e) => warn!("accept failed: {}", e),
            }
        }

        connections.close();
        connections.wait().await;
        info!("Task server stopped");
    }
}

async fn serve_connection<H: TaskHandler>(
    stream: TcpStream,
    handler: Arc<H>,
    shutdown: CancellationToken,
) -> Result<()> {
    let mut connection = frame_stream(stream);

    loop {
        let request: Option<RpcRequest> = tokio::select! {
            _ = shutdown.cancelled() => return Ok(()),
            request = recv_message(&mut connection) => request?,
        };
        let Some(request) = request else {
            return Ok(());
        };

        let response = dispatch(handler.as_ref(), request).await;
        send_message(&mut connection, &response).await?;
    }
}

async fn dispatch<H: TaskHandler>(handler: &H, request: RpcRequest) -> RpcResponse {
    if request.method != DO_TASK_METHOD {
        return RpcResponse::failure(format!("unknown method {}", request.method));
    }

    match handler.handle(request.assignment).await {
        Ok(()) => RpcResponse::success(),
        Err(e) => RpcResponse::failure(e),
    }
}
