mod rpc_error;
pub use rpc_error::{Result, RpcError};

mod rpc_config;
pub use rpc_config::RpcConfig;

pub mod rpc_message;
pub use rpc_message::{RpcRequest, RpcResponse};

mod rpc_task_invoker;
pub use rpc_task_invoker::RpcTaskInvoker;

mod task_handler;
pub use task_handler::TaskHandler;

mod task_server;
pub use task_server::TaskServer;

mod worker_registry;
pub use worker_registry::{RegistryFeed, WorkerRegistry};
