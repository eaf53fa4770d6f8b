use thiserror::Error;

#[derive(Error, Debug)]
pub enum RpcError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Codec error: {0}")]
    Codec(#[from] serde_json::Error),

    #[error("Call timed out")]
    Timeout,

    #[error("Connection closed before a response arrived")]
    ConnectionClosed,

    #[error("Worker rejected call: {0}")]
    Rejected(String),
}

pub type Result<T> = std::result::Result<T, RpcError>;
