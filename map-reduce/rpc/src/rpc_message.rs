use crate::rpc_error::{Result, RpcError};
use bytes::Bytes;
use futures::{SinkExt, StreamExt};
use map_reduce_core::TaskAssignment;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio::net::TcpStream;
use tokio_util::codec::{Framed, LengthDelimitedCodec};

pub type Connection = Framed<TcpStream, LengthDelimitedCodec>;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RpcRequest {
    pub method: String,
    pub assignment: TaskAssignment,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RpcResponse {
    pub ok: bool,
    pub error: Option<String>,
}

impl RpcResponse {
    pub fn success() -> Self {
        Self {
            ok: true,
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            error: Some(error.into()),
        }
    }
}

pub fn frame_stream(stream: TcpStream) -> Connection {
    Framed::new(stream, LengthDelimitedCodec::new())
}

/// Writes one JSON message as a single length-delimited frame
pub async fn send_message<T: Serialize>(connection: &mut Connection, message: &T) -> Result<()> {
    let body = serde_json::to_vec(message)?;
    connection.send(Bytes::from(body)).await?;
    Ok(())
}

/// Reads the next frame, `None` when the peer closed the connection cleanly
pub async fn recv_message<T: DeserializeOwned>(connection: &mut Connection) -> Result<Option<T>> {
    match connection.next().await {
        Some(frame) => Ok(Some(serde_json::from_slice(&frame?)?)),
        None => Ok(None),
    }
}

/// Like `recv_message`, but a closed connection is an error
pub async fn expect_message<T: DeserializeOwned>(connection: &mut Connection) -> Result<T> {
    recv_message(connection)
        .await?
        .ok_or(RpcError::ConnectionClosed)
}
