//! IPC between `vibeclip history ...` and the running daemon
//!
//! Unix Domain Sockets carrying the line protocol in [`protocol`].

mod handler;
mod protocol;
mod unix_socket;

pub use handler::HistoryRequestHandler;
pub use protocol::{EntrySummary, IpcRequest, IpcResponse, ParseRequestError};
pub use unix_socket::{SocketPath, UnixSocketClient, UnixSocketServer};

use std::io;
use std::sync::Arc;

/// Answers one decoded request
#[async_trait::async_trait]
pub trait RequestHandler: Send + Sync {
    async fn handle(&self, request: IpcRequest) -> IpcResponse;
}

/// Trait for IPC servers that accept history requests
#[async_trait::async_trait]
pub trait IpcServer: Send + Sync {
    /// Bind to the IPC endpoint
    fn bind(&mut self) -> io::Result<()>;

    /// Get the path/name of the IPC endpoint
    fn path(&self) -> String;

    /// Accept connections forever, answering each request with `handler`
    async fn run(&self, handler: Arc<dyn RequestHandler>) -> io::Result<()>;

    /// Cleanup IPC resources
    fn cleanup(&self);
}

/// Trait for IPC clients that send requests to the daemon
#[async_trait::async_trait]
pub trait IpcClient: Send + Sync {
    /// Check if daemon appears to be running (endpoint exists)
    fn is_daemon_running(&self) -> bool;

    /// Send a request and receive the reply
    async fn send(&self, request: IpcRequest) -> io::Result<IpcResponse>;
}

/// Create the IPC server at the default endpoint
pub fn create_ipc_server() -> Box<dyn IpcServer> {
    Box::new(UnixSocketServer::new(SocketPath::new()))
}

/// Create the IPC client for the default endpoint
pub fn create_ipc_client() -> Box<dyn IpcClient> {
    Box::new(UnixSocketClient::new(SocketPath::new()))
}
