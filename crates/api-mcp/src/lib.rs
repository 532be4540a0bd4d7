//! MCH tool/resource server.
//!
//! Exposes the antenatal and child-health services as JSON-RPC 2.0 tools, and the questionnaires
//! plus a service summary as read-only resources. Messages are newline-delimited JSON on
//! stdin/stdout; logs go to stderr.

pub mod error;
pub mod jsonrpc;
pub mod resources;
pub mod server;
pub mod tools;
pub mod transport;

pub use error::{McpError, McpResult};
pub use server::McpServer;
