//! Model Context Protocol (MCP) server implementation.
//!
//! Exposes a vdife document session to AI assistants over stdio. Documents
//! are addressed by path and stay open until closed or the server exits.
//!
//! ## Module Structure
//!
//! - `server`: Main MCP server implementation
//! - `types`: Tool parameters and results

mod server;
pub mod types;

pub use server::{VdifeMcpServer, run_server};
