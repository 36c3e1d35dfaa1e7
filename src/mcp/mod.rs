//! Model Context Protocol (MCP) server implementation.
//!
//! Exposes lingo's compilation pipeline to AI assistants over stdio.
//!
//! ## Module Structure
//!
//! - `server`: Main MCP server implementation
//! - `types`: MCP-specific type definitions

mod server;
pub mod types;

pub use server::{LingoMcpServer, run_server};
