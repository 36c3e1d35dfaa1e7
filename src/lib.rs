//! Lingo - message extraction and compilation for JS/TSX i18n macros
//!
//! Lingo is a CLI tool and library that compiles i18n macro call sites
//! (``t`...` ``, `plural(...)`, `<Trans>...</Trans>`) in JS/TSX sources into
//! translation message descriptors: a canonical ICU-style format string, a
//! deterministic short id, and the value/component placeholder mappings the
//! runtime needs to render the message.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (user-facing commands)
//! - `compiler`: The compilation engine (normalize, flatten, id, descriptor)
//! - `config`: Configuration file loading and parsing
//! - `lower`: Lowering of concrete macro syntax into the engine's trees
//! - `mcp`: Model Context Protocol server implementation
//! - `parser`: SWC-based source parsing

pub mod cli;
pub mod compiler;
pub mod config;
pub mod lower;
pub mod mcp;
pub mod parser;
