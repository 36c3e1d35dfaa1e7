//! The message compilation engine.
//!
//! A pure, synchronous, per-invocation pipeline: normalized message nodes are
//! flattened into a canonical format string while a placeholder registry
//! assigns value/component keys, a deterministic short id is derived from the
//! result, and the descriptor is shaped for the configured output mode. Every
//! call site (including each nested one) gets a fresh registry; nothing is
//! shared across invocations, so independent sites compile safely in
//! parallel.

pub mod call;
pub mod descriptor;
pub mod error;
pub mod flatten;
pub mod id;
pub mod node;
pub mod normalize;
pub mod registry;

pub use call::{build_runtime_call, build_trans_element};
pub use descriptor::{
    CompileOptions, DescriptorSummary, MessageDescriptor, MessageOverrides, Mode, compile_message,
};
pub use error::{ConfigError, UsageError};
pub use flatten::flatten;
pub use id::generate_message_id;
pub use node::{ChoiceFormat, MessageNode, TextKind};
pub use normalize::normalize_whitespace;
pub use registry::PlaceholderRegistry;
