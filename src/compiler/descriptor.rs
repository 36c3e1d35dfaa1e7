//! Compiled message descriptors and mode-dependent output shaping.

use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use swc_ecma_ast::{Expr, JSXElement};

use crate::compiler::error::{ConfigError, UsageError};
use crate::compiler::flatten::flatten;
use crate::compiler::id::generate_message_id;
use crate::compiler::node::MessageNode;
use crate::compiler::registry::PlaceholderRegistry;

/// Output shaping mode.
///
/// Development keeps every non-empty descriptor field; production strips
/// everything the runtime does not need for rendering (the id and the
/// placeholder mappings stay, the message text and translator metadata go).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Development,
    Production,
}

impl FromStr for Mode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "development" => Ok(Mode::Development),
            "production" => Ok(Mode::Production),
            other => Err(ConfigError::UnknownMode(other.to_string())),
        }
    }
}

/// Ambient per-run compilation options.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompileOptions {
    pub mode: Mode,
    /// Keep full descriptor metadata even in production, so a catalog
    /// extractor sees the same output as development builds.
    pub extract: bool,
}

impl CompileOptions {
    /// Whether non-essential descriptor fields survive output shaping.
    pub fn keep_metadata(self) -> bool {
        self.mode == Mode::Development || self.extract
    }
}

/// Caller-supplied overrides for one call site.
#[derive(Debug, Clone, Default)]
pub struct MessageOverrides {
    /// Explicit id. When present it becomes the descriptor id verbatim and
    /// hash generation is skipped.
    pub custom_id: Option<String>,
    /// Disambiguation tag; participates in id generation.
    pub context: Option<String>,
    /// Translator note; never participates in id generation.
    pub comment: Option<String>,
}

/// The compiled, immutable record of one translatable message.
///
/// Produced once per macro call site as a pure function of its message tree
/// and the ambient options, then handed to the call builder and discarded.
#[derive(Debug, Clone)]
pub struct MessageDescriptor {
    pub id: String,
    /// True when `id` was supplied by the caller rather than generated.
    pub custom_id: bool,
    /// Canonical format string. `None` when stripped by production shaping
    /// or when the message is empty (explicit-id-only call sites).
    pub message: Option<String>,
    /// Embedded values by placeholder key, in first-registration order.
    pub values: Vec<(String, Box<Expr>)>,
    /// Structural elements by component key, in first-registration order.
    pub components: Vec<(String, Box<JSXElement>)>,
    pub context: Option<String>,
    pub comment: Option<String>,
}

impl MessageDescriptor {
    /// Serializable view for reports: placeholder keys without the AST.
    pub fn summary(&self) -> DescriptorSummary {
        DescriptorSummary {
            id: self.id.clone(),
            context: self.context.clone(),
            values: self.values.iter().map(|(key, _)| key.clone()).collect(),
            components: self.components.iter().map(|(key, _)| key.clone()).collect(),
            message: self.message.clone(),
            comment: self.comment.clone(),
        }
    }
}

/// Descriptor fields in canonical order, without the embedded AST. This is
/// what reports and the MCP surface emit.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DescriptorSummary {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// Compile one message tree into a descriptor.
///
/// Runs the whole per-site pipeline: a fresh registry, flattening, id
/// derivation, and mode-dependent field retention. An empty message without
/// an explicit id is a usage error, fatal for this call site only.
pub fn compile_message(
    nodes: &[MessageNode],
    overrides: &MessageOverrides,
    options: CompileOptions,
) -> Result<MessageDescriptor, UsageError> {
    let mut registry = PlaceholderRegistry::new();
    let message = flatten(nodes, &mut registry);

    if message.trim().is_empty() && overrides.custom_id.is_none() {
        return Err(UsageError::EmptyMessage);
    }

    let id = match &overrides.custom_id {
        Some(id) => id.clone(),
        None => generate_message_id(&message, overrides.context.as_deref()),
    };

    let (values, components) = registry.into_parts();
    let keep = options.keep_metadata();

    Ok(MessageDescriptor {
        id,
        custom_id: overrides.custom_id.is_some(),
        message: (keep && !message.is_empty()).then_some(message),
        values,
        components,
        context: if keep { overrides.context.clone() } else { None },
        comment: if keep { overrides.comment.clone() } else { None },
    })
}
