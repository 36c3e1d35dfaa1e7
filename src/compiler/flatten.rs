//! Flattening the message tree into the canonical format string.
//!
//! Depth-first, left-to-right: text emits itself, embedded values emit
//! `{key}`, structural elements emit `<key>…</key>` or `<key/>`, choice
//! macros emit an inline ICU choice argument. Placeholder keys come from the
//! registry, so the same traversal that produces the message string also
//! produces the values/components mappings.

use crate::compiler::call::build_runtime_call;
use crate::compiler::node::{MessageNode, TextKind};
use crate::compiler::registry::PlaceholderRegistry;

/// Flatten a sibling sequence into the raw message string, interning every
/// placeholder in `registry`. Deterministic: the same tree always yields the
/// same string and the same key assignment.
pub fn flatten(nodes: &[MessageNode], registry: &mut PlaceholderRegistry) -> String {
    let mut message = String::new();
    for node in nodes {
        flatten_node(node, registry, &mut message);
    }
    message
}

fn flatten_node(node: &MessageNode, registry: &mut PlaceholderRegistry, out: &mut String) {
    match node {
        MessageNode::Text { value, kind } => match kind {
            TextKind::Markup => escape_markup_into(value, out),
            // Explicitly-encoded text passes ICU syntax through untouched.
            TextKind::Literal => out.push_str(value),
        },
        MessageNode::Expression { expr, simple_name } => {
            let key = registry.intern_expression(expr.clone(), simple_name.as_deref());
            out.push('{');
            out.push_str(&key);
            out.push('}');
        }
        MessageNode::NestedMessage { descriptor } => {
            // The inner message was compiled by its own pipeline run; at this
            // level it is one opaque value holding its runtime invocation.
            let call = build_runtime_call(descriptor);
            let key = registry.intern_expression(Box::new(call), None);
            out.push('{');
            out.push_str(&key);
            out.push('}');
        }
        MessageNode::Element {
            shape,
            children,
            self_closing,
        } => {
            let key = registry.intern_element(shape.clone());
            if *self_closing || children.is_empty() {
                out.push('<');
                out.push_str(&key);
                out.push_str("/>");
            } else {
                out.push('<');
                out.push_str(&key);
                out.push('>');
                for child in children {
                    flatten_node(child, registry, out);
                }
                out.push_str("</");
                out.push_str(&key);
                out.push('>');
            }
        }
        MessageNode::Choice {
            format,
            value,
            simple_name,
            offset,
            cases,
        } => {
            let key = registry.intern_expression(value.clone(), simple_name.as_deref());
            out.push('{');
            out.push_str(&key);
            out.push_str(", ");
            out.push_str(format.keyword());
            out.push(',');
            if let Some(offset) = offset {
                out.push_str(" offset:");
                out.push_str(offset);
            }
            for (selector, body) in cases {
                out.push(' ');
                out.push_str(selector);
                out.push_str(" {");
                for child in body {
                    flatten_node(child, registry, out);
                }
                out.push('}');
            }
            out.push('}');
        }
    }
}

/// Escape characters that are structurally significant in the message
/// grammar, so normalized markup text round-trips as plain text.
fn escape_markup_into(text: &str, out: &mut String) {
    for c in text.chars() {
        if matches!(c, '\\' | '{' | '}' | '<' | '>') {
            out.push('\\');
        }
        out.push(c);
    }
}
