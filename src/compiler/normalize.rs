//! Whitespace normalization for markup sibling sequences.
//!
//! Markup text carries the indentation and line breaks of the source layout,
//! which a rich-text renderer treats as insignificant. This pre-pass removes
//! them the same way the renderer would, so the flattened message contains
//! only the author's content. Literal runs (explicitly-encoded strings,
//! including the `{" "}` forced-space idiom) are never touched.

use crate::compiler::node::{MessageNode, TextKind};

/// Collapse insignificant whitespace in a sequence of sibling nodes.
///
/// Pure function over one sibling sequence; callers normalize each element's
/// children when that element's own sequence is lowered.
pub fn normalize_whitespace(nodes: Vec<MessageNode>) -> Vec<MessageNode> {
    // Clean each markup run in isolation and drop the ones that vanish,
    // which removes the pure newline-and-indent runs between siblings.
    let cleaned: Vec<MessageNode> = nodes
        .into_iter()
        .filter_map(|node| match node {
            MessageNode::Text {
                value,
                kind: TextKind::Markup,
            } => {
                let value = clean_markup_text(&value);
                (!value.is_empty()).then_some(MessageNode::Text {
                    value,
                    kind: TextKind::Markup,
                })
            }
            other => Some(other),
        })
        .collect();

    // Whitespace-only markup runs touching a structural boundary (sequence
    // edge or an adjacent element) are layout, not content.
    let keep: Vec<bool> = (0..cleaned.len())
        .map(|i| {
            if !is_whitespace_markup(&cleaned[i]) {
                return true;
            }
            let at_start = i == 0 || cleaned[i - 1].is_element();
            let at_end = i + 1 == cleaned.len() || cleaned[i + 1].is_element();
            !(at_start || at_end)
        })
        .collect();

    let mut out: Vec<MessageNode> = cleaned
        .into_iter()
        .zip(keep)
        .filter_map(|(node, keep)| keep.then_some(node))
        .collect();

    // Trim the outermost markup runs at the sequence edges.
    if let Some(MessageNode::Text {
        value,
        kind: TextKind::Markup,
    }) = out.first_mut()
    {
        *value = value.trim_start().to_string();
    }
    if let Some(MessageNode::Text {
        value,
        kind: TextKind::Markup,
    }) = out.last_mut()
    {
        *value = value.trim_end().to_string();
    }
    out.retain(|node| match node {
        MessageNode::Text { value, .. } => !value.is_empty(),
        _ => true,
    });

    out
}

fn is_whitespace_markup(node: &MessageNode) -> bool {
    matches!(
        node,
        MessageNode::Text { value, kind: TextKind::Markup } if value.trim().is_empty()
    )
}

/// Clean one markup text run the way a JSX renderer lays it out: indentation
/// after a line break and trailing whitespace before one are dropped,
/// whitespace-only lines disappear, and the surviving line boundaries
/// collapse to a single space. Tabs count as spaces.
fn clean_markup_text(value: &str) -> String {
    let lines = split_lines(value);
    let last_non_blank = lines
        .iter()
        .rposition(|line| line.chars().any(|c| c != ' ' && c != '\t'))
        .unwrap_or(0);

    let mut out = String::with_capacity(value.len());
    for (i, raw_line) in lines.iter().enumerate() {
        let is_first = i == 0;
        let is_last = i == lines.len() - 1;

        let mut line = raw_line.replace('\t', " ");
        if !is_first {
            line = line.trim_start_matches(' ').to_string();
        }
        if !is_last {
            line = line.trim_end_matches(' ').to_string();
        }
        if !line.is_empty() {
            out.push_str(&line);
            if i != last_non_blank {
                out.push(' ');
            }
        }
    }
    out
}

/// Split on `\r\n`, `\n`, or `\r`, keeping empty segments: whether the run
/// started or ended with a line break matters to the cleaning rules.
fn split_lines(value: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut rest = value;
    loop {
        match rest.find(['\n', '\r']) {
            Some(i) => {
                lines.push(&rest[..i]);
                let sep = if rest[i..].starts_with("\r\n") { 2 } else { 1 };
                rest = &rest[i + sep..];
            }
            None => {
                lines.push(rest);
                break;
            }
        }
    }
    lines
}
