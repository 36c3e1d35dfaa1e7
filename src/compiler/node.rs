//! The abstract message tree consumed by the engine.
//!
//! The host lowers whatever concrete syntax it understands (template tags,
//! options-object calls, JSX) into this variant set before compilation. The
//! engine never sees source text or module structure, only these nodes plus
//! the embedded SWC expressions it treats as opaque values.

use swc_ecma_ast::{Expr, JSXElement};

use crate::compiler::descriptor::MessageDescriptor;

/// How a text run was encoded at the call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextKind {
    /// Text that came from markup layout (JSX text). Subject to whitespace
    /// normalization and message-grammar escaping.
    Markup,
    /// Explicitly-encoded text (string or template literal). Preserved
    /// verbatim, including ICU syntax written by hand.
    Literal,
}

/// Choice argument format of a nested plural/select macro.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChoiceFormat {
    Plural,
    Select,
    SelectOrdinal,
}

impl ChoiceFormat {
    /// The ICU keyword emitted into the message string.
    pub fn keyword(self) -> &'static str {
        match self {
            ChoiceFormat::Plural => "plural",
            ChoiceFormat::Select => "select",
            ChoiceFormat::SelectOrdinal => "selectordinal",
        }
    }
}

/// One node of the message tree.
#[derive(Debug, Clone)]
pub enum MessageNode {
    /// A literal text run.
    Text { value: String, kind: TextKind },

    /// An embedded value. `simple_name` is set only when the expression is a
    /// bare identifier reference, which enables a named placeholder.
    Expression {
        expr: Box<Expr>,
        simple_name: Option<String>,
    },

    /// A structural wrapper with nested content. `shape` keeps the element's
    /// tag and attributes with children stripped, ready for the components
    /// mapping.
    Element {
        shape: Box<JSXElement>,
        children: Vec<MessageNode>,
        self_closing: bool,
    },

    /// The already-compiled output of an inner macro invocation. Opaque at
    /// this level: it becomes a single value placeholder, never re-flattened.
    NestedMessage { descriptor: MessageDescriptor },

    /// A plural/select macro nested in an expression position. Unlike
    /// `NestedMessage` it flattens inline as an ICU choice argument, with its
    /// value expression interned in the parent registry and its case bodies
    /// flattened into the same message.
    Choice {
        format: ChoiceFormat,
        value: Box<Expr>,
        simple_name: Option<String>,
        offset: Option<String>,
        cases: Vec<(String, Vec<MessageNode>)>,
    },
}

impl MessageNode {
    pub fn text(value: impl Into<String>, kind: TextKind) -> Self {
        MessageNode::Text {
            value: value.into(),
            kind,
        }
    }

    pub fn is_element(&self) -> bool {
        matches!(self, MessageNode::Element { .. })
    }
}
