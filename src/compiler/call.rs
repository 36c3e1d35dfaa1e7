//! Building the runtime invocation for a compiled descriptor.
//!
//! A plain message becomes `i18n._({ ... })`; a structural message becomes a
//! self-closing `<Trans ... />` element. Either way the descriptor fields are
//! emitted in canonical order (`id`, `context`, `values`, `components`,
//! `message`, `comment`) with empty fields omitted, so production output
//! shrinks to `id` plus whatever the runtime needs. Splicing the built node
//! back into a module stays with the caller.

use swc_common::{DUMMY_SP, SyntaxContext};
use swc_ecma_ast::{
    Callee, CallExpr, Expr, ExprOrSpread, Ident, IdentName, JSXAttr, JSXAttrName, JSXAttrOrSpread,
    JSXAttrValue, JSXElement, JSXElementName, JSXExpr, JSXExprContainer, JSXOpeningElement,
    KeyValueProp, Lit, MemberExpr, MemberProp, Number, ObjectLit, Prop, PropName, PropOrSpread,
    Str,
};

use crate::compiler::descriptor::MessageDescriptor;

/// Identifier of the runtime translation object in built calls.
pub const RUNTIME_I18N: &str = "i18n";

/// Identifier of the runtime component in built structural invocations.
pub const RUNTIME_TRANS: &str = "Trans";

/// `i18n._({ ... })` — the function-style invocation for a plain message.
pub fn build_runtime_call(descriptor: &MessageDescriptor) -> Expr {
    Expr::Call(CallExpr {
        span: DUMMY_SP,
        ctxt: SyntaxContext::empty(),
        callee: Callee::Expr(Box::new(Expr::Member(MemberExpr {
            span: DUMMY_SP,
            obj: Box::new(Expr::Ident(ident(RUNTIME_I18N))),
            prop: MemberProp::Ident(ident_name("_")),
        }))),
        args: vec![ExprOrSpread {
            spread: None,
            expr: Box::new(Expr::Object(build_descriptor_object(descriptor))),
        }],
        type_args: None,
    })
}

/// The `{ id, context, values, components, message, comment }` object literal
/// handed to the runtime.
pub fn build_descriptor_object(descriptor: &MessageDescriptor) -> ObjectLit {
    let mut props: Vec<PropOrSpread> = Vec::new();

    props.push(key_value("id", str_lit(&descriptor.id)));
    if let Some(context) = &descriptor.context {
        props.push(key_value("context", str_lit(context)));
    }
    if !descriptor.values.is_empty() {
        let entries = descriptor
            .values
            .iter()
            .map(|(key, expr)| (key.as_str(), (**expr).clone()));
        props.push(key_value("values", Expr::Object(object_of(entries))));
    }
    if !descriptor.components.is_empty() {
        let entries = descriptor
            .components
            .iter()
            .map(|(key, shape)| (key.as_str(), Expr::JSXElement(shape.clone())));
        props.push(key_value("components", Expr::Object(object_of(entries))));
    }
    if let Some(message) = &descriptor.message {
        props.push(key_value("message", str_lit(message)));
    }
    if let Some(comment) = &descriptor.comment {
        props.push(key_value("comment", str_lit(comment)));
    }

    ObjectLit {
        span: DUMMY_SP,
        props,
    }
}

/// `<Trans id={...} values={{...}} components={{...}} ... />` — the
/// component-style invocation for a structural message. `passthrough` carries
/// caller attributes (`render`, `component`) that survive compilation.
pub fn build_trans_element(
    descriptor: &MessageDescriptor,
    passthrough: Vec<JSXAttrOrSpread>,
) -> JSXElement {
    let mut attrs = passthrough;

    attrs.push(jsx_attr("id", str_lit(&descriptor.id)));
    if let Some(context) = &descriptor.context {
        attrs.push(jsx_attr("context", str_lit(context)));
    }
    if !descriptor.values.is_empty() {
        let entries = descriptor
            .values
            .iter()
            .map(|(key, expr)| (key.as_str(), (**expr).clone()));
        attrs.push(jsx_attr("values", Expr::Object(object_of(entries))));
    }
    if !descriptor.components.is_empty() {
        let entries = descriptor
            .components
            .iter()
            .map(|(key, shape)| (key.as_str(), Expr::JSXElement(shape.clone())));
        attrs.push(jsx_attr("components", Expr::Object(object_of(entries))));
    }
    if let Some(message) = &descriptor.message {
        attrs.push(jsx_attr("message", str_lit(message)));
    }
    if let Some(comment) = &descriptor.comment {
        attrs.push(jsx_attr("comment", str_lit(comment)));
    }

    JSXElement {
        span: DUMMY_SP,
        opening: JSXOpeningElement {
            span: DUMMY_SP,
            name: JSXElementName::Ident(ident(RUNTIME_TRANS)),
            attrs,
            self_closing: true,
            type_args: None,
        },
        children: Vec::new(),
        closing: None,
    }
}

fn ident(sym: &str) -> Ident {
    Ident::new_no_ctxt(sym.into(), DUMMY_SP)
}

fn ident_name(sym: &str) -> IdentName {
    IdentName {
        span: DUMMY_SP,
        sym: sym.into(),
    }
}

fn str_lit(value: &str) -> Expr {
    Expr::Lit(Lit::Str(Str {
        span: DUMMY_SP,
        value: value.into(),
        raw: None,
    }))
}

fn object_of<'a>(entries: impl Iterator<Item = (&'a str, Expr)>) -> ObjectLit {
    ObjectLit {
        span: DUMMY_SP,
        props: entries
            .map(|(key, value)| key_value(key, value))
            .collect(),
    }
}

/// Object property whose key is an identifier, a decimal index, or a quoted
/// string, whichever round-trips.
fn key_value(key: &str, value: Expr) -> PropOrSpread {
    let key = if let Ok(index) = key.parse::<u32>() {
        PropName::Num(Number {
            span: DUMMY_SP,
            value: f64::from(index),
            raw: None,
        })
    } else if is_valid_ident(key) {
        PropName::Ident(ident_name(key))
    } else {
        PropName::Str(Str {
            span: DUMMY_SP,
            value: key.into(),
            raw: None,
        })
    };

    PropOrSpread::Prop(Box::new(Prop::KeyValue(KeyValueProp {
        key,
        value: Box::new(value),
    })))
}

fn is_valid_ident(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

fn jsx_attr(name: &str, value: Expr) -> JSXAttrOrSpread {
    JSXAttrOrSpread::JSXAttr(JSXAttr {
        span: DUMMY_SP,
        name: JSXAttrName::Ident(ident_name(name)),
        value: Some(JSXAttrValue::JSXExprContainer(JSXExprContainer {
            span: DUMMY_SP,
            expr: JSXExpr::Expr(Box::new(value)),
        })),
    })
}

/// A bare `<tag />` element for engine tests.
#[cfg(test)]
pub(crate) fn test_element(tag: &str) -> JSXElement {
    JSXElement {
        span: DUMMY_SP,
        opening: JSXOpeningElement {
            span: DUMMY_SP,
            name: JSXElementName::Ident(ident(tag)),
            attrs: Vec::new(),
            self_closing: true,
            type_args: None,
        },
        children: Vec::new(),
        closing: None,
    }
}

/// A bare identifier expression for engine tests.
#[cfg(test)]
pub(crate) fn test_ident_expr(sym: &str) -> Box<Expr> {
    Box::new(Expr::Ident(ident(sym)))
}
