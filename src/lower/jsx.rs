//! Lowering of `<Trans>` macro elements.
//!
//! JSX text is markup: HTML entities are decoded and the whitespace
//! normalizer cleans up source-layout indentation. Expression containers
//! holding string or template literals are explicitly-encoded text and stay
//! verbatim (including the `{" "}` forced-space idiom). Nested elements
//! become numbered structural placeholders; nested macro invocations anywhere
//! inside — children, ternaries, element attributes — compile bottom-up into
//! their own descriptors first.

use std::sync::LazyLock;

use regex::Regex;
use swc_common::DUMMY_SP;
use swc_ecma_ast::{
    Expr, JSXAttrName, JSXAttrOrSpread, JSXAttrValue, JSXElement, JSXElementChild, JSXExpr, Lit,
};

use crate::compiler::{
    MessageDescriptor, MessageNode, MessageOverrides, TextKind, UsageError, build_trans_element,
    compile_message, normalize_whitespace,
};
use crate::lower::bindings::MacroKind;
use crate::lower::context::{LowerCtx, SiteKind};
use crate::lower::js::{lower_template, static_string};
use crate::lower::nested::resolve_nested_macros;

/// Attributes forwarded onto the built runtime element; everything else on
/// the macro element is either consumed (`id`, `context`, `comment`) or
/// dropped.
const PASSTHROUGH_ATTRS: &[&str] = &["render", "component"];

/// Compile a `<Trans>...</Trans>` element into its own descriptor.
pub fn compile_trans_element(
    cx: &mut LowerCtx,
    element: &JSXElement,
) -> Result<MessageDescriptor, UsageError> {
    let mut overrides = MessageOverrides::default();

    for attr in &element.opening.attrs {
        let JSXAttrOrSpread::JSXAttr(attr) = attr else {
            return Err(UsageError::MalformedMacro(
                "spread attribute on a message element".to_string(),
            ));
        };
        let JSXAttrName::Ident(name) = &attr.name else {
            continue;
        };
        let slot = match name.sym.as_str() {
            "id" => &mut overrides.custom_id,
            "context" => &mut overrides.context,
            "comment" => &mut overrides.comment,
            _ => continue,
        };
        let Some(value) = attr_string(attr.value.as_ref()) else {
            return Err(UsageError::MalformedMacro(format!(
                "\"{}\" attribute must be a static string",
                name.sym
            )));
        };
        *slot = Some(value);
    }

    let children = lower_children(cx, &element.children)?;
    let nodes = normalize_whitespace(children);
    let descriptor = compile_message(&nodes, &overrides, cx.options)?;
    cx.record(element.span, SiteKind::Element, &descriptor);
    Ok(descriptor)
}

/// Caller attributes that survive compilation onto the built element.
pub fn passthrough_attrs(element: &JSXElement) -> Vec<JSXAttrOrSpread> {
    element
        .opening
        .attrs
        .iter()
        .filter(|attr| {
            matches!(
                attr,
                JSXAttrOrSpread::JSXAttr(attr)
                    if matches!(&attr.name, JSXAttrName::Ident(name)
                        if PASSTHROUGH_ATTRS.contains(&name.sym.as_str()))
            )
        })
        .cloned()
        .collect()
}

/// Lower a JSX child sequence into message nodes. Whitespace is normalized by
/// the caller once the full sibling sequence is known.
fn lower_children(
    cx: &mut LowerCtx,
    children: &[JSXElementChild],
) -> Result<Vec<MessageNode>, UsageError> {
    let mut nodes = Vec::new();
    for child in children {
        match child {
            JSXElementChild::JSXText(text) => {
                nodes.push(MessageNode::text(
                    decode_entities(&text.value),
                    TextKind::Markup,
                ));
            }
            JSXElementChild::JSXExprContainer(container) => match &container.expr {
                // A container holding only a comment renders nothing.
                JSXExpr::JSXEmptyExpr(_) => {}
                JSXExpr::Expr(expr) => lower_container_expr(cx, expr, &mut nodes)?,
            },
            JSXElementChild::JSXElement(element) => {
                nodes.push(lower_child_element(cx, element)?);
            }
            JSXElementChild::JSXFragment(fragment) => {
                nodes.extend(lower_children(cx, &fragment.children)?);
            }
            JSXElementChild::JSXSpreadChild(_) => {
                return Err(UsageError::UnsupportedExpression(
                    "spread child in a message element".to_string(),
                ));
            }
        }
    }
    Ok(nodes)
}

fn lower_container_expr(
    cx: &mut LowerCtx,
    expr: &Expr,
    nodes: &mut Vec<MessageNode>,
) -> Result<(), UsageError> {
    match expr {
        Expr::Lit(Lit::Str(s)) => {
            let Some(text) = s.value.as_str() else {
                return Err(UsageError::UnsupportedExpression(
                    "non-UTF-8 string literal".to_string(),
                ));
            };
            nodes.push(MessageNode::text(text, TextKind::Literal));
        }
        // A template literal in a container lowers like a `t` template:
        // quasis stay verbatim, interpolations become placeholders.
        Expr::Tpl(tpl) => nodes.extend(lower_template(cx, tpl)?),
        Expr::JSXElement(element) => nodes.push(lower_child_element(cx, element)?),
        Expr::Ident(ident) => nodes.push(MessageNode::Expression {
            expr: Box::new(expr.clone()),
            simple_name: Some(ident.sym.to_string()),
        }),
        _ => {
            let mut expr = expr.clone();
            resolve_nested_macros(cx, &mut expr)?;
            nodes.push(MessageNode::Expression {
                expr: Box::new(expr),
                simple_name: None,
            });
        }
    }
    Ok(())
}

fn lower_child_element(
    cx: &mut LowerCtx,
    element: &JSXElement,
) -> Result<MessageNode, UsageError> {
    // A nested message element compiles bottom-up into its own descriptor;
    // the outer message sees its built invocation as a childless component.
    if cx.element_macro(element) == Some(MacroKind::Trans) {
        let passthrough = passthrough_attrs(element);
        let descriptor = compile_trans_element(cx, element)?;
        let built = build_trans_element(&descriptor, passthrough);
        return Ok(MessageNode::Element {
            shape: Box::new(built),
            children: Vec::new(),
            self_closing: true,
        });
    }

    let children = normalize_whitespace(lower_children(cx, &element.children)?);
    let shape = strip_to_shape(cx, element)?;
    let self_closing = element.opening.self_closing || children.is_empty();

    Ok(MessageNode::Element {
        shape: Box::new(shape),
        children,
        self_closing,
    })
}

/// The element with children stripped and attributes kept, ready for the
/// components mapping. Macro invocations hidden in attribute values (e.g.
/// ``title={t`...`}``) are resolved here.
fn strip_to_shape(cx: &mut LowerCtx, element: &JSXElement) -> Result<JSXElement, UsageError> {
    let mut opening = element.opening.clone();
    opening.span = DUMMY_SP;
    opening.self_closing = true;

    for attr in &mut opening.attrs {
        if let JSXAttrOrSpread::JSXAttr(attr) = attr
            && let Some(JSXAttrValue::JSXExprContainer(container)) = &mut attr.value
            && let JSXExpr::Expr(expr) = &mut container.expr
        {
            resolve_nested_macros(cx, expr)?;
        }
    }

    Ok(JSXElement {
        span: DUMMY_SP,
        opening,
        children: Vec::new(),
        closing: None,
    })
}

fn attr_string(value: Option<&JSXAttrValue>) -> Option<String> {
    match value? {
        JSXAttrValue::Str(s) => s.value.as_str().map(str::to_string),
        JSXAttrValue::JSXExprContainer(container) => match &container.expr {
            JSXExpr::Expr(expr) => static_string(expr),
            JSXExpr::JSXEmptyExpr(_) => None,
        },
        _ => None,
    }
}

static ENTITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new("&(#[0-9]+|#[xX][0-9a-fA-F]+|[a-zA-Z][a-zA-Z0-9]*);").expect("valid entity regex")
});

/// Decode HTML entities in markup text. Unknown entities stay verbatim.
fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    ENTITY_RE
        .replace_all(text, |caps: &regex::Captures| {
            decode_entity(&caps[1]).unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

fn decode_entity(body: &str) -> Option<String> {
    if let Some(hex) = body.strip_prefix("#x").or_else(|| body.strip_prefix("#X")) {
        return u32::from_str_radix(hex, 16)
            .ok()
            .and_then(char::from_u32)
            .map(String::from);
    }
    if let Some(dec) = body.strip_prefix('#') {
        return dec
            .parse::<u32>()
            .ok()
            .and_then(char::from_u32)
            .map(String::from);
    }
    let decoded = match body {
        "amp" => "&",
        "lt" => "<",
        "gt" => ">",
        "quot" => "\"",
        "apos" => "'",
        "nbsp" => "\u{a0}",
        _ => return None,
    };
    Some(decoded.to_string())
}
