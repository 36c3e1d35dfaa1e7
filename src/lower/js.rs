//! Lowering of JS macro call sites: ``t`...` ``, `t({...})`, and the choice
//! macros `plural`/`select`/`selectOrdinal`.
//!
//! Template text is explicitly-encoded: cooked quasi values become literal
//! runs with newlines preserved, and ICU syntax written by the author passes
//! through untouched. Interpolated bare identifiers become named
//! placeholders; everything else is anonymous.

use swc_ecma_ast::{CallExpr, Expr, Lit, Number, Prop, PropName, PropOrSpread, TaggedTpl, Tpl};

use crate::compiler::{
    ChoiceFormat, MessageDescriptor, MessageNode, MessageOverrides, TextKind, UsageError,
    compile_message,
};
use crate::lower::bindings::MacroKind;
use crate::lower::context::{LowerCtx, SiteKind};
use crate::lower::nested::resolve_nested_macros;

/// Compile a ``t`...` `` tagged template into its own descriptor.
pub fn compile_tagged_template(
    cx: &mut LowerCtx,
    tagged: &TaggedTpl,
) -> Result<MessageDescriptor, UsageError> {
    let nodes = lower_template(cx, &tagged.tpl)?;
    let descriptor = compile_message(&nodes, &MessageOverrides::default(), cx.options)?;
    cx.record(tagged.span, SiteKind::Call, &descriptor);
    Ok(descriptor)
}

/// Compile a `t({ id?, message, context?, comment? })` options call.
pub fn compile_t_call(cx: &mut LowerCtx, call: &CallExpr) -> Result<MessageDescriptor, UsageError> {
    let Some(arg) = call.args.first() else {
        return Err(UsageError::MalformedMacro(
            "expected a message descriptor argument".to_string(),
        ));
    };
    if arg.spread.is_some() {
        return Err(UsageError::MalformedMacro(
            "spread argument in macro call".to_string(),
        ));
    }
    let Expr::Object(object) = &*arg.expr else {
        return Err(UsageError::MalformedMacro(
            "expected a message descriptor object".to_string(),
        ));
    };

    let mut overrides = MessageOverrides::default();
    let mut nodes: Vec<MessageNode> = Vec::new();

    for prop in &object.props {
        let (key, value) = descriptor_prop(prop)?;
        match key.as_str() {
            "id" => overrides.custom_id = Some(static_prop_string("id", value)?),
            "context" => overrides.context = Some(static_prop_string("context", value)?),
            "comment" => overrides.comment = Some(static_prop_string("comment", value)?),
            "message" => nodes = lower_message_value(cx, value)?,
            other => {
                return Err(UsageError::MalformedMacro(format!(
                    "unknown message descriptor property \"{other}\""
                )));
            }
        }
    }

    let descriptor = compile_message(&nodes, &overrides, cx.options)?;
    cx.record(call.span, SiteKind::Call, &descriptor);
    Ok(descriptor)
}

/// Compile a standalone `plural(...)`/`select(...)` call into a descriptor
/// whose whole message is the ICU choice argument.
pub fn compile_choice_call(
    cx: &mut LowerCtx,
    format: ChoiceFormat,
    call: &CallExpr,
) -> Result<MessageDescriptor, UsageError> {
    let node = lower_choice(cx, format, call)?;
    let descriptor = compile_message(&[node], &MessageOverrides::default(), cx.options)?;
    cx.record(call.span, SiteKind::Call, &descriptor);
    Ok(descriptor)
}

/// Lower a template literal into alternating literal text and value nodes.
pub fn lower_template(cx: &mut LowerCtx, tpl: &Tpl) -> Result<Vec<MessageNode>, UsageError> {
    let mut nodes = Vec::new();
    for (i, quasi) in tpl.quasis.iter().enumerate() {
        let Some(text) = quasi.cooked.as_ref().and_then(|cooked| cooked.as_str()) else {
            return Err(UsageError::MalformedMacro(
                "template contains an invalid escape sequence".to_string(),
            ));
        };
        if !text.is_empty() {
            nodes.push(MessageNode::text(text, TextKind::Literal));
        }
        if let Some(expr) = tpl.exprs.get(i) {
            nodes.push(lower_interpolation(cx, expr)?);
        }
    }
    Ok(nodes)
}

/// Lower one interpolated expression.
///
/// Bare identifiers keep their name; a nested message macro compiles
/// bottom-up into an opaque value; a nested choice macro merges inline as an
/// ICU choice argument; everything else is an anonymous value (after any
/// macros hidden inside it have been resolved).
fn lower_interpolation(cx: &mut LowerCtx, expr: &Expr) -> Result<MessageNode, UsageError> {
    match expr {
        Expr::Ident(ident) => Ok(MessageNode::Expression {
            expr: Box::new(expr.clone()),
            simple_name: Some(ident.sym.to_string()),
        }),
        Expr::TaggedTpl(tagged) if cx.tag_macro(tagged) == Some(MacroKind::T) => {
            let descriptor = compile_tagged_template(cx, tagged)?;
            Ok(MessageNode::NestedMessage { descriptor })
        }
        Expr::Call(call) => {
            if cx.callee_macro(call) == Some(MacroKind::T) {
                let descriptor = compile_t_call(cx, call)?;
                Ok(MessageNode::NestedMessage { descriptor })
            } else if let Some(format) = cx.callee_choice(call) {
                lower_choice(cx, format, call)
            } else {
                lower_opaque(cx, expr)
            }
        }
        _ => lower_opaque(cx, expr),
    }
}

/// An expression the engine treats as a black box: resolve any macros nested
/// inside it, then intern it anonymously.
fn lower_opaque(cx: &mut LowerCtx, expr: &Expr) -> Result<MessageNode, UsageError> {
    let mut expr = expr.clone();
    resolve_nested_macros(cx, &mut expr)?;
    Ok(MessageNode::Expression {
        expr: Box::new(expr),
        simple_name: None,
    })
}

/// Lower a `plural`/`select`/`selectOrdinal` call into a choice node.
pub fn lower_choice(
    cx: &mut LowerCtx,
    format: ChoiceFormat,
    call: &CallExpr,
) -> Result<MessageNode, UsageError> {
    if call.args.len() != 2 || call.args.iter().any(|arg| arg.spread.is_some()) {
        return Err(UsageError::MalformedMacro(
            "choice macro expects a value and an options object".to_string(),
        ));
    }

    let value = &call.args[0].expr;
    let simple_name = match &**value {
        Expr::Ident(ident) => Some(ident.sym.to_string()),
        _ => None,
    };

    let Expr::Object(object) = &*call.args[1].expr else {
        return Err(UsageError::MalformedMacro(
            "choice macro options must be an object literal".to_string(),
        ));
    };

    let mut offset = None;
    let mut cases = Vec::new();
    for prop in &object.props {
        let (key, prop_value) = descriptor_prop(prop)?;
        if key == "offset" {
            offset = Some(offset_value(prop_value)?);
            continue;
        }
        let selector = match selector_of(prop)? {
            Some(selector) => selector,
            None => key,
        };
        cases.push((selector, lower_case_body(cx, prop_value)?));
    }

    Ok(MessageNode::Choice {
        format,
        value: value.clone(),
        simple_name,
        offset,
        cases,
    })
}

/// The body of one choice case: a string, a template (which may interpolate
/// further values), or another choice macro.
fn lower_case_body(cx: &mut LowerCtx, expr: &Expr) -> Result<Vec<MessageNode>, UsageError> {
    match expr {
        Expr::Lit(Lit::Str(s)) => {
            let Some(text) = s.value.as_str() else {
                return Err(UsageError::UnsupportedExpression(
                    "non-UTF-8 string literal".to_string(),
                ));
            };
            Ok(vec![MessageNode::text(text, TextKind::Literal)])
        }
        Expr::Tpl(tpl) => lower_template(cx, tpl),
        Expr::Call(call) => match cx.callee_macro(call).and_then(MacroKind::choice_format) {
            Some(format) => Ok(vec![lower_choice(cx, format, call)?]),
            None => Err(UsageError::MalformedMacro(
                "choice case must be a string, template, or nested choice macro".to_string(),
            )),
        },
        _ => Err(UsageError::MalformedMacro(
            "choice case must be a string, template, or nested choice macro".to_string(),
        )),
    }
}

/// Lower the message value of a `t({...})` call.
fn lower_message_value(cx: &mut LowerCtx, expr: &Expr) -> Result<Vec<MessageNode>, UsageError> {
    match expr {
        Expr::Lit(Lit::Str(s)) => {
            let Some(text) = s.value.as_str() else {
                return Err(UsageError::UnsupportedExpression(
                    "non-UTF-8 string literal".to_string(),
                ));
            };
            Ok(vec![MessageNode::text(text, TextKind::Literal)])
        }
        Expr::Tpl(tpl) => lower_template(cx, tpl),
        Expr::Call(call) => match cx.callee_macro(call).and_then(MacroKind::choice_format) {
            Some(format) => Ok(vec![lower_choice(cx, format, call)?]),
            None => Err(UsageError::MalformedMacro(
                "message must be a string, template, or choice macro".to_string(),
            )),
        },
        _ => Err(UsageError::MalformedMacro(
            "message must be a string, template, or choice macro".to_string(),
        )),
    }
}

/// Unpack one key/value property of a descriptor or options object.
fn descriptor_prop(prop: &PropOrSpread) -> Result<(String, &Expr), UsageError> {
    let PropOrSpread::Prop(prop) = prop else {
        return Err(UsageError::MalformedMacro(
            "spread property in macro options".to_string(),
        ));
    };
    let Prop::KeyValue(kv) = &**prop else {
        return Err(UsageError::MalformedMacro(
            "unsupported property in macro options".to_string(),
        ));
    };
    let Some(key) = prop_name(&kv.key) else {
        return Err(UsageError::MalformedMacro(
            "unsupported property key in macro options".to_string(),
        ));
    };
    Ok((key, &kv.value))
}

/// Numeric case keys lower to ICU exact selectors: `0` becomes `=0`.
fn selector_of(prop: &PropOrSpread) -> Result<Option<String>, UsageError> {
    if let PropOrSpread::Prop(prop) = prop
        && let Prop::KeyValue(kv) = &**prop
        && let PropName::Num(number) = &kv.key
    {
        return Ok(Some(format!("={}", format_number(number))));
    }
    Ok(None)
}

fn offset_value(expr: &Expr) -> Result<String, UsageError> {
    match expr {
        Expr::Lit(Lit::Num(number)) => Ok(format_number(number)),
        Expr::Lit(Lit::Str(s)) => s.value.as_str().map(str::to_string).ok_or_else(|| {
            UsageError::MalformedMacro("offset must be a number".to_string())
        }),
        _ => Err(UsageError::MalformedMacro(
            "offset must be a number".to_string(),
        )),
    }
}

fn format_number(number: &Number) -> String {
    if number.value.fract() == 0.0 {
        format!("{}", number.value as i64)
    } else {
        number.value.to_string()
    }
}

fn prop_name(name: &PropName) -> Option<String> {
    match name {
        PropName::Ident(ident) => Some(ident.sym.to_string()),
        PropName::Str(s) => s.value.as_str().map(str::to_string),
        PropName::Num(number) => Some(format_number(number)),
        _ => None,
    }
}

/// A compile-time string: a string literal or an expression-free template.
pub fn static_string(expr: &Expr) -> Option<String> {
    match expr {
        Expr::Lit(Lit::Str(s)) => s.value.as_str().map(str::to_string),
        Expr::Tpl(tpl) if tpl.exprs.is_empty() => tpl
            .quasis
            .iter()
            .map(|quasi| {
                quasi
                    .cooked
                    .as_ref()
                    .and_then(|cooked| cooked.as_str())
                    .map(str::to_string)
            })
            .collect::<Option<String>>(),
        _ => None,
    }
}

fn static_prop_string(key: &str, expr: &Expr) -> Result<String, UsageError> {
    static_string(expr).ok_or_else(|| {
        UsageError::MalformedMacro(format!("\"{key}\" must be a static string"))
    })
}
