//! Bottom-up resolution of macro invocations inside opaque expressions.
//!
//! An expression the engine treats as a single value — a ternary, a function
//! call, an element attribute — can still contain macro invocations.
//! Each one compiles through the full pipeline first (innermost first, so an
//! outer macro sees already-built inner calls) and is substituted in place
//! before the surrounding expression is interned as a placeholder value. This
//! is what keeps inner messages isolated: they get their own id and never
//! merge into the outer message text.

use swc_ecma_ast::Expr;
use swc_ecma_visit::{VisitMut, VisitMutWith};

use crate::compiler::{UsageError, build_runtime_call, build_trans_element};
use crate::lower::bindings::MacroKind;
use crate::lower::context::LowerCtx;
use crate::lower::{js, jsx};

/// Replace every macro invocation inside `expr` with its built runtime call.
pub fn resolve_nested_macros(cx: &mut LowerCtx, expr: &mut Expr) -> Result<(), UsageError> {
    let mut resolver = NestedMacroResolver { cx, error: None };
    expr.visit_mut_with(&mut resolver);
    match resolver.error {
        Some(error) => Err(error),
        None => Ok(()),
    }
}

struct NestedMacroResolver<'a, 'b> {
    cx: &'a mut LowerCtx<'b>,
    error: Option<UsageError>,
}

impl VisitMut for NestedMacroResolver<'_, '_> {
    fn visit_mut_expr(&mut self, expr: &mut Expr) {
        if self.error.is_some() {
            return;
        }

        // A macro invocation is compiled from its original form: its own
        // lowering recurses into whatever it contains. Only non-macro
        // expressions are walked further.
        let built = match expr {
            Expr::TaggedTpl(tagged) if self.cx.tag_macro(tagged) == Some(MacroKind::T) => {
                js::compile_tagged_template(self.cx, tagged)
                    .map(|descriptor| build_runtime_call(&descriptor))
            }
            Expr::Call(call) => {
                if self.cx.callee_macro(call) == Some(MacroKind::T) {
                    js::compile_t_call(self.cx, call)
                        .map(|descriptor| build_runtime_call(&descriptor))
                } else if let Some(format) = self.cx.callee_choice(call) {
                    js::compile_choice_call(self.cx, format, call)
                        .map(|descriptor| build_runtime_call(&descriptor))
                } else {
                    expr.visit_mut_children_with(self);
                    return;
                }
            }
            Expr::JSXElement(element)
                if self.cx.element_macro(element) == Some(MacroKind::Trans) =>
            {
                let passthrough = jsx::passthrough_attrs(element);
                jsx::compile_trans_element(self.cx, element).map(|descriptor| {
                    Expr::JSXElement(Box::new(build_trans_element(&descriptor, passthrough)))
                })
            }
            _ => {
                expr.visit_mut_children_with(self);
                return;
            }
        };

        match built {
            Ok(replacement) => *expr = replacement,
            Err(error) => self.error = Some(error),
        }
    }
}
