//! Per-call-site lowering context.

use swc_common::Span;
use swc_ecma_ast::{CallExpr, Callee, Expr, JSXElement, JSXElementName, TaggedTpl};

use crate::compiler::{ChoiceFormat, CompileOptions, MessageDescriptor, UsageError};
use crate::lower::bindings::{MacroBindings, MacroKind};

/// Shape of the output invocation a call site compiles into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiteKind {
    /// Function-style: `i18n._({...})`.
    Call,
    /// Component-style: `<Trans ... />`.
    Element,
}

/// One successfully compiled macro call site.
#[derive(Debug, Clone)]
pub struct CompiledSite {
    pub span: Span,
    pub kind: SiteKind,
    pub descriptor: MessageDescriptor,
}

/// A call site that failed to compile. Fatal for that site only.
#[derive(Debug, Clone)]
pub struct SiteDiagnostic {
    pub span: Span,
    pub error: UsageError,
}

/// State threaded through the lowering of one top-level macro call site.
///
/// Nested macro invocations compile bottom-up through the same context, so
/// `compiled` accumulates every descriptor produced under the site, inner
/// ones first. Bindings are read-only here: scope tracking happens in the
/// module visitor before lowering starts.
pub struct LowerCtx<'a> {
    pub bindings: &'a MacroBindings,
    pub options: CompileOptions,
    pub compiled: Vec<CompiledSite>,
}

impl<'a> LowerCtx<'a> {
    pub fn new(bindings: &'a MacroBindings, options: CompileOptions) -> Self {
        Self {
            bindings,
            options,
            compiled: Vec::new(),
        }
    }

    /// Record a compiled descriptor for reporting.
    pub fn record(&mut self, span: Span, kind: SiteKind, descriptor: &MessageDescriptor) {
        self.compiled.push(CompiledSite {
            span,
            kind,
            descriptor: descriptor.clone(),
        });
    }

    /// The macro a tagged template invokes, if any.
    pub fn tag_macro(&self, tagged: &TaggedTpl) -> Option<MacroKind> {
        match &*tagged.tag {
            Expr::Ident(ident) => self.bindings.resolve(ident.sym.as_str()),
            _ => None,
        }
    }

    /// The macro a call expression invokes, if any.
    pub fn callee_macro(&self, call: &CallExpr) -> Option<MacroKind> {
        if let Callee::Expr(callee) = &call.callee
            && let Expr::Ident(ident) = &**callee
        {
            return self.bindings.resolve(ident.sym.as_str());
        }
        None
    }

    /// The choice format a call expression invokes, if it is a
    /// plural/select/selectOrdinal macro call.
    pub fn callee_choice(&self, call: &CallExpr) -> Option<ChoiceFormat> {
        self.callee_macro(call).and_then(MacroKind::choice_format)
    }

    /// The macro a JSX element invokes, if any.
    pub fn element_macro(&self, element: &JSXElement) -> Option<MacroKind> {
        match &element.opening.name {
            JSXElementName::Ident(ident) => self.bindings.resolve(ident.sym.as_str()),
            _ => None,
        }
    }
}
