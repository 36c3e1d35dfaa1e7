//! Module-level macro call site discovery.
//!
//! One pass over a parsed module: imports from the configured macro module
//! specifiers seed the alias table, a scope stack tracks local declarations
//! that shadow an alias, and each recognized call site is compiled through
//! its own isolated pipeline. A site that fails compilation becomes a
//! diagnostic; the remaining sites are unaffected.

use swc_common::Span;
use swc_ecma_ast::{
    ArrowExpr, CallExpr, Callee, Expr, Function, ImportSpecifier, JSXElement, JSXElementName,
    Module, ModuleDecl, ModuleExportName, ModuleItem, ObjectPatProp, Pat, TaggedTpl,
    VarDeclarator,
};
use swc_ecma_visit::{Visit, VisitWith};

use crate::compiler::{CompileOptions, MessageDescriptor, UsageError};
use crate::lower::bindings::{MacroBindings, MacroKind};
use crate::lower::context::{CompiledSite, LowerCtx, SiteDiagnostic};
use crate::lower::{js, jsx};

/// Everything one module compiled to: sites in source order, plus the call
/// sites that failed.
#[derive(Debug)]
pub struct ModuleOutput {
    pub sites: Vec<CompiledSite>,
    pub errors: Vec<SiteDiagnostic>,
}

/// Walks a module, compiling every macro call site it recognizes.
pub struct ModuleCompiler<'a> {
    macro_modules: &'a [String],
    options: CompileOptions,
    bindings: MacroBindings,
    sites: Vec<CompiledSite>,
    errors: Vec<SiteDiagnostic>,
}

impl<'a> ModuleCompiler<'a> {
    pub fn new(macro_modules: &'a [String], options: CompileOptions) -> Self {
        Self {
            macro_modules,
            options,
            bindings: MacroBindings::new(),
            sites: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Compile every macro call site in the module.
    pub fn compile(mut self, module: &Module) -> ModuleOutput {
        self.collect_imports(module);
        self.visit_module(module);

        // Nested sites were recorded bottom-up; reports read in source order.
        let mut sites = self.sites;
        sites.sort_by_key(|site| site.span.lo);
        let mut errors = self.errors;
        errors.sort_by_key(|diagnostic| diagnostic.span.lo);

        ModuleOutput { sites, errors }
    }

    /// Seed the alias table from `import { t as alias } from '<macro module>'`.
    fn collect_imports(&mut self, module: &Module) {
        for item in &module.body {
            let ModuleItem::ModuleDecl(ModuleDecl::Import(import)) = item else {
                continue;
            };
            if import.type_only {
                continue;
            }
            let Some(src) = import.src.value.as_str() else {
                continue;
            };
            if !self.macro_modules.iter().any(|module| module == src) {
                continue;
            }
            for specifier in &import.specifiers {
                let ImportSpecifier::Named(named) = specifier else {
                    continue;
                };
                if named.is_type_only {
                    continue;
                }
                let exported = match &named.imported {
                    Some(ModuleExportName::Ident(ident)) => ident.sym.to_string(),
                    Some(ModuleExportName::Str(s)) => {
                        s.value.as_str().unwrap_or_default().to_string()
                    }
                    None => named.local.sym.to_string(),
                };
                if let Some(kind) = MacroKind::from_export_name(&exported) {
                    self.bindings
                        .register_import(named.local.sym.as_str(), kind);
                }
            }
        }
    }

    /// Run one call site through an isolated pipeline and absorb the result.
    /// On failure the site's nested descriptors are dropped with it.
    fn compile_site<F>(&mut self, span: Span, lower: F)
    where
        F: FnOnce(&mut LowerCtx) -> Result<MessageDescriptor, UsageError>,
    {
        let mut cx = LowerCtx::new(&self.bindings, self.options);
        match lower(&mut cx) {
            Ok(_) => self.sites.extend(cx.compiled),
            Err(error) => self.errors.push(SiteDiagnostic { span, error }),
        }
    }

    /// Mark every binding a pattern introduces as shadowing a macro alias.
    fn shadow_pat(&mut self, pat: &Pat) {
        match pat {
            Pat::Ident(ident) => self.bindings.shadow(ident.id.sym.as_str()),
            Pat::Array(array) => {
                for pat in array.elems.iter().flatten() {
                    self.shadow_pat(pat);
                }
            }
            Pat::Object(object) => {
                for prop in &object.props {
                    match prop {
                        ObjectPatProp::KeyValue(kv) => self.shadow_pat(&kv.value),
                        ObjectPatProp::Assign(assign) => {
                            self.bindings.shadow(assign.key.sym.as_str());
                        }
                        ObjectPatProp::Rest(rest) => self.shadow_pat(&rest.arg),
                    }
                }
            }
            Pat::Assign(assign) => self.shadow_pat(&assign.left),
            Pat::Rest(rest) => self.shadow_pat(&rest.arg),
            Pat::Expr(_) | Pat::Invalid(_) => {}
        }
    }
}

impl Visit for ModuleCompiler<'_> {
    fn visit_function(&mut self, node: &Function) {
        self.bindings.enter_scope();
        for param in &node.params {
            self.shadow_pat(&param.pat);
        }
        node.visit_children_with(self);
        self.bindings.exit_scope();
    }

    fn visit_arrow_expr(&mut self, node: &ArrowExpr) {
        self.bindings.enter_scope();
        for param in &node.params {
            self.shadow_pat(param);
        }
        node.visit_children_with(self);
        self.bindings.exit_scope();
    }

    fn visit_var_declarator(&mut self, node: &VarDeclarator) {
        self.shadow_pat(&node.name);
        node.visit_children_with(self);
    }

    fn visit_tagged_tpl(&mut self, node: &TaggedTpl) {
        if let Expr::Ident(tag) = &*node.tag
            && self.bindings.resolve(tag.sym.as_str()) == Some(MacroKind::T)
        {
            self.compile_site(node.span, |cx| js::compile_tagged_template(cx, node));
            return;
        }
        node.visit_children_with(self);
    }

    fn visit_call_expr(&mut self, node: &CallExpr) {
        if let Callee::Expr(callee) = &node.callee
            && let Expr::Ident(ident) = &**callee
            && let Some(kind) = self.bindings.resolve(ident.sym.as_str())
        {
            match kind {
                MacroKind::T => {
                    self.compile_site(node.span, |cx| js::compile_t_call(cx, node));
                    return;
                }
                MacroKind::Plural | MacroKind::Select | MacroKind::SelectOrdinal => {
                    if let Some(format) = kind.choice_format() {
                        self.compile_site(node.span, |cx| {
                            js::compile_choice_call(cx, format, node)
                        });
                        return;
                    }
                }
                // `Trans` called as a function is not a macro invocation.
                MacroKind::Trans => {}
            }
        }
        node.visit_children_with(self);
    }

    fn visit_jsx_element(&mut self, node: &JSXElement) {
        if let JSXElementName::Ident(name) = &node.opening.name
            && self.bindings.resolve(name.sym.as_str()) == Some(MacroKind::Trans)
        {
            self.compile_site(node.span, |cx| jsx::compile_trans_element(cx, node));
            return;
        }
        node.visit_children_with(self);
    }
}
