//! Macro alias and shadowing resolution.
//!
//! Import aliasing is resolved before any message tree is built: a symbol
//! table maps local names to canonical macro identities, so the lowering
//! never deals with renamed imports. A scope stack handles local declarations
//! that take a macro alias over for an inner function body.

use std::collections::HashMap;

use crate::compiler::ChoiceFormat;

/// Canonical identity of an i18n macro, independent of local import aliases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MacroKind {
    /// Template/options message macro: `t`.
    T,
    Plural,
    Select,
    SelectOrdinal,
    /// Structural JSX macro: `<Trans>`.
    Trans,
}

impl MacroKind {
    /// Map an exported macro name to its identity.
    pub fn from_export_name(name: &str) -> Option<Self> {
        match name {
            "t" => Some(MacroKind::T),
            "plural" => Some(MacroKind::Plural),
            "select" => Some(MacroKind::Select),
            "selectOrdinal" => Some(MacroKind::SelectOrdinal),
            "Trans" => Some(MacroKind::Trans),
            _ => None,
        }
    }

    /// The ICU choice format for plural/select macros, `None` otherwise.
    pub fn choice_format(self) -> Option<ChoiceFormat> {
        match self {
            MacroKind::Plural => Some(ChoiceFormat::Plural),
            MacroKind::Select => Some(ChoiceFormat::Select),
            MacroKind::SelectOrdinal => Some(ChoiceFormat::SelectOrdinal),
            MacroKind::T | MacroKind::Trans => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Binding {
    Macro(MacroKind),
    /// A local declaration re-used a macro alias; the name no longer refers
    /// to the macro in this scope or below.
    Shadowed,
}

/// Tracks which local names refer to i18n macros.
///
/// Maintains a stack of scopes, innermost last. Entering a function or arrow
/// body pushes a scope; leaving pops it. Lookups search from innermost to
/// outermost, so an inner `t` parameter hides an outer `t` import.
#[derive(Debug)]
pub struct MacroBindings {
    scopes: Vec<HashMap<String, Binding>>,
}

impl Default for MacroBindings {
    fn default() -> Self {
        Self::new()
    }
}

impl MacroBindings {
    /// Create bindings with a single module scope.
    pub fn new() -> Self {
        Self {
            scopes: vec![HashMap::new()],
        }
    }

    /// Record `import { t as alias } from '...'` in the module scope.
    pub fn register_import(&mut self, local: &str, kind: MacroKind) {
        self.scopes[0].insert(local.to_string(), Binding::Macro(kind));
    }

    /// Record a local declaration that takes over a macro alias in the
    /// current scope. Names without a macro binding are ignored.
    pub fn shadow(&mut self, name: &str) {
        if self.resolve(name).is_some()
            && let Some(scope) = self.scopes.last_mut()
        {
            scope.insert(name.to_string(), Binding::Shadowed);
        }
    }

    pub fn enter_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    /// Keeps at least the module scope.
    pub fn exit_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    /// Resolve a local name to a macro identity, innermost scope first.
    pub fn resolve(&self, name: &str) -> Option<MacroKind> {
        for scope in self.scopes.iter().rev() {
            if let Some(binding) = scope.get(name) {
                return match binding {
                    Binding::Macro(kind) => Some(*kind),
                    Binding::Shadowed => None,
                };
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_alias_resolves_to_macro() {
        let mut bindings = MacroBindings::new();
        bindings.register_import("t2", MacroKind::T);

        assert_eq!(bindings.resolve("t2"), Some(MacroKind::T));
        assert_eq!(bindings.resolve("t"), None);
    }

    #[test]
    fn test_shadowed_name_stops_resolving() {
        let mut bindings = MacroBindings::new();
        bindings.register_import("t", MacroKind::T);

        bindings.enter_scope();
        bindings.shadow("t");
        assert_eq!(bindings.resolve("t"), None);

        bindings.exit_scope();
        assert_eq!(bindings.resolve("t"), Some(MacroKind::T));
    }

    #[test]
    fn test_shadow_of_unbound_name_is_ignored() {
        let mut bindings = MacroBindings::new();
        bindings.enter_scope();
        bindings.shadow("unrelated");
        bindings.exit_scope();
        assert_eq!(bindings.resolve("unrelated"), None);
    }

    #[test]
    fn test_exit_scope_keeps_module_scope() {
        let mut bindings = MacroBindings::new();
        bindings.register_import("t", MacroKind::T);
        bindings.exit_scope();
        assert_eq!(bindings.resolve("t"), Some(MacroKind::T));
    }

    #[test]
    fn test_export_name_mapping() {
        assert_eq!(MacroKind::from_export_name("t"), Some(MacroKind::T));
        assert_eq!(
            MacroKind::from_export_name("selectOrdinal"),
            Some(MacroKind::SelectOrdinal)
        );
        assert_eq!(MacroKind::from_export_name("useLingui"), None);
    }
}
