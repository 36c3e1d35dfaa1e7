//! Placeholder key assignment for embedded values and structural elements.

use swc_ecma_ast::{Expr, JSXElement};

/// Assigns stable placeholder keys within one macro invocation.
///
/// Values (embedded expressions) and components (structural elements) occupy
/// independent numbering spaces: each counter advances in document order of
/// first occurrence. Named expressions are deduplicated by name; anonymous
/// expressions and elements never are.
///
/// A registry is created fresh per call site (including each nested one) and
/// discarded after compilation. Counters only grow; there is no removal.
#[derive(Debug, Default)]
pub struct PlaceholderRegistry {
    values: Vec<(String, Box<Expr>)>,
    components: Vec<(String, Box<JSXElement>)>,
    next_value_index: usize,
    next_component_index: usize,
}

impl PlaceholderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern an embedded expression and return its placeholder key.
    ///
    /// A bare identifier keeps its own name, and repeated occurrences of that
    /// name share one entry (the latest expression wins). Anything else takes
    /// the next value index, whether or not an identical expression appeared
    /// before.
    pub fn intern_expression(&mut self, expr: Box<Expr>, simple_name: Option<&str>) -> String {
        if let Some(name) = simple_name {
            if let Some(slot) = self.values.iter_mut().find(|(key, _)| key == name) {
                slot.1 = expr;
            } else {
                self.values.push((name.to_string(), expr));
            }
            return name.to_string();
        }

        let key = self.next_value_index.to_string();
        self.next_value_index += 1;
        self.values.push((key.clone(), expr));
        key
    }

    /// Intern a structural element and return its component key.
    pub fn intern_element(&mut self, shape: Box<JSXElement>) -> String {
        let key = self.next_component_index.to_string();
        self.next_component_index += 1;
        self.components.push((key.clone(), shape));
        key
    }

    /// Accumulated value mapping in first-registration order.
    pub fn values(&self) -> &[(String, Box<Expr>)] {
        &self.values
    }

    /// Accumulated component mapping in first-registration order.
    pub fn components(&self) -> &[(String, Box<JSXElement>)] {
        &self.components
    }

    pub fn into_parts(self) -> (Vec<(String, Box<Expr>)>, Vec<(String, Box<JSXElement>)>) {
        (self.values, self.components)
    }
}
