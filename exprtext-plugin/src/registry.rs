use std::collections::BTreeMap;

use exprtext_core::{ExpressionMacro, Stringify};
use itertools::Itertools;

/// The macros this plugin can expand, keyed by the name the host refers to them by.
pub struct MacroRegistry {
    macros: BTreeMap<&'static str, Box<dyn ExpressionMacro>>,
}

impl MacroRegistry {
    /// Registry with nothing in it.  Most callers want [`MacroRegistry::default`] instead.
    pub fn empty() -> Self {
        Self {
            macros: BTreeMap::new(),
        }
    }

    /// Add a macro, replacing any existing macro of the same name.
    pub fn with_macro(mut self, expression_macro: impl ExpressionMacro + 'static) -> Self {
        let name = expression_macro.name();
        if self.macros.insert(name, Box::new(expression_macro)).is_some() {
            tracing::warn!(name, "Replacing previously registered macro");
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&dyn ExpressionMacro> {
        self.macros.get(name).map(|m| m.as_ref())
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.macros.keys().copied()
    }

    /// Comma-separated list of registered names, for error messages.
    pub(crate) fn describe(&self) -> String {
        if self.macros.is_empty() {
            "none".to_string()
        } else {
            self.names().join(", ")
        }
    }
}

impl Default for MacroRegistry {
    fn default() -> Self {
        Self::empty().with_macro(Stringify)
    }
}
