use proc_macro2::TokenStream;

use crate::{Expansion, Result};

/// An expression macro that a plugin host can look up by name and expand.
///
/// Implementations must be stateless; a single instance is shared by every expansion request.
pub trait ExpressionMacro: Send + Sync {
    /// The name the macro is invoked by, without any `!` or `#` sigil.
    fn name(&self) -> &'static str;

    /// Expand the tokens between the invocation's parentheses.
    fn expand(&self, arguments: TokenStream) -> Result<Expansion>;
}

/// `stringify(expr)` → `(expr, "expr")`
#[derive(Clone, Copy, Debug, Default)]
pub struct Stringify;

impl ExpressionMacro for Stringify {
    fn name(&self) -> &'static str {
        "stringify"
    }

    fn expand(&self, arguments: TokenStream) -> Result<Expansion> {
        crate::expand(arguments)
    }
}
