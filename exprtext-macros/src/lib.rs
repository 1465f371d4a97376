extern crate proc_macro;

use proc_macro::TokenStream;
use quote::ToTokens;

/// Pair an expression with its own source text.
///
/// `stringify!(x + y)` expands to `(x + y, "x + y")`.  Exactly one argument is accepted; anything
/// else is a compile error at the call site and nothing is expanded.
///
/// Note that this shadows `core::stringify!` wherever it is imported.
#[proc_macro]
pub fn stringify(input: TokenStream) -> TokenStream {
    // Proc macros can't be tested in the crate that defines them; the tests for the expansion
    // itself live in `exprtext-core`, and the tests that invoke the macro live in `exprtext`.
    match exprtext_core::expand(input.into()) {
        Ok(expansion) => expansion.into_token_stream().into(),
        Err(e) => e.to_compile_error().into(),
    }
}
