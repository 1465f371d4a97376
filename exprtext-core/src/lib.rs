//! The expansion logic behind the `stringify` expression macro.
//!
//! This crate knows nothing about how it gets invoked.  The proc macro in
//! `exprtext-macros` feeds it the tokens rustc hands over, and the out-of-process plugin in
//! `exprtext-plugin` feeds it tokens lexed from source text that a host compiler sent over the
//! wire.  Either way the work is the same: check that there is exactly one argument, then build
//! `(argument, "argument source text")` around it.
//!
//! Everything here operates on [`proc_macro2`] types so that it can be exercised from ordinary unit
//! tests, outside of a proc macro context.

mod error;
mod expand;
mod expression;

pub use error::{MacroError, Result};
pub use expand::{Expansion, expand, source_text};
pub use expression::{ExpressionMacro, Stringify};
