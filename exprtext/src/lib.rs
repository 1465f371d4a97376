//! A `stringify` expression macro that keeps the value.
//!
//! ```
//! use exprtext::stringify;
//!
//! let (x, y) = (2, 3);
//! let (value, text) = stringify!(x + y);
//!
//! assert_eq!(value, 5);
//! assert_eq!(text, "x + y");
//! ```
//!
//! The same expansion is available to other compilers through the `exprtext-plugin` executable;
//! [`expander`] exposes the logic both of them share.

#[cfg(feature = "macros")]
pub use exprtext_macros::stringify;

pub use exprtext_core as expander;
