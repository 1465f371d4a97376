use proc_macro2::{Span, TokenStream};
use thiserror::Error;

pub type Result<T, E = MacroError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum MacroError {
    #[error("`{macro_name}` takes exactly one argument, found {found}")]
    MalformedInvocation {
        macro_name: &'static str,
        found: usize,
        /// Where the diagnostic should point: the call site if nothing was passed, otherwise the
        /// first argument past the one that is allowed.
        span: Span,
    },

    #[error(transparent)]
    Parse(#[from] syn::Error),
}

impl MacroError {
    pub fn span(&self) -> Span {
        match self {
            MacroError::MalformedInvocation { span, .. } => *span,
            MacroError::Parse(e) => e.span(),
        }
    }

    /// Render this error as a `compile_error!` invocation, so that rustc reports it at the
    /// macro's call site in place of an expansion.
    pub fn to_compile_error(&self) -> TokenStream {
        match self {
            MacroError::Parse(e) => e.to_compile_error(),
            other => syn::Error::new(other.span(), other).to_compile_error(),
        }
    }
}
