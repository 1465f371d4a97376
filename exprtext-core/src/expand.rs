use proc_macro2::{Literal, Span, TokenStream};
use quote::{ToTokens, quote};
use syn::parse::Parser;
use syn::punctuated::Punctuated;
use syn::spanned::Spanned;
use syn::{Expr, Token};

use crate::{MacroError, Result};

const MACRO_NAME: &str = "stringify";

/// The result of a successful `stringify` expansion: the single argument expression, and the text
/// that will be paired with it.
#[derive(Debug, Clone)]
pub struct Expansion {
    argument: Expr,
    source_text: String,
}

impl Expansion {
    pub fn argument(&self) -> &Expr {
        &self.argument
    }

    pub fn source_text(&self) -> &str {
        &self.source_text
    }

    /// Render the replacement expression as source text, for hosts that splice text rather than
    /// tokens.
    ///
    /// The argument is emitted exactly as [`Self::source_text`] recorded it, so when the original
    /// source was available the host gets back its own formatting untouched.
    pub fn to_source(&self) -> String {
        format!("({}, {})", self.source_text, Literal::string(&self.source_text))
    }
}

impl ToTokens for Expansion {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        let argument = &self.argument;
        let text = Literal::string(&self.source_text);

        tokens.extend(quote! { (#argument, #text) });
    }
}

/// Expand the arguments of a `stringify` invocation.
///
/// `input` is everything between the invocation's parentheses.  It must be exactly one expression,
/// optionally followed by a trailing comma.
pub fn expand(input: TokenStream) -> Result<Expansion> {
    let arguments = Punctuated::<Expr, Token![,]>::parse_terminated.parse2(input)?;
    let found = arguments.len();
    let mut arguments = arguments.into_iter();

    match (arguments.next(), arguments.next()) {
        (Some(argument), None) => {
            let source_text = source_text(&argument);
            Ok(Expansion {
                argument,
                source_text,
            })
        }
        (None, _) => Err(MacroError::MalformedInvocation {
            macro_name: MACRO_NAME,
            found,
            span: Span::call_site(),
        }),
        (Some(_), Some(extra)) => Err(MacroError::MalformedInvocation {
            macro_name: MACRO_NAME,
            found,
            span: extra.span(),
        }),
    }
}

/// The text of an expression as it should appear in the expansion.
///
/// When the expression's tokens carry real source locations (inside rustc where the compiler can
/// join spans, or with `proc-macro2`'s `span-locations` feature) this is the original source slice.
/// Otherwise it falls back to the token rendering, which is what `core::stringify!` produces.
pub fn source_text(expr: &Expr) -> String {
    let tokens = expr.to_token_stream();

    spanned_source_text(tokens.clone()).unwrap_or_else(|| tokens.to_string())
}

fn spanned_source_text(tokens: TokenStream) -> Option<String> {
    let mut trees = tokens.into_iter();
    let first = trees.next()?.span();
    let span = match trees.last() {
        Some(last) => first.join(last.span())?,
        None => first,
    };

    span.source_text()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn single_argument_becomes_tuple() {
        let expansion = expand(quote!(x + y)).unwrap();

        assert_eq!(expansion.source_text(), "x + y");
        assert_matches!(expansion.argument(), Expr::Binary(_));
        assert_eq!(
            expansion.to_token_stream().to_string(),
            quote!((x + y, "x + y")).to_string()
        );
    }

    #[test]
    fn single_argument_as_source() {
        let expansion = expand(quote!(x + y)).unwrap();

        assert_eq!(expansion.to_source(), r#"(x + y, "x + y")"#);
    }

    #[test]
    fn trailing_comma_is_allowed() {
        let expansion = expand(quote!(a * b,)).unwrap();

        assert_eq!(expansion.source_text(), "a * b");
    }

    #[test]
    fn string_literals_are_escaped() {
        let expansion = expand(quote!("hi")).unwrap();

        assert_eq!(expansion.source_text(), r#""hi""#);
        assert_eq!(expansion.to_source(), r#"("hi", "\"hi\"")"#);
    }

    #[test]
    fn closure_with_commas_is_one_argument() {
        let expansion = expand(quote!(|a, b| a + b)).unwrap();

        assert_matches!(expansion.argument(), Expr::Closure(_));
    }

    #[test]
    fn no_arguments_is_malformed() {
        let err = expand(TokenStream::new()).unwrap_err();

        assert_matches!(err, MacroError::MalformedInvocation { found: 0, .. });
        assert_eq!(err.to_string(), "`stringify` takes exactly one argument, found 0");
    }

    #[test]
    fn two_arguments_is_malformed() {
        let err = expand(quote!(a, b)).unwrap_err();

        assert_matches!(err, MacroError::MalformedInvocation { found: 2, .. });
    }

    #[test]
    fn many_arguments_reports_count() {
        let err = expand(quote!(a, b, c + d)).unwrap_err();

        assert_matches!(err, MacroError::MalformedInvocation { found: 3, .. });
    }

    #[test]
    fn non_expression_is_parse_error() {
        let err = expand(quote!(struct Foo;)).unwrap_err();

        assert_matches!(err, MacroError::Parse(_));
    }

    #[test]
    fn errors_render_as_compile_error() {
        let err = expand(quote!(a, b)).unwrap_err();
        let tokens = err.to_compile_error().to_string();

        assert!(tokens.contains("compile_error"), "{tokens}");
        assert!(tokens.contains("takes exactly one argument, found 2"), "{tokens}");
    }
}
