use std::str::FromStr;

use proc_macro2::{Delimiter, TokenStream, TokenTree};

use crate::InvocationError;

/// A call-like macro invocation recovered from the source text the host sent.
///
/// Accepted shapes are `#name(args)`, `name!(args)` and `name(args)`, which covers the way the
/// common hosts spell a freestanding macro.
#[derive(Debug)]
pub struct Invocation {
    pub name: String,
    /// Everything between the parentheses.
    pub arguments: TokenStream,
}

impl FromStr for Invocation {
    type Err = InvocationError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let not_an_invocation = || InvocationError::NotAnInvocation {
            text: text.trim().to_string(),
        };

        let tokens = TokenStream::from_str(text).map_err(|e| InvocationError::Lex {
            message: e.to_string(),
        })?;
        let mut trees = tokens.into_iter().collect::<Vec<_>>();

        let arguments = match trees.pop() {
            Some(TokenTree::Group(group)) if group.delimiter() == Delimiter::Parenthesis => group.stream(),
            _ => return Err(not_an_invocation()),
        };

        let name = match trees.as_slice() {
            [TokenTree::Ident(name)] => name,
            [TokenTree::Punct(pound), TokenTree::Ident(name)] if pound.as_char() == '#' => name,
            [TokenTree::Ident(name), TokenTree::Punct(bang)] if bang.as_char() == '!' => name,
            _ => return Err(not_an_invocation()),
        };

        Ok(Self {
            name: name.to_string(),
            arguments,
        })
    }
}
