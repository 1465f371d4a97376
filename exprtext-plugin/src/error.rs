use exprtext_core::MacroError;
use thiserror::Error;

use crate::SyntaxKind;

pub type Result<T, E = PluginError> = std::result::Result<T, E>;

/// Failures of the plugin itself.  Any of these ends the connection with the host.
#[derive(Debug, Error)]
pub enum PluginError {
    #[error("Transport error")]
    Transport {
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },

    #[error("Error serializing reply to JSON")]
    SerMessage { source: serde_json::Error },

    #[error("Invalid value '{value}' for environment variable {name}")]
    InvalidConfig {
        name: &'static str,
        value: String,
        source: std::num::ParseIntError,
    },
}

/// Reasons a single expansion request can't be satisfied.  These are reported back to the host as
/// diagnostics, never as a [`PluginError`].
#[derive(Debug, Error)]
pub enum InvocationError {
    #[error("This plugin does not provide a macro named '{name}' (available: {available})")]
    UnknownMacro { name: String, available: String },

    #[error("'{name}' is an expression macro and can't be expanded as a {kind}")]
    UnsupportedKind { name: String, kind: SyntaxKind },

    #[error("Macro invocation could not be tokenized: {message}")]
    Lex { message: String },

    #[error("Expected a macro invocation of the form `name(arguments)`, found `{text}`")]
    NotAnInvocation { text: String },

    #[error(transparent)]
    Expand(#[from] MacroError),

    #[error("Expansion is {size} bytes, which exceeds the maximum message size of {max} bytes")]
    ReplyTooLarge { size: usize, max: usize },
}
