//! A standalone executable that serves the `stringify` expression macro to a host compiler.
//!
//! The host launches the plugin as a child process and talks to it over stdin/stdout.  Every
//! message in either direction is one frame: an 8-byte little-endian length followed by that many
//! bytes of JSON.  See [`HostMessage`] and [`PluginMessage`] for what goes inside the frames.
//!
//! The plugin holds no state between requests and handles them strictly one at a time, in the
//! order they arrive.  Failures to expand a macro are not failures of the plugin; they go back to
//! the host as diagnostics, and the connection carries on.

mod config;
mod error;
mod invocation;
mod protocol;
mod registry;
mod service;
#[cfg(test)]
pub mod testing;
pub mod transport;

pub use config::PluginConfig;
pub use error::{InvocationError, PluginError, Result};
pub use invocation::Invocation;
pub use protocol::{
    Diagnostic, HostCapability, HostMessage, MacroRef, PROTOCOL_VERSION, PluginCapability, PluginMessage,
    Severity, SourceLocation, Syntax, SyntaxKind,
};
pub use registry::MacroRegistry;
pub use service::PluginService;
pub use transport::Transport;
