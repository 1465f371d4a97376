//! Rust struct definitions that ser/de to/from the plugin protocol's JSON messages.
//!
//! Enums use serde's default external tagging, so a message is a JSON object with a single key
//! naming the variant, e.g. `{"getCapability": {"capability": {"protocolVersion": 1}}}`.
use serde::{Deserialize, Serialize};

/// Version of the protocol this plugin speaks, reported in response to
/// [`HostMessage::GetCapability`].
pub const PROTOCOL_VERSION: u32 = 1;

/// Message sent from the host compiler to the plugin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HostMessage {
    /// Sent once, right after launch, so both sides can agree on what the other understands.
    GetCapability { capability: HostCapability },

    /// Expand a macro that stands on its own in the source, such as an expression macro.
    #[serde(rename_all = "camelCase")]
    ExpandFreestandingMacro {
        #[serde(rename = "macro")]
        macro_ref: MacroRef,
        /// Host-chosen string that is unique per expansion.  Only used for logging here.
        #[serde(default)]
        discriminator: String,
        syntax: Syntax,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostCapability {
    pub protocol_version: u32,
}

/// Which macro the host wants expanded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MacroRef {
    /// Module the host declared the macro in.  Informational only.
    #[serde(default)]
    pub module_name: String,
    pub name: String,
}

/// The invocation being expanded, as source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Syntax {
    pub kind: SyntaxKind,
    /// Complete text of the invocation, e.g. `#stringify(x + y)`.
    pub source: String,
    pub location: SourceLocation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum SyntaxKind {
    Expression,
    Declaration,
    Statement,
}

/// Position in a host source file.  Lines and columns are 1-based, offset is a 0-based byte
/// offset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceLocation {
    pub file_name: String,
    pub line: u32,
    pub column: u32,
    pub offset: u32,
}

/// Message sent from the plugin back to the host.  Each [`HostMessage`] gets exactly one reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PluginMessage {
    GetCapabilityResult { capability: PluginCapability },

    /// `expanded_source` is `None` whenever expansion failed, in which case `diagnostics` explains
    /// why.
    #[serde(rename_all = "camelCase")]
    ExpandMacroResult {
        expanded_source: Option<String>,
        diagnostics: Vec<Diagnostic>,
    },

    /// The frame could not be understood as a [`HostMessage`].
    InvalidMessage { message: String },
}

impl PluginMessage {
    pub fn expanded(expanded_source: impl Into<String>) -> Self {
        PluginMessage::ExpandMacroResult {
            expanded_source: Some(expanded_source.into()),
            diagnostics: Vec::new(),
        }
    }

    pub fn expansion_failed(diagnostic: Diagnostic) -> Self {
        PluginMessage::ExpandMacroResult {
            expanded_source: None,
            diagnostics: vec![diagnostic],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginCapability {
    pub protocol_version: u32,
    pub features: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub message: String,
    pub severity: Severity,
    pub position: SourceLocation,
}

impl Diagnostic {
    pub fn error(message: impl Into<String>, position: SourceLocation) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Error,
            position,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Note,
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    #[test]
    fn decode_get_capability() {
        let message: HostMessage =
            serde_json::from_value(json!({"getCapability": {"capability": {"protocolVersion": 1}}})).unwrap();

        assert_eq!(
            message,
            HostMessage::GetCapability {
                capability: HostCapability { protocol_version: 1 }
            }
        );
    }

    #[test]
    fn decode_expand_freestanding_macro() {
        let message: HostMessage = serde_json::from_value(json!({
            "expandFreestandingMacro": {
                "macro": {"moduleName": "Demo", "name": "stringify"},
                "discriminator": "$s1",
                "syntax": {
                    "kind": "expression",
                    "source": "#stringify(x + y)",
                    "location": {"fileName": "main.src", "line": 3, "column": 9, "offset": 42}
                }
            }
        }))
        .unwrap();

        assert_matches!(
            message,
            HostMessage::ExpandFreestandingMacro { macro_ref, discriminator, syntax } => {
                assert_eq!(macro_ref.name, "stringify");
                assert_eq!(macro_ref.module_name, "Demo");
                assert_eq!(discriminator, "$s1");
                assert_eq!(syntax.kind, SyntaxKind::Expression);
                assert_eq!(syntax.source, "#stringify(x + y)");
                assert_eq!(syntax.location.line, 3);
                assert_eq!(syntax.location.offset, 42);
            }
        );
    }

    #[test]
    fn discriminator_and_module_are_optional() {
        let message: HostMessage = serde_json::from_value(json!({
            "expandFreestandingMacro": {
                "macro": {"name": "stringify"},
                "syntax": {
                    "kind": "expression",
                    "source": "#stringify(1)",
                    "location": {"fileName": "a", "line": 1, "column": 1, "offset": 0}
                }
            }
        }))
        .unwrap();

        assert_matches!(message, HostMessage::ExpandFreestandingMacro { discriminator, .. } if discriminator.is_empty());
    }

    #[test]
    fn unknown_message_is_rejected() {
        let result = serde_json::from_value::<HostMessage>(json!({"loadPluginLibrary": {"libraryPath": "x"}}));

        assert!(result.is_err());
    }

    #[test]
    fn encode_failed_expansion() {
        let message = PluginMessage::expansion_failed(Diagnostic::error("nope", SourceLocation::default()));

        assert_eq!(
            serde_json::to_value(&message).unwrap(),
            json!({
                "expandMacroResult": {
                    "expandedSource": null,
                    "diagnostics": [{
                        "message": "nope",
                        "severity": "error",
                        "position": {"fileName": "", "line": 0, "column": 0, "offset": 0}
                    }]
                }
            })
        );
    }

    #[test]
    fn encode_capability_result() {
        let message = PluginMessage::GetCapabilityResult {
            capability: PluginCapability {
                protocol_version: PROTOCOL_VERSION,
                features: vec!["expressionMacros".to_string()],
            },
        };

        assert_eq!(
            serde_json::to_value(&message).unwrap(),
            json!({"getCapabilityResult": {"capability": {"protocolVersion": 1, "features": ["expressionMacros"]}}})
        );
    }

    #[test]
    fn display_names_match_wire_names() {
        assert_eq!(SyntaxKind::Declaration.to_string(), "declaration");
        assert_eq!(Severity::Warning.to_string(), "warning");
    }
}
