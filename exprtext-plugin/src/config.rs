use crate::{PROTOCOL_VERSION, PluginError, Result};

/// Environment variable that overrides [`PluginConfig::max_message_bytes`].
pub const MAX_MESSAGE_BYTES_VAR: &str = "EXPRTEXT_PLUGIN_MAX_MESSAGE_BYTES";

#[derive(Clone, Debug)]
pub struct PluginConfig {
    /// The largest frame, in bytes not counting the length header, that will be accepted from or
    /// sent to the host.  A larger frame fails the connection, since once a length header is
    /// rejected there is no way to find the start of the next frame.
    pub max_message_bytes: usize,

    /// Protocol version reported to the host.
    pub protocol_version: u32,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            max_message_bytes: 8 * 1024 * 1024,
            protocol_version: PROTOCOL_VERSION,
        }
    }
}

impl PluginConfig {
    /// Start from the defaults and apply any overrides present in the environment.
    ///
    /// The host decides the plugin's command line, so the environment is the only place an
    /// operator can tune it.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(value) = lookup(MAX_MESSAGE_BYTES_VAR) {
            config.max_message_bytes = value
                .trim()
                .parse()
                .map_err(|e| PluginError::InvalidConfig {
                    name: MAX_MESSAGE_BYTES_VAR,
                    value: value.clone(),
                    source: e,
                })?;
        }

        Ok(config)
    }
}
