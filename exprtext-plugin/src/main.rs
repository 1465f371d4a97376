//! The plugin executable.  A host compiler launches this with no arguments and speaks the plugin
//! protocol to it over stdin/stdout; see the `exprtext_plugin` crate docs.
use anyhow::Context;
use exprtext_plugin::{MacroRegistry, PluginConfig, PluginService, transport};
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "info";

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let config = PluginConfig::from_env().context("Invalid plugin configuration")?;
    let registry = MacroRegistry::default();
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        macros = ?registry.names().collect::<Vec<_>>(),
        ?config,
        "Plugin starting"
    );

    let service = PluginService::new(config, registry);
    let transport = transport::stdio(service.config());

    service
        .serve(transport)
        .await
        .context("Lost the connection to the host")?;

    tracing::info!("Plugin exiting");
    Ok(())
}

/// Log to stderr.  Stdout belongs to the protocol; a single stray byte there corrupts the framing.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}
