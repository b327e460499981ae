use std::sync::Arc;

use anyhow::Context;

use hearth::config::Config;
use hearth::http::dispatcher::Dispatcher;
use hearth::http::static_files::StaticFiles;
use hearth::server;
use hearth::store::{AccountStore, CredentialStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    let cfg = Config::load()?;

    let store: Arc<dyn CredentialStore> = match &cfg.store.path {
        Some(path) => Arc::new(
            AccountStore::open(path)
                .with_context(|| format!("failed to open account store {}", path.display()))?,
        ),
        None => Arc::new(AccountStore::in_memory()),
    };

    tracing::info!(root = %cfg.static_files.root.display(), "Serving static files");
    let dispatcher = Dispatcher::new(StaticFiles::new(cfg.static_files.root.clone()), store);

    tokio::select! {
        res = server::listener::run(&cfg.server, dispatcher) => {
            res?;
        }

        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}
