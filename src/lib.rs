//! Shelf application library
//!
//! Application modules, utilities, and the bootstrap shared by the server
//! binary and the CLI.

pub mod modules;
pub mod utils;

use anyhow::Context;
use shelf_kernel::{settings::Settings, InitCtx, ModuleRegistry};

/// Build a registry holding every application module.
pub fn build_registry(settings: &Settings) -> anyhow::Result<ModuleRegistry> {
    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry, settings).context("failed to register modules")?;
    Ok(registry)
}

/// Run the full lifecycle: init, start, serve until a shutdown signal, stop.
pub async fn run(settings: Settings) -> anyhow::Result<()> {
    let registry = build_registry(&settings)?;
    let ctx = InitCtx {
        settings: &settings,
    };

    registry.init_all(&ctx).await?;
    registry.start_all(&ctx).await?;

    let served =
        shelf_http::start_server(&registry, &settings, shelf_http::shutdown_signal()).await;

    registry.stop_all().await?;
    served
}
