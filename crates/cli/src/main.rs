use anyhow::Context;
use clap::{Parser, Subcommand};
use shelf_kernel::settings::Settings;

/// Shelf: in-memory bookshelf API
#[derive(Debug, Parser)]
#[command(name = "shelf", version, about)]
struct Cli {
    /// Override `server.port`
    #[arg(long, global = true)]
    port: Option<u16>,

    /// Override `server.api_prefix`, e.g. `/api`
    #[arg(long, global = true)]
    api_prefix: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP server until Ctrl-C
    Serve,
    /// Print the merged OpenAPI document
    Openapi,
}

impl Cli {
    fn apply(&self, settings: &mut Settings) {
        if let Some(port) = self.port {
            settings.server.port = port;
        }
        if let Some(prefix) = &self.api_prefix {
            settings.server.api_prefix = prefix.clone();
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut settings = Settings::load().with_context(|| "failed to load shelf settings")?;
    cli.apply(&mut settings);

    match cli.command {
        Command::Serve => {
            shelf_telemetry::init(&settings.telemetry)?;
            tracing::info!(env = ?settings.environment, "shelf CLI serving");

            tokio::runtime::Runtime::new()
                .context("failed to start tokio runtime")?
                .block_on(shelf_app::run(settings))
        }
        Command::Openapi => {
            let registry = shelf_app::build_registry(&settings)?;
            let document =
                shelf_http::router::openapi_document(&registry, &settings.server.api_prefix);
            println!("{}", serde_json::to_string_pretty(&document)?);
            Ok(())
        }
    }
}
