//! SSR server - Server-side rendering orchestrator.
//!
//! Commands:
//! - `ssr-server serve` - Serve server-rendered pages
//! - `ssr-server check` - Validate template, asset manifest and locales

mod output;

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use ssr_assets::AssetManifest;
use ssr_html::Template;
use ssr_locale::LocaleRegistry;
use ssr_server::{app, telemetry, LogFormat, Settings};

use output::Output;

/// Server-side rendering orchestrator
#[derive(Parser)]
#[command(name = "ssr-server")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Settings file path (default: ./ssr.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Listen address, overriding the settings file
    #[arg(long, global = true)]
    listen: Option<SocketAddr>,

    /// Log format, overriding the settings file
    #[arg(long, global = true, value_enum)]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve server-rendered pages
    Serve,

    /// Validate build output and locale bundles
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(cli.verbose);

    let result = match load_settings(&cli) {
        Ok(settings) => match cli.command {
            Commands::Serve => serve(settings).await,
            Commands::Check => check(&settings, &output),
        },
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}

fn load_settings(cli: &Cli) -> Result<Settings> {
    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(listen) = cli.listen {
        settings.listen = listen;
    }
    if let Some(format) = cli.log_format {
        settings.logging.format = format;
    }
    Ok(settings)
}

async fn serve(settings: Settings) -> Result<()> {
    telemetry::init(&settings.logging)?;
    ssr_server::serve(settings, app::root()).await?;
    Ok(())
}

fn check(settings: &Settings, output: &Output) -> Result<()> {
    let render = &settings.render;

    output.section("Build output");

    match Template::load(&render.template_path) {
        Ok(_) => output.ok(&format!("template {}", render.template_path.display())),
        Err(e) => output.problem(&e.to_string()),
    }

    match AssetManifest::load(&render.manifest_path) {
        Ok(manifest) => {
            output.ok(&format!(
                "manifest {} ({} entries)",
                render.manifest_path.display(),
                manifest.len()
            ));
            for entry in manifest.entries() {
                output.detail(&format!("{} -> {}", entry.logical_name, entry.path));
            }
        }
        Err(e) => output.problem(&e.to_string()),
    }

    output.section("Locales");

    let locales = match &render.locales_dir {
        Some(dir) => LocaleRegistry::load_dir(dir),
        None => {
            output.warn("no locales_dir set, using built-in bundles");
            Ok(LocaleRegistry::builtin())
        }
    };
    match locales {
        Ok(registry) => {
            for key in registry.keys() {
                output.item(key);
            }
            std::iter::once(&render.default_locale)
                .chain(&render.supported_locales)
                .filter(|key| !registry.contains(key))
                .for_each(|key| output.problem(&format!("locale '{}' is configured but not loaded", key)));
        }
        Err(e) => output.problem(&e.to_string()),
    }

    output.section("Server");
    output.field("listen", &settings.listen.to_string());
    output.field("auth cookie", &render.auth_cookie);
    match render.render_deadline() {
        Some(deadline) => output.field("render deadline", &format!("{}ms", deadline.as_millis())),
        None => {
            output.field("render deadline", "none");
            output.warn("render deadline disabled, a stuck preload holds its request open");
        }
    }

    output.finish()
}
