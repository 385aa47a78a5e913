use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use serde::Serialize;
use stepkit::{init_logging, open_session, CanvasObject, Config, QuickKit, VERSION};
use tracing::info;

/// Layout printed to stdout.
#[derive(Serialize)]
struct KitLayout<'a> {
    kit: QuickKit,
    title: &'a str,
    background: &'a str,
    objects: Vec<CanvasObject>,
}

#[derive(Parser, Debug)]
#[command(
    name = "stepkit",
    about = "Lay out a quick-create kit and print it as JSON",
    version = VERSION,
    long_version = concat!(env!("CARGO_PKG_VERSION"), " (built ", env!("BUILD_DATE"), ")")
)]
struct Cli {
    /// Kit to lay out: workout, travel, survival, project, study or moving
    #[arg(default_value = "travel")]
    kit: QuickKit,

    /// Config file (.json or .toml); defaults to the platform config directory
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<Config> {
    match path {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("Failed to load {}", path.display())),
        None => match stepkit_settings::default_config_path() {
            Ok(path) => Ok(Config::load_or_default(&path)?),
            Err(_) => Ok(Config::default()),
        },
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging()?;

    let config = load_config(cli.config.as_ref())?;
    let mut session = open_session(&config)?;
    let ids = session.apply_kit(cli.kit);
    info!("Built {} kit with {} objects", cli.kit, ids.len());

    let layout = KitLayout {
        kit: cli.kit,
        title: cli.kit.title(),
        background: cli.kit.background(),
        objects: session.snapshot(),
    };
    println!("{}", serde_json::to_string_pretty(&layout)?);
    Ok(())
}
