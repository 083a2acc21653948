//! `swallows` prints a procedurally generated novel.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use swallows_core::StoryConfig;
use swallows_story::{Publisher, Setting};

#[derive(Debug, Parser)]
#[command(name = "swallows", version, about = "Characters who talk themselves into trouble")]
struct Cli {
    /// World description to use instead of a built-in one.
    #[arg(long, conflicts_with = "builtin")]
    setting: Option<PathBuf>,

    /// Built-in world: swallows or downtown.
    #[arg(long)]
    builtin: Option<String>,

    /// Engine configuration (TOML).
    #[arg(long, env = "SWALLOWS_CONFIG")]
    config: Option<PathBuf>,

    /// RNG seed; overrides the configuration.
    #[arg(long)]
    seed: Option<u64>,

    /// Number of chapters; overrides the configuration.
    #[arg(long)]
    chapters: Option<u32>,

    /// Print the novel as JSON.
    #[arg(long)]
    json: bool,

    /// Emit logs as JSON lines.
    #[arg(long)]
    log_json: bool,
}

fn init_tracing(level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => StoryConfig::from_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => StoryConfig::default(),
    };
    init_tracing(&config.general.log_level, cli.log_json);

    if let Some(seed) = cli.seed {
        config.publishing.seed = Some(seed);
    }
    if let Some(chapters) = cli.chapters {
        config.publishing.chapters = chapters;
    }

    let setting = match (&cli.setting, &cli.builtin) {
        (Some(path), _) => Setting::from_file(path)
            .with_context(|| format!("loading setting from {}", path.display()))?,
        (None, Some(name)) => Setting::builtin(name)?,
        (None, None) => Setting::builtin("swallows")?,
    };

    let novel = Publisher::new(config, setting)
        .publish()
        .context("publishing")?;
    if cli.json {
        println!("{}", novel.to_json()?);
    } else {
        print!("{novel}");
    }
    Ok(())
}
