mod chat_cmd;
mod config;
mod settings_cmd;
mod terminal_output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use switchyard_config::SettingsStore;
use switchyard_routing::builtin_profiles;
use tracing::info;

use config::Config;
use settings_cmd::SettingsCommands;
use terminal_output::{note_error, render_table, Column};

#[derive(Parser)]
#[command(name = "switchyard")]
#[command(about = "Switchyard: profile-aware chat router on the console")]
#[command(version)]
struct Cli {
    /// Log filter when SWITCHYARD_LOG is unset (e.g. "info", "switchyard_routing=debug")
    #[arg(long, global = true)]
    log_level: Option<String>,
    /// Directory for rolling JSON logs
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,
    /// Settings file (defaults to SWITCHYARD_SETTINGS_PATH or .switchyard/config.toml)
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Open an interactive console session
    Chat {
        /// Profile to start in; the default profile when omitted
        #[arg(short, long)]
        profile: Option<String>,
    },
    /// List the available profiles
    Profiles,
    /// Show or change persisted settings
    Settings {
        #[command(subcommand)]
        command: SettingsCommands,
    },
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        note_error(&format!("{e:#}"));
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env().with_overrides(cli.log_level, cli.log_dir, cli.settings);

    logging::init_logger(&config.log_dir, &config.log_level);
    info!(settings = %config.settings_path.display(), "Switchyard starting");

    match cli.command {
        Commands::Chat { profile } => chat_cmd::run(&config, profile).await?,
        Commands::Profiles => print_profiles(),
        Commands::Settings { command } => {
            settings_cmd::run(command, &SettingsStore::new(&config.settings_path)).await?
        }
    }

    Ok(())
}

fn print_profiles() {
    let rows: Vec<Vec<String>> = builtin_profiles()
        .iter()
        .map(|p| {
            vec![
                p.name.clone(),
                if p.is_default { "yes".into() } else { String::new() },
                p.starters.len().to_string(),
            ]
        })
        .collect();
    print!(
        "{}",
        render_table(&[Column::left("Profile"), Column::left("Default"), Column::left("Starters")], &rows)
    );
}
