mod api;
mod cli_messages;
mod commit;
mod config;
mod consts;
mod environment;
mod error_classifier;
mod events;
mod fetcher;
mod logging;
mod scheduler;
mod session;
mod ui;

use crate::config::{CliOverrides, Config, Settings, get_config_path};
use crate::environment::Environment;
use crate::session::{
    run_fetch_commits, run_headless_mode, run_track_now, run_tui_mode, setup_session,
};
use clap::{Parser, Subcommand};
use std::error::Error;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
/// Dashboard for AI-annotated GitHub commits
struct Args {
    /// Backend profile to talk to: production or development
    #[arg(long, global = true, value_name = "ENV", value_parser = parse_environment)]
    environment: Option<Environment>,

    /// Base URL of the backend API; overrides the environment profile
    #[arg(long, global = true, value_name = "URL")]
    api_url: Option<String>,

    /// Seconds between automatic refreshes
    #[arg(long, global = true, value_name = "SECS")]
    refresh_secs: Option<u64>,

    /// Command to execute
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the dashboard
    Start {
        /// Run without the terminal UI and print updates to the console
        #[arg(long, default_value_t = false)]
        headless: bool,

        /// Load commits immediately instead of waiting for the first refresh
        #[arg(long, default_value_t = false)]
        track_on_start: bool,

        /// Disable background colors in the dashboard
        #[arg(long, default_value_t = false)]
        no_background_color: bool,
    },
    /// Read the current commit list once
    TrackNow {
        /// Print the raw json_data payload instead of a summary
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Ask the backend to ingest new commits, then read the list once
    FetchCommits,
    /// Persist the resolved settings to the config file
    SaveConfig,
    /// Delete the config file
    ClearConfig,
}

fn parse_environment(s: &str) -> Result<Environment, String> {
    s.parse::<Environment>()
        .map_err(|_| format!("unknown environment '{}' (expected production or development)", s))
}

#[tokio::main]
async fn main() {
    log::set_max_level(logging::get_rust_log_level().into());

    let args = Args::parse();
    if let Err(e) = run(args).await {
        print_cmd_error!(&e.to_string());
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let config_path = get_config_path()?;
    let cli = CliOverrides {
        environment: args.environment,
        api_url: args.api_url,
        refresh_secs: args.refresh_secs,
    };

    match args.command {
        Command::Start {
            headless,
            track_on_start,
            no_background_color,
        } => {
            let settings = Settings::load(&cli, &config_path)?;
            let session = setup_session(&settings)?;
            if headless {
                run_headless_mode(session, track_on_start).await
            } else {
                run_tui_mode(session, !no_background_color, track_on_start).await
            }
        }
        Command::TrackNow { json } => {
            let settings = Settings::load(&cli, &config_path)?;
            run_track_now(setup_session(&settings)?, json).await
        }
        Command::FetchCommits => {
            let settings = Settings::load(&cli, &config_path)?;
            run_fetch_commits(setup_session(&settings)?).await
        }
        Command::SaveConfig => {
            let settings = Settings::load(&cli, &config_path)?;
            settings
                .to_config()
                .save(&config_path)
                .map_err(|e| format!("Failed to save config: {}", e))?;
            print_cmd_success!(
                "Configuration saved",
                "{} ({})",
                config_path.display(),
                settings.base_url()
            );
            Ok(())
        }
        Command::ClearConfig => {
            Config::clear(&config_path)?;
            print_cmd_success!("Configuration cleared", "{}", config_path.display());
            Ok(())
        }
    }
}
