use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "rollout-messenger")]
#[command(about = "Checks Play Console staged rollouts and posts Teams notifications")]
#[command(version)]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(short, long, global = true)]
    pub profile: Option<String>,

    #[arg(long, global = true)]
    pub config_dir: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check the rollout state of a track and announce the next increase
    Check {
        /// Release track to inspect (e.g. production, internal)
        #[arg(long, env = "ROLLOUT_TRACK")]
        track: Option<String>,
        /// Comma-separated rollout percentages, e.g. 1,20,50,100
        #[arg(long, env = "ROLLOUT_INCREASE_STEPS")]
        steps: Option<String>,
        /// Application package name
        #[arg(long, env = "ROLLOUT_PACKAGE_NAME")]
        package: Option<String>,
        /// Teams incoming-webhook URL
        #[arg(long, env = "TEAMS_WEBHOOK_URL")]
        webhook_url: Option<String>,
        /// Path to the service-account key file
        #[arg(long, env = "SERVICE_CREDENTIALS_FILE")]
        credentials: Option<PathBuf>,
        /// Print the card payload to stdout instead of posting it
        #[arg(long)]
        dry_run: bool,
    },
    /// Show the releases currently on a track
    Status {
        /// Release track to inspect
        #[arg(long, env = "ROLLOUT_TRACK")]
        track: Option<String>,
        /// Application package name
        #[arg(long, env = "ROLLOUT_PACKAGE_NAME")]
        package: Option<String>,
        /// Path to the service-account key file
        #[arg(long, env = "SERVICE_CREDENTIALS_FILE")]
        credentials: Option<PathBuf>,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the current configuration
    Show,
    /// Set a configuration value on the active profile
    Set {
        /// Configuration key
        key: String,
        /// Configuration value
        value: String,
    },
}
