use clap::Parser;
use rollout_messenger::cli::dispatcher::Dispatcher;
use rollout_messenger::cli::main_types::Cli;
use rollout_messenger::storage::config::Config;
use std::path::PathBuf;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Load Config
    let config_path = cli
        .config_dir
        .as_ref()
        .map(|dir| PathBuf::from(dir).join("config.toml"));

    let config = match Config::load(config_path.clone()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error loading config: {}", err);
            std::process::exit(1);
        }
    };

    // Determine the profile to use
    let profile_name = cli
        .profile
        .or(config.default_profile.clone())
        .unwrap_or_else(|| "default".to_string());

    if cli.verbose {
        println!("Verbose mode is enabled");
        println!("Using profile: {}", profile_name);

        if let Some(config_dir) = &cli.config_dir {
            println!("Using config directory: {}", config_dir);
        }
    }

    // Create dispatcher
    let mut dispatcher = Dispatcher::new(config, config_path, profile_name, cli.verbose);

    // Execute the command
    if let Err(e) = dispatcher.dispatch(cli.command).await {
        eprintln!("{} {}", e.severity().emoji(), e.display_friendly());
        if let Some(hint) = e.troubleshooting_hint() {
            eprintln!("Hint: {}", hint);
        }
        std::process::exit(1);
    }

    Ok(())
}
