use crate::api::client::{PLAY_API_BASE, PlayConsoleClient};
use crate::cli::main_types::{Commands, ConfigCommands};
use crate::core::auth::{ServiceAccountKey, fetch_access_token};
use crate::core::rollout::{RolloutDecision, decide, parse_rollout_steps};
use crate::display::table::releases_table;
use crate::error::{AppError, CliError, ConfigError};
use crate::notify::card::RolloutCard;
use crate::notify::{Notifier, TeamsWebhook};
use crate::storage::config::{Config, Profile};
use crate::storage::credentials::CredentialsSource;
use crate::utils::text::fmt_percent;
use crate::utils::validation::validate_package_name;
use std::path::PathBuf;

pub struct Dispatcher {
    config: Config,
    config_path: Option<PathBuf>,
    profile_name: String,
    verbose: bool,
}

/// Inputs of the `check` command after clap parsing
pub struct CheckOptions {
    pub track: Option<String>,
    pub steps: Option<String>,
    pub package: Option<String>,
    pub webhook_url: Option<String>,
    pub credentials: Option<PathBuf>,
    pub dry_run: bool,
}

impl Dispatcher {
    // Static helper function for verbose logging (used before self exists)
    fn print_verbose(verbose: bool, msg: &str) {
        if verbose {
            println!("Verbose: {}", msg);
        }
    }

    // Instance method for verbose logging
    fn log_verbose(&self, msg: &str) {
        Self::print_verbose(self.verbose, msg);
    }

    pub fn new(
        config: Config,
        config_path: Option<PathBuf>,
        profile_name: String,
        verbose: bool,
    ) -> Self {
        Self {
            config,
            config_path,
            profile_name,
            verbose,
        }
    }

    fn active_profile(&self) -> Option<&Profile> {
        self.config.get_profile(&self.profile_name)
    }

    /// Flag value if present, else the profile fallback. Empty strings
    /// count as missing because CI environments pass inputs through
    /// possibly-blank variables.
    fn resolve_input(
        flag: Option<String>,
        fallback: Option<String>,
        input: &str,
        hint: &str,
    ) -> Result<String, AppError> {
        flag.filter(|v| !v.is_empty())
            .or(fallback.filter(|v| !v.is_empty()))
            .ok_or_else(|| {
                AppError::Cli(CliError::MissingInput {
                    input: input.to_string(),
                    hint: hint.to_string(),
                })
            })
    }

    pub async fn dispatch(&mut self, command: Commands) -> Result<(), AppError> {
        match command {
            Commands::Check {
                track,
                steps,
                package,
                webhook_url,
                credentials,
                dry_run,
            } => {
                self.handle_check(CheckOptions {
                    track,
                    steps,
                    package,
                    webhook_url,
                    credentials,
                    dry_run,
                })
                .await
            }
            Commands::Status {
                track,
                package,
                credentials,
            } => self.handle_status(track, package, credentials).await,
            Commands::Config { command } => self.handle_config_command(command).await,
        }
    }

    async fn handle_check(&self, opts: CheckOptions) -> Result<(), AppError> {
        self.log_verbose("Attempting check command");

        let profile = self.active_profile();

        let track = Self::resolve_input(
            opts.track,
            profile.and_then(|p| p.track.clone()),
            "track",
            "Pass --track or set track on the profile",
        )?;
        let package = Self::resolve_input(
            opts.package,
            profile.and_then(|p| p.package_name.clone()),
            "package",
            "Pass --package or set package_name on the profile",
        )?;
        validate_package_name(&package)?;

        // Validate the steps before touching the network
        let steps_raw = Self::resolve_input(
            opts.steps,
            None,
            "steps",
            "Pass --steps with ascending percentages, e.g. 1,20,50,100",
        )?;
        let steps = parse_rollout_steps(&steps_raw)?;
        self.log_verbose(&format!("Rollout steps are: {:?}", steps));

        let webhook = if opts.dry_run {
            None
        } else {
            let webhook_url = Self::resolve_input(
                opts.webhook_url,
                profile.and_then(|p| p.webhook_url.clone()),
                "webhook_url",
                "Pass --webhook-url or set webhook_url on the profile",
            )?;
            Some(TeamsWebhook::new(webhook_url)?)
        };

        let track_info = self
            .fetch_track(&package, &track, opts.credentials.as_deref())
            .await?;

        if self.verbose {
            println!("{}", releases_table(&track_info));
        }

        match decide(&track_info, &steps) {
            RolloutDecision::NoReleases => {
                println!("⚠️ Track has no releases. Skipping messages.");
            }
            RolloutDecision::AlreadyComplete => {
                println!("✅ Release is completed. No messaging needed.");
            }
            RolloutDecision::Halted => {
                println!("⚠️ Release was halted. Skipping messaging.");
            }
            RolloutDecision::NothingInProgress => {
                println!("ℹ️ No staged rollout in progress on '{}'.", track);
            }
            RolloutDecision::AtMaximum { current } => {
                println!(
                    "ℹ️ No higher rollout step found. Already at or above maximum configured value ({}).",
                    fmt_percent(current)
                );
            }
            RolloutDecision::Advance { current, next } => {
                println!("🚧 Release is in progress, continuing update.");
                println!(
                    "📝 Attempting to message about increasing the rollout from {} to {}",
                    fmt_percent(current),
                    fmt_percent(next)
                );

                let payload = RolloutCard::new(current, next)
                    .with_title(profile.and_then(|p| p.card_title.clone()))
                    .with_announce_time(profile.and_then(|p| p.announce_time.clone()))
                    .with_halt_actions(
                        profile.map(|p| p.halt_actions.clone()).unwrap_or_default(),
                    )
                    .build();

                match webhook {
                    None => {
                        let rendered = serde_json::to_string_pretty(&payload)
                            .unwrap_or_else(|_| payload.to_string());
                        println!("{}", rendered);
                    }
                    Some(webhook) => {
                        let body = webhook.send(&payload).await?;
                        println!("✅ Message sent: {}", body);
                    }
                }
            }
        }

        Ok(())
    }

    async fn handle_status(
        &self,
        track: Option<String>,
        package: Option<String>,
        credentials: Option<PathBuf>,
    ) -> Result<(), AppError> {
        self.log_verbose("Attempting status command");

        let profile = self.active_profile();
        let track = Self::resolve_input(
            track,
            profile.and_then(|p| p.track.clone()),
            "track",
            "Pass --track or set track on the profile",
        )?;
        let package = Self::resolve_input(
            package,
            profile.and_then(|p| p.package_name.clone()),
            "package",
            "Pass --package or set package_name on the profile",
        )?;
        validate_package_name(&package)?;

        let track_info = self
            .fetch_track(&package, &track, credentials.as_deref())
            .await?;

        println!("Track '{}' on {}:", track, package);
        println!("{}", releases_table(&track_info));

        for release in &track_info.releases {
            println!("📝 Status is: {}", release.status);
        }

        Ok(())
    }

    /// Authenticate, open an edit transaction and read the track
    async fn fetch_track(
        &self,
        package: &str,
        track: &str,
        credentials: Option<&std::path::Path>,
    ) -> Result<crate::api::models::TrackInfo, AppError> {
        let source = CredentialsSource::resolve(credentials)?;
        self.log_verbose(&format!(
            "Using credentials file: {}",
            source.path().display()
        ));

        let key = ServiceAccountKey::from_json(&source.read()?)?;
        self.log_verbose(&format!("Authenticating as {}", key.client_email));

        let token = fetch_access_token(&key).await?;

        let mut client = match self.active_profile().and_then(|p| p.timeout_seconds) {
            Some(secs) => PlayConsoleClient::with_timeout(PLAY_API_BASE.to_string(), secs)?,
            None => PlayConsoleClient::new(PLAY_API_BASE.to_string())?,
        };
        client.set_access_token(token);

        let edit = client.insert_edit(package).await?;
        self.log_verbose(&format!("Opened edit {}", edit.id));

        let track_info = client.get_track(package, &edit.id, track).await?;
        Ok(track_info)
    }

    async fn handle_config_command(&mut self, commands: ConfigCommands) -> Result<(), AppError> {
        match commands {
            ConfigCommands::Show => {
                self.log_verbose("Attempting config show command");

                println!("Current Configuration:");
                println!("=====================");

                if let Some(default_profile) = &self.config.default_profile {
                    println!("Default Profile: {}", default_profile);
                } else {
                    println!("Default Profile: (not set)");
                }

                println!("\nProfiles:");
                if self.config.profiles.is_empty() {
                    println!("  No profiles configured");
                } else {
                    for (name, profile) in &self.config.profiles {
                        println!("  [{}]", name);
                        if let Some(package_name) = &profile.package_name {
                            println!("    Package: {}", package_name);
                        }
                        if let Some(track) = &profile.track {
                            println!("    Track: {}", track);
                        }
                        if let Some(webhook_url) = &profile.webhook_url {
                            println!("    Webhook URL: {}", webhook_url);
                        }
                        if let Some(announce_time) = &profile.announce_time {
                            println!("    Announce time: {}", announce_time);
                        }
                        if let Some(timeout) = profile.timeout_seconds {
                            println!("    Timeout: {} seconds", timeout);
                        }
                        for action in &profile.halt_actions {
                            println!("    Halt action: {} -> {}", action.title, action.url);
                        }
                    }
                }

                Ok(())
            }
            ConfigCommands::Set { key, value } => {
                self.log_verbose(&format!(
                    "Attempting config set - key: {}, value: {}",
                    key, value
                ));

                if key == "default_profile" {
                    self.config.default_profile = Some(value);
                } else {
                    let profile = self
                        .config
                        .profiles
                        .entry(self.profile_name.clone())
                        .or_insert_with(Profile::default);

                    match key.as_str() {
                        "package_name" => profile.package_name = Some(value),
                        "track" => profile.track = Some(value),
                        "webhook_url" => profile.webhook_url = Some(value),
                        "announce_time" => profile.announce_time = Some(value),
                        "card_title" => profile.card_title = Some(value),
                        "timeout_seconds" => {
                            let parsed = value.parse::<u64>().map_err(|_| {
                                AppError::Config(ConfigError::InvalidValue {
                                    field: key.clone(),
                                    value: value.clone(),
                                    reason: "expected a number of seconds".to_string(),
                                })
                            })?;
                            profile.timeout_seconds = Some(parsed);
                        }
                        _ => {
                            return Err(AppError::Config(ConfigError::UnknownKey { key }));
                        }
                    }
                }

                self.config.save(self.config_path.clone())?;
                println!("✅ Configuration updated");
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    fn test_config() -> Config {
        Config {
            default_profile: Some("app".to_string()),
            profiles: {
                let mut profiles = HashMap::new();
                profiles.insert(
                    "app".to_string(),
                    Profile {
                        package_name: Some("com.example.app".to_string()),
                        track: Some("production".to_string()),
                        webhook_url: Some(
                            "https://example.webhook.office.com/webhookb2/abc".to_string(),
                        ),
                        ..Profile::default()
                    },
                );
                profiles
            },
        }
    }

    fn create_test_dispatcher(verbose: bool) -> Dispatcher {
        Dispatcher::new(test_config(), None, "app".to_string(), verbose)
    }

    #[tokio::test]
    async fn test_dispatcher_creation() {
        let d = create_test_dispatcher(true);
        assert!(d.verbose);
        assert_eq!(d.profile_name, "app");
    }

    #[test]
    fn test_resolve_input_priority() {
        let resolved = Dispatcher::resolve_input(
            Some("flag".to_string()),
            Some("profile".to_string()),
            "track",
            "hint",
        )
        .expect("flag should win");
        assert_eq!(resolved, "flag");

        let resolved = Dispatcher::resolve_input(
            None,
            Some("profile".to_string()),
            "track",
            "hint",
        )
        .expect("fallback should apply");
        assert_eq!(resolved, "profile");
    }

    #[test]
    fn test_resolve_input_empty_counts_as_missing() {
        let result =
            Dispatcher::resolve_input(Some(String::new()), None, "track", "set the track");
        assert!(matches!(
            result,
            Err(AppError::Cli(CliError::MissingInput { .. }))
        ));
    }

    #[tokio::test]
    async fn test_check_rejects_invalid_steps_before_network() {
        let d = create_test_dispatcher(false);
        let result = d
            .handle_check(CheckOptions {
                track: Some("production".to_string()),
                steps: Some("50,20".to_string()),
                package: Some("com.example.app".to_string()),
                webhook_url: Some(
                    "https://example.webhook.office.com/webhookb2/abc".to_string(),
                ),
                credentials: None,
                dry_run: false,
            })
            .await;
        assert!(matches!(result, Err(AppError::Rollout(_))));
    }

    #[tokio::test]
    async fn test_check_requires_steps() {
        let d = create_test_dispatcher(false);
        let result = d
            .handle_check(CheckOptions {
                track: None,
                steps: None,
                package: None,
                webhook_url: None,
                credentials: None,
                dry_run: true,
            })
            .await;
        assert!(matches!(
            result,
            Err(AppError::Cli(CliError::MissingInput { .. }))
        ));
    }

    #[tokio::test]
    async fn test_check_rejects_bad_package_name() {
        let d = create_test_dispatcher(false);
        let result = d
            .handle_check(CheckOptions {
                track: Some("production".to_string()),
                steps: Some("1,20".to_string()),
                package: Some("notapackage".to_string()),
                webhook_url: None,
                credentials: None,
                dry_run: true,
            })
            .await;
        assert!(matches!(
            result,
            Err(AppError::Cli(CliError::InvalidArguments(_)))
        ));
    }

    #[tokio::test]
    async fn test_config_show_implemented() {
        let mut d = create_test_dispatcher(true);
        let result = d.handle_config_command(ConfigCommands::Show).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_config_set_updates_profile() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("config.toml");
        let mut d = Dispatcher::new(
            test_config(),
            Some(config_path.clone()),
            "app".to_string(),
            false,
        );

        let result = d
            .handle_config_command(ConfigCommands::Set {
                key: "track".to_string(),
                value: "internal".to_string(),
            })
            .await;
        assert!(result.is_ok());

        let saved = Config::load(Some(config_path)).expect("config should reload");
        assert_eq!(
            saved.get_profile("app").unwrap().track.as_deref(),
            Some("internal")
        );
    }

    #[tokio::test]
    async fn test_config_set_rejects_unknown_key() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let mut d = Dispatcher::new(
            test_config(),
            Some(temp_dir.path().join("config.toml")),
            "app".to_string(),
            false,
        );

        let result = d
            .handle_config_command(ConfigCommands::Set {
                key: "nonsense".to_string(),
                value: "value".to_string(),
            })
            .await;
        assert!(matches!(
            result,
            Err(AppError::Config(ConfigError::UnknownKey { .. }))
        ));
    }

    #[tokio::test]
    async fn test_config_set_validates_timeout() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let mut d = Dispatcher::new(
            test_config(),
            Some(temp_dir.path().join("config.toml")),
            "app".to_string(),
            false,
        );

        let result = d
            .handle_config_command(ConfigCommands::Set {
                key: "timeout_seconds".to_string(),
                value: "soon".to_string(),
            })
            .await;
        assert!(matches!(
            result,
            Err(AppError::Config(ConfigError::InvalidValue { .. }))
        ));
    }

    #[tokio::test]
    async fn test_dispatch_config_show() {
        let mut d = create_test_dispatcher(false);
        let result = d
            .dispatch(Commands::Config {
                command: ConfigCommands::Show,
            })
            .await;
        assert!(result.is_ok());
    }
}
