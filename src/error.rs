use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("CliError: {0}")]
    Cli(#[from] CliError),
    #[error("ApiError: {0}")]
    Api(#[from] ApiError),
    #[error("AuthError: {0}")]
    Auth(#[from] AuthError),
    #[error("ConfigError: {0}")]
    Config(#[from] ConfigError),
    #[error("StorageError: {0}")]
    Storage(#[from] StorageError),
    #[error("RolloutError: {0}")]
    Rollout(#[from] RolloutError),
    #[error("NotifyError: {0}")]
    Notify(#[from] NotifyError),
}

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Missing input '{input}'")]
    MissingInput { input: String, hint: String },
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64, endpoint: String },
    #[error("HTTP error: {status} {message}")]
    Http {
        status: u16,
        endpoint: String,
        message: String,
    },
    #[error("Authorization failed")]
    Unauthorized {
        status: u16,
        endpoint: String,
        server_message: String,
    },
}

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Service account key file is not valid: {reason}")]
    InvalidKeyFile { reason: String },
    #[error("Private key rejected: {reason}")]
    InvalidPrivateKey { reason: String },
    #[error("Token exchange failed with status {status}: {message}")]
    TokenExchange { status: u16, message: String },
    #[error("Credentials have been revoked or expired")]
    CredentialsRevoked,
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("File I/O error at {path}: {source}")]
    FileIo {
        path: String,
        source: std::io::Error,
    },
    #[error("Credentials file not found")]
    CredentialsNotFound { hint: String },
    #[error("Configuration save failed")]
    ConfigSaveFailed,
    #[error("Configuration parse error: {message}")]
    ConfigParseError { message: String },
    #[error("Configuration directory not found")]
    ConfigDirNotFound,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Unknown configuration key '{key}'")]
    UnknownKey { key: String },
    #[error("Invalid configuration value for '{field}': {value}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Error, Debug)]
pub enum RolloutError {
    #[error("Rollout steps must be comma-separated numbers only (e.g. 1,20,50,100)")]
    NotNumeric { value: String },
    #[error("Rollout step {value} is out of range; all steps must be between 0 and 100")]
    OutOfRange { value: i64 },
    #[error("Rollout step {next} must be strictly greater than the previous step {prev}")]
    NotIncreasing { prev: i64, next: i64 },
    #[error("Rollout steps must not be empty")]
    Empty,
}

#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("Webhook URL is not valid: {reason}")]
    InvalidUrl { reason: String },
    #[error("Webhook rejected the message with status {status}: {body}")]
    Rejected { status: u16, body: String },
    #[error("Webhook request failed: {message}")]
    Transport { message: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum ErrorSeverity {
    Critical,
    High,
    Medium,
    Low,
}

impl ErrorSeverity {
    pub fn emoji(&self) -> &'static str {
        match self {
            ErrorSeverity::Critical => "🚨",
            ErrorSeverity::High => "❌",
            ErrorSeverity::Medium => "⚠️",
            ErrorSeverity::Low => "ℹ️",
        }
    }
}

impl AppError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            AppError::Cli(_) => ErrorSeverity::Medium,
            AppError::Api(api_error) => match api_error {
                ApiError::Unauthorized { .. } => ErrorSeverity::High,
                ApiError::Timeout { .. } => ErrorSeverity::Medium,
                ApiError::Http { status, .. } if *status >= 500 => ErrorSeverity::High,
                _ => ErrorSeverity::Medium,
            },
            AppError::Auth(_) => ErrorSeverity::High,
            AppError::Config(_) => ErrorSeverity::Medium,
            AppError::Storage(_) => ErrorSeverity::High,
            AppError::Rollout(_) => ErrorSeverity::Medium,
            AppError::Notify(_) => ErrorSeverity::High,
        }
    }

    pub fn display_friendly(&self) -> String {
        match self {
            AppError::Auth(AuthError::CredentialsRevoked) => {
                "The credentials have been revoked or expired".to_string()
            }
            AppError::Cli(CliError::MissingInput { input, .. }) => {
                format!("Missing input '{}'", input)
            }
            AppError::Notify(NotifyError::Rejected { status, .. }) => {
                format!("Something went wrong whilst sending the message (status {})", status)
            }
            _ => format!("{}", self),
        }
    }

    pub fn troubleshooting_hint(&self) -> Option<String> {
        match self {
            AppError::Auth(AuthError::CredentialsRevoked | AuthError::TokenExchange { .. }) => {
                Some("Re-issue the service account key in the Play Console and try again".to_string())
            }
            AppError::Cli(CliError::MissingInput { hint, .. }) => Some(hint.clone()),
            AppError::Storage(StorageError::CredentialsNotFound { hint }) => Some(hint.clone()),
            AppError::Api(ApiError::Timeout { .. }) => {
                Some("Check your internet connection and try again".to_string())
            }
            AppError::Rollout(_) => {
                Some("Pass steps as ascending percentages, e.g. --steps 1,20,50,100".to_string())
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_error_display() {
        let cli_err = CliError::InvalidArguments("invalid arguments".to_string());
        assert_eq!(
            format!("{}", cli_err),
            "Invalid arguments: invalid arguments"
        );
        let cli_err = CliError::MissingInput {
            input: "track".to_string(),
            hint: "pass --track or set it on the profile".to_string(),
        };
        assert!(matches!(cli_err, CliError::MissingInput { .. }));
        if let CliError::MissingInput { input, hint } = cli_err {
            assert_eq!(input, "track");
            assert_eq!(hint, "pass --track or set it on the profile");
        }
    }

    #[test]
    fn test_api_error_display() {
        let api_err = ApiError::Unauthorized {
            status: 401,
            endpoint: "endpoint".to_string(),
            server_message: "message".to_string(),
        };
        assert!(matches!(api_err, ApiError::Unauthorized { .. }));

        let api_err = ApiError::Timeout {
            timeout_secs: 10,
            endpoint: "endpoint".to_string(),
        };
        assert_eq!(format!("{}", api_err), "Request timed out after 10s");

        let api_err = ApiError::Http {
            status: 400,
            endpoint: "endpoint".to_string(),
            message: "message".to_string(),
        };
        assert_eq!(format!("{}", api_err), "HTTP error: 400 message");
    }

    #[test]
    fn test_rollout_error_display() {
        let err = RolloutError::NotNumeric {
            value: "abc".to_string(),
        };
        assert_eq!(
            format!("{}", err),
            "Rollout steps must be comma-separated numbers only (e.g. 1,20,50,100)"
        );

        let err = RolloutError::OutOfRange { value: 120 };
        assert_eq!(
            format!("{}", err),
            "Rollout step 120 is out of range; all steps must be between 0 and 100"
        );

        let err = RolloutError::NotIncreasing { prev: 50, next: 20 };
        assert_eq!(
            format!("{}", err),
            "Rollout step 20 must be strictly greater than the previous step 50"
        );
    }

    #[test]
    fn test_notify_error_display() {
        let err = NotifyError::Rejected {
            status: 400,
            body: "bad payload".to_string(),
        };
        assert_eq!(
            format!("{}", err),
            "Webhook rejected the message with status 400: bad payload"
        );
    }

    #[test]
    fn test_severity_mapping() {
        let app_err = AppError::Auth(AuthError::CredentialsRevoked);
        assert_eq!(app_err.severity(), ErrorSeverity::High);
        assert_eq!(app_err.severity().emoji(), "❌");

        let app_err = AppError::Api(ApiError::Http {
            status: 503,
            endpoint: "endpoint".to_string(),
            message: "unavailable".to_string(),
        });
        assert_eq!(app_err.severity(), ErrorSeverity::High);

        let app_err = AppError::Rollout(RolloutError::Empty);
        assert_eq!(app_err.severity(), ErrorSeverity::Medium);
    }

    #[test]
    fn test_troubleshooting_hints() {
        let app_err = AppError::Auth(AuthError::CredentialsRevoked);
        assert!(
            app_err
                .troubleshooting_hint()
                .is_some_and(|h| h.contains("service account key"))
        );

        let app_err = AppError::Rollout(RolloutError::Empty);
        assert!(
            app_err
                .troubleshooting_hint()
                .is_some_and(|h| h.contains("--steps"))
        );

        let app_err = AppError::Api(ApiError::Http {
            status: 500,
            endpoint: "endpoint".to_string(),
            message: "message".to_string(),
        });
        assert!(app_err.troubleshooting_hint().is_none());
    }

    #[test]
    fn test_display_friendly() {
        let app_err = AppError::Auth(AuthError::CredentialsRevoked);
        assert_eq!(
            app_err.display_friendly(),
            "The credentials have been revoked or expired"
        );

        let app_err = AppError::Notify(NotifyError::Rejected {
            status: 410,
            body: "gone".to_string(),
        });
        assert_eq!(
            app_err.display_friendly(),
            "Something went wrong whilst sending the message (status 410)"
        );
    }
}
