pub use error::AppError;

/// Main architecture layers (dependency flow: CLI → Core → Storage)
pub mod cli; // Command-line interface
pub mod core; // Rollout decisions and Play authentication
pub mod storage; // Configuration and credentials files

/// Support modules (used across layers)
pub mod api; // Play Console API client
pub mod display; // Output formatting
pub mod error; // Error handling
pub mod notify; // Teams webhook delivery
pub mod utils; // Shared utilities and helpers

pub type Result<T> = std::result::Result<T, AppError>;
