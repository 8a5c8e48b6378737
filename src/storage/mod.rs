//! Storage layer
//!
//! Handles the TOML configuration file and the service-account
//! credentials file the step receives from its environment.

use crate::error::StorageError;

pub mod config;
pub mod credentials;

type Result<T> = std::result::Result<T, StorageError>;
