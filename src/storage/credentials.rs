use super::Result;
use crate::error::StorageError;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Standard Google variable pointing at a key file on disk
pub const CREDENTIALS_PATH_ENV: &str = "GOOGLE_APPLICATION_CREDENTIALS";
/// Raw key JSON handed over by the CI environment instead of a file
pub const CREDENTIALS_JSON_ENV: &str = "SERVICE_ACCOUNT_JSON";

/// Where the service-account key comes from for this run.
///
/// When the key arrives as raw JSON through the environment it gets
/// materialized into a temp file that is removed again on drop, so the
/// secret never outlives the process, whichever way the run ends.
#[derive(Debug)]
pub enum CredentialsSource {
    File(PathBuf),
    Ephemeral(EphemeralKeyFile),
}

impl CredentialsSource {
    /// Resolve in order: explicit path, `GOOGLE_APPLICATION_CREDENTIALS`,
    /// then `SERVICE_ACCOUNT_JSON` content
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Ok(CredentialsSource::File(path.to_path_buf()));
        }

        if let Ok(path) = env::var(CREDENTIALS_PATH_ENV) {
            if !path.is_empty() {
                return Ok(CredentialsSource::File(PathBuf::from(path)));
            }
        }

        if let Ok(raw) = env::var(CREDENTIALS_JSON_ENV) {
            if !raw.is_empty() {
                return Ok(CredentialsSource::Ephemeral(EphemeralKeyFile::materialize(
                    &raw,
                )?));
            }
        }

        Err(StorageError::CredentialsNotFound {
            hint: format!(
                "Pass --credentials, or set {} / {}",
                CREDENTIALS_PATH_ENV, CREDENTIALS_JSON_ENV
            ),
        })
    }

    pub fn path(&self) -> &Path {
        match self {
            CredentialsSource::File(path) => path,
            CredentialsSource::Ephemeral(file) => file.path(),
        }
    }

    /// Read the key file contents; the blob stays opaque here
    pub fn read(&self) -> Result<String> {
        let path = self.path();
        fs::read_to_string(path).map_err(|source| StorageError::FileIo {
            path: path.to_string_lossy().to_string(),
            source,
        })
    }
}

/// A key file written to the temp directory and deleted on drop
#[derive(Debug)]
pub struct EphemeralKeyFile {
    path: PathBuf,
}

impl EphemeralKeyFile {
    pub fn materialize(contents: &str) -> Result<Self> {
        let path = env::temp_dir().join(format!(
            "rollout-messenger-key-{}.json",
            std::process::id()
        ));

        fs::write(&path, contents).map_err(|source| StorageError::FileIo {
            path: path.to_string_lossy().to_string(),
            source,
        })?;

        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for EphemeralKeyFile {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_file(&self.path) {
            log::warn!(
                "Failed to remove credentials file {}: {}",
                self.path.display(),
                e
            );
        }
    }
}
