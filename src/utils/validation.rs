//! Input validation and sanitization utilities
//!
//! This module provides utilities for validating user input before any
//! network traffic happens.

use crate::error::CliError;

/// Validate that a URL is properly formatted
pub fn validate_url(url: &str) -> crate::Result<()> {
    if url.is_empty() {
        return Err(CliError::InvalidArguments("URL cannot be empty".to_string()).into());
    }

    // Basic URL validation - must start with http:// or https://
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(CliError::InvalidArguments(format!(
            "Invalid URL '{}': URL must start with http:// or https://",
            url
        ))
        .into());
    }

    Ok(())
}

/// Validate an Android application id (reverse-DNS, e.g. com.example.app)
pub fn validate_package_name(package_name: &str) -> crate::Result<()> {
    if package_name.is_empty() {
        return Err(
            CliError::InvalidArguments("Package name cannot be empty".to_string()).into(),
        );
    }

    let segments: Vec<&str> = package_name.split('.').collect();
    if segments.len() < 2 {
        return Err(CliError::InvalidArguments(format!(
            "Invalid package name '{}': expected at least two dot-separated segments",
            package_name
        ))
        .into());
    }

    for segment in segments {
        let starts_ok = segment.chars().next().is_some_and(|c| c.is_ascii_alphabetic());
        let chars_ok = segment
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_');
        if !starts_ok || !chars_ok {
            return Err(CliError::InvalidArguments(format!(
                "Invalid package name '{}': segment '{}' is not valid",
                package_name, segment
            ))
            .into());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url_accepts_valid_urls() {
        assert!(validate_url("http://localhost:3000").is_ok());
        assert!(validate_url("https://example.webhook.office.com/webhookb2/abc").is_ok());
    }

    #[test]
    fn test_validate_url_rejects_invalid_urls() {
        assert!(validate_url("").is_err());
        assert!(validate_url("example.webhook.office.com").is_err());
        assert!(validate_url("ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_package_name_accepts_valid_names() {
        assert!(validate_package_name("com.example.app").is_ok());
        assert!(validate_package_name("org.mozilla.firefox_beta").is_ok());
        assert!(validate_package_name("io.app2").is_ok());
    }

    #[test]
    fn test_validate_package_name_rejects_invalid_names() {
        assert!(validate_package_name("").is_err());
        assert!(validate_package_name("singlesegment").is_err());
        assert!(validate_package_name("com..app").is_err());
        assert!(validate_package_name("com.1example.app").is_err());
        assert!(validate_package_name("com.exa mple.app").is_err());
    }
}
