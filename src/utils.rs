//! Parsing and filesystem helpers shared by the builder and the CLI

use crate::error::{HttpClientError, Result};
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// URL helpers
pub struct UrlUtils;

impl UrlUtils {
    /// Parse a command-line URL, assuming `http://` when no scheme is given
    pub fn validate_url(input: &str) -> Result<Url> {
        let url_str = if input.contains("://") {
            input.to_string()
        } else {
            format!("http://{}", input)
        };

        Url::parse(&url_str)
            .map_err(|e| HttpClientError::InvalidUrl(format!("Invalid URL '{}': {}", input, e)))
    }
}

/// File system utilities
pub struct FileUtils;

impl FileUtils {
    /// Expand a leading `~` to the home directory
    pub fn expand_path(path: &str) -> Result<PathBuf> {
        let Some(rest) = path.strip_prefix('~') else {
            return Ok(PathBuf::from(path));
        };
        let home_dir = dirs::home_dir().ok_or_else(|| {
            HttpClientError::Config("Cannot determine home directory".to_string())
        })?;
        Ok(home_dir.join(rest.trim_start_matches(['/', '\\'])))
    }

    /// Check that `path` is an existing regular file that can be opened
    pub fn check_file_readable(path: &Path) -> Result<()> {
        if !path.exists() {
            return Err(HttpClientError::FileNotFound(format!(
                "File not found: {:?}",
                path
            )));
        }

        if !path.is_file() {
            return Err(HttpClientError::Config(format!(
                "Path is not a file: {:?}",
                path
            )));
        }

        std::fs::File::open(path).map_err(|e| {
            HttpClientError::PermissionDenied(format!("Cannot read file {:?}: {}", path, e))
        })?;

        Ok(())
    }
}

/// String utilities
pub struct StringUtils;

impl StringUtils {
    /// Parse a `Name: value` header line
    pub fn parse_header(input: &str) -> Result<(String, String)> {
        match input.split_once(':') {
            Some((key, value)) if !key.trim().is_empty() => {
                Ok((key.trim().to_string(), value.trim().to_string()))
            }
            _ => Err(HttpClientError::Config(format!(
                "Invalid header format: '{}'. Expected 'key: value'",
                input
            ))),
        }
    }

    /// Parse a `key=value` pair; the value may be empty or contain `=`
    pub fn parse_pair(input: &str) -> Result<(String, String)> {
        match input.split_once('=') {
            Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
            _ => Err(HttpClientError::Config(format!(
                "Invalid pair format: '{}'. Expected 'key=value'",
                input
            ))),
        }
    }

    /// Parse timeout values (supports suffixes like 's', 'm', 'h').
    ///
    /// Zero is rejected since every request would time out immediately.
    pub fn parse_timeout(input: &str) -> Result<Duration> {
        let (number_part, multiplier) = if let Some(stripped) = input.strip_suffix('s') {
            (stripped, 1)
        } else if let Some(stripped) = input.strip_suffix('m') {
            (stripped, 60)
        } else if let Some(stripped) = input.strip_suffix('h') {
            (stripped, 3600)
        } else if input.bytes().all(|b| b.is_ascii_digit()) {
            (input, 1)
        } else {
            return Err(HttpClientError::Config(format!(
                "Invalid timeout format: '{}'. Use number with optional suffix (s/m/h)",
                input
            )));
        };

        let number: u64 = number_part.parse().map_err(|_| {
            HttpClientError::Config(format!("Invalid timeout number: '{}'", number_part))
        })?;
        let seconds = number.checked_mul(multiplier).ok_or_else(|| {
            HttpClientError::Config(format!("Timeout too large: '{}'", input))
        })?;
        if seconds == 0 {
            return Err(HttpClientError::Config(
                "Timeout must be greater than zero".to_string(),
            ));
        }

        Ok(Duration::from_secs(seconds))
    }
}
