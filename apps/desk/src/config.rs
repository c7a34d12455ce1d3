//! # Application Configuration
//!
//! Environment-driven configuration with development defaults. A `.env`
//! file in the working directory is honoured via dotenvy.
//!
//! | Variable          | Default                       | Purpose              |
//! |-------------------|-------------------------------|----------------------|
//! | `EXIM_API_URL`    | `http://localhost:5000/api`   | Upstream base URL    |
//! | `EXIM_API_TOKEN`  | (none)                        | Bearer token         |
//! | `EXIM_OUTPUT_DIR` | `.`                           | PDF output directory |

use std::env;
use std::path::PathBuf;

/// Resolved application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_base_url: String,
    pub api_token: Option<String>,
    pub output_dir: PathBuf,
}

impl AppConfig {
    /// Reads configuration from the environment.
    pub fn from_env() -> Self {
        Self {
            api_base_url: env::var("EXIM_API_URL")
                .unwrap_or_else(|_| "http://localhost:5000/api".to_string()),
            api_token: env::var("EXIM_API_TOKEN")
                .ok()
                .filter(|t| !t.trim().is_empty()),
            output_dir: env::var("EXIM_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".")),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_env() {
        // Scoped to variables this test controls.
        env::remove_var("EXIM_API_URL");
        env::remove_var("EXIM_API_TOKEN");
        env::remove_var("EXIM_OUTPUT_DIR");

        let config = AppConfig::from_env();
        assert_eq!(config.api_base_url, "http://localhost:5000/api");
        assert!(config.api_token.is_none());
        assert_eq!(config.output_dir, PathBuf::from("."));
    }
}
