//! Application Configuration
//!
//! Build-time settings and shared constants.

use tracing::Level;

/// Session storage keys
pub const TOKEN_KEY: &str = "token";
pub const ROLE_KEY: &str = "role";
pub const USER_INFO_KEY: &str = "user_info";

/// Pagination
pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const PAGE_SIZE_CHOICES: &[u32] = &[5, 10, 25, 50];

/// Export file names
pub const REPORT_FILE_NAME: &str = "report.xlsx";
pub const FINAL_PROCESSING_FILE_NAME: &str = "FinalProcessingReport.xlsx";

/// Delay before a temporary download URL is revoked
pub const OBJECT_URL_REVOKE_MS: u32 = 100;

/// Runtime configuration resolved once at start-up
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub log_level: Level,
}

impl AppConfig {
    /// Read `API_URL` and `LOG_LEVEL` from the build environment
    pub fn from_build_env() -> Self {
        Self::from_values(option_env!("API_URL"), option_env!("LOG_LEVEL"))
    }

    pub fn from_values(api_url: Option<&str>, log_level: Option<&str>) -> Self {
        let api_base_url = api_url
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .unwrap_or_default();

        Self {
            api_base_url,
            log_level: parse_level(log_level.unwrap_or("info")),
        }
    }
}

fn parse_level(value: &str) -> Level {
    match value.trim().to_ascii_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let config = AppConfig::from_values(Some("https://api.example.kz/"), None);
        assert_eq!(config.api_base_url, "https://api.example.kz");
        assert_eq!(config.log_level, Level::INFO);
    }

    #[test]
    fn test_missing_url_means_same_origin() {
        let config = AppConfig::from_values(None, Some("DEBUG"));
        assert_eq!(config.api_base_url, "");
        assert_eq!(config.log_level, Level::DEBUG);
    }

    #[test]
    fn test_unknown_level_falls_back_to_info() {
        assert_eq!(parse_level("verbose"), Level::INFO);
        assert_eq!(parse_level("warn"), Level::WARN);
    }
}
