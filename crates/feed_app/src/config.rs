//! Configuration for the feed app.
//!
//! Values come from command-line flags, the `GIPHY_API_KEY` environment
//! variable and an optional RON file, in that order of precedence.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use feed_core::DEFAULT_PAGE_SIZE;
use feed_engine::{ApiKey, FetchSettings};
use feed_logging::LevelFilter;
use serde::Deserialize;

const DEFAULT_LOG_FILE: &str = "./gif_feed.log";

/// Browse the trending GIF feed in the terminal.
#[derive(Debug, Default, Parser)]
#[command(name = "gif_feed", version, about, long_about = None)]
pub struct Args {
    /// Path to a RON config file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// API key sent with every request
    #[arg(long, env = "GIPHY_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Base URL of the feed API
    #[arg(long)]
    pub base_url: Option<String>,

    /// Number of items requested per page
    #[arg(long)]
    pub page_size: Option<u32>,

    /// Where to write the log file
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Log level: off, error, warn, info, debug or trace
    #[arg(long)]
    pub log_level: Option<String>,
}

/// Contents of the optional RON config file.
#[derive(Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub page_size: Option<u32>,
    pub connect_timeout_secs: Option<u64>,
    pub request_timeout_secs: Option<u64>,
    pub log_file: Option<PathBuf>,
    pub log_level: Option<String>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        ron::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
    #[error("no API key: pass --api-key, set GIPHY_API_KEY or add api_key to the config file")]
    MissingApiKey,
    #[error("page size must be at least 1")]
    ZeroPageSize,
    #[error("unknown log level {0:?}")]
    UnknownLogLevel(String),
}

/// Fully resolved settings for one run of the app.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_key: ApiKey,
    pub fetch: FetchSettings,
    pub page_size: u32,
    pub log_file: PathBuf,
    pub log_level: LevelFilter,
}

impl AppConfig {
    pub fn resolve(args: Args) -> Result<Self, ConfigError> {
        let file = match &args.config {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };
        Self::merge(args, file)
    }

    fn merge(args: Args, file: FileConfig) -> Result<Self, ConfigError> {
        let api_key = args
            .api_key
            .or(file.api_key)
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        let page_size = args
            .page_size
            .or(file.page_size)
            .unwrap_or(DEFAULT_PAGE_SIZE);
        if page_size == 0 {
            return Err(ConfigError::ZeroPageSize);
        }

        let log_level = match args.log_level.or(file.log_level) {
            Some(name) => {
                feed_logging::parse_level(&name).ok_or(ConfigError::UnknownLogLevel(name))?
            }
            None => LevelFilter::Info,
        };

        let mut fetch = FetchSettings::default();
        if let Some(base_url) = args.base_url.or(file.base_url) {
            fetch.base_url = base_url;
        }
        if let Some(secs) = file.connect_timeout_secs {
            fetch.connect_timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = file.request_timeout_secs {
            fetch.request_timeout = Duration::from_secs(secs);
        }

        Ok(Self {
            api_key: ApiKey::new(api_key),
            fetch,
            page_size,
            log_file: args
                .log_file
                .or(file.log_file)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE)),
            log_level,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use feed_engine::DEFAULT_BASE_URL;
    use pretty_assertions::assert_eq;
    use tempfile::NamedTempFile;

    use super::*;

    fn args_with_key(key: &str) -> Args {
        Args {
            api_key: Some(key.to_string()),
            ..Args::default()
        }
    }

    #[test]
    fn defaults_apply_when_only_key_is_given() {
        let config = AppConfig::merge(args_with_key("abc"), FileConfig::default()).unwrap();
        assert_eq!(config.api_key.expose(), "abc");
        assert_eq!(config.page_size, 10);
        assert_eq!(config.fetch.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.log_file, PathBuf::from(DEFAULT_LOG_FILE));
        assert_eq!(config.log_level, LevelFilter::Info);
    }

    #[test]
    fn flags_win_over_file_values() {
        let args = Args {
            page_size: Some(25),
            base_url: Some("http://localhost:9000/".to_string()),
            ..args_with_key("from-flag")
        };
        let file = FileConfig {
            api_key: Some("from-file".to_string()),
            page_size: Some(5),
            base_url: Some("http://file.example.com/".to_string()),
            request_timeout_secs: Some(3),
            ..FileConfig::default()
        };

        let config = AppConfig::merge(args, file).unwrap();
        assert_eq!(config.api_key.expose(), "from-flag");
        assert_eq!(config.page_size, 25);
        assert_eq!(config.fetch.base_url, "http://localhost:9000/");
        assert_eq!(config.fetch.request_timeout, Duration::from_secs(3));
    }

    #[test]
    fn missing_or_blank_key_is_rejected() {
        let err = AppConfig::merge(Args::default(), FileConfig::default()).unwrap_err();
        assert!(matches!(err, ConfigError::MissingApiKey));

        let err = AppConfig::merge(args_with_key("   "), FileConfig::default()).unwrap_err();
        assert!(matches!(err, ConfigError::MissingApiKey));
    }

    #[test]
    fn zero_page_size_is_rejected() {
        let args = Args {
            page_size: Some(0),
            ..args_with_key("k")
        };
        let err = AppConfig::merge(args, FileConfig::default()).unwrap_err();
        assert!(matches!(err, ConfigError::ZeroPageSize));
    }

    #[test]
    fn unknown_log_level_is_rejected() {
        let args = Args {
            log_level: Some("chatty".to_string()),
            ..args_with_key("k")
        };
        let err = AppConfig::merge(args, FileConfig::default()).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownLogLevel(level) if level == "chatty"));
    }

    #[test]
    fn file_config_is_read_from_ron() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"(
                api_key: Some("file-key"),
                page_size: Some(15),
                connect_timeout_secs: Some(2),
                log_level: Some("debug"),
            )"#
        )
        .unwrap();

        let args = Args {
            config: Some(file.path().to_path_buf()),
            ..Args::default()
        };
        let config = AppConfig::resolve(args).unwrap();
        assert_eq!(config.api_key.expose(), "file-key");
        assert_eq!(config.page_size, 15);
        assert_eq!(config.fetch.connect_timeout, Duration::from_secs(2));
        assert_eq!(config.log_level, LevelFilter::Debug);
    }

    #[test]
    fn unknown_file_keys_are_a_parse_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "(api_key: Some(\"k\"), colour: Some(\"red\"))").unwrap();

        let err = FileConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = FileConfig::load(Path::new("/definitely/not/here.ron")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
