//! Runtime configuration resolved from the environment.
//!
//! `.env` is loaded by the binary before this runs, so values there count as
//! environment variables too.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

pub const DATA_DIR_VAR: &str = "GRADEBOOK_DATA_DIR";
pub const LOG_FILE_VAR: &str = "LOG_FILE_PATH";

const DEFAULT_DATA_DIR: &str = "data";
const DEFAULT_LOG_FILE: &str = "logs/gradebook.log";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub log_file_path: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary variable lookup.
    pub fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Self {
        let data_dir = lookup(DATA_DIR_VAR)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DATA_DIR.to_string());
        let log_file_path = lookup(LOG_FILE_VAR)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_FILE.to_string());

        Self {
            data_dir: PathBuf::from(data_dir),
            log_file_path: PathBuf::from(log_file_path),
        }
    }

    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    /// Directory the rolling log file lives in.
    pub fn log_dir(&self) -> &Path {
        match self.log_file_path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("logs"),
        }
    }

    /// File name prefix for the rolling log file.
    pub fn log_file_name(&self) -> &OsStr {
        self.log_file_path
            .file_name()
            .unwrap_or(OsStr::new("gradebook.log"))
    }
}

/// Log filter from the directives in `var`, falling back to `default` when
/// the variable is unset, blank or unparsable.
pub fn env_filter(var: &str, default: &str) -> EnvFilter {
    filter_or_default(std::env::var(var).ok().as_deref(), default)
}

fn filter_or_default(directives: Option<&str>, default: &str) -> EnvFilter {
    directives
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(default))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tracing_subscriber::filter::LevelFilter;

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(|_| None);
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert_eq!(config.log_dir(), Path::new("logs"));
        assert_eq!(config.log_file_name(), OsStr::new("gradebook.log"));
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            (DATA_DIR_VAR, "/srv/grades"),
            (LOG_FILE_VAR, "/var/log/gb/app.log"),
        ]
        .into_iter()
        .collect();
        let config = Config::from_lookup(|k| vars.get(k).map(|v| v.to_string()));

        assert_eq!(config.data_dir, PathBuf::from("/srv/grades"));
        assert_eq!(config.log_dir(), Path::new("/var/log/gb"));
        assert_eq!(config.log_file_name(), OsStr::new("app.log"));
    }

    #[test]
    fn test_bare_log_file_name_uses_default_dir() {
        let config = Config::from_lookup(|k| (k == LOG_FILE_VAR).then(|| "app.log".to_string()));
        assert_eq!(config.log_dir(), Path::new("logs"));
    }

    #[test]
    fn test_with_data_dir() {
        let config = Config::from_lookup(|_| None).with_data_dir("elsewhere");
        assert_eq!(config.data_dir, PathBuf::from("elsewhere"));
    }

    #[test]
    fn test_filter_directives_override_default() {
        let filter = filter_or_default(Some("debug"), "warn");
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));
    }

    #[test]
    fn test_filter_falls_back_to_default() {
        assert_eq!(
            filter_or_default(None, "warn").max_level_hint(),
            Some(LevelFilter::WARN)
        );
        assert_eq!(
            filter_or_default(Some("  "), "warn").max_level_hint(),
            Some(LevelFilter::WARN)
        );
    }
}
