//! Pipeline configuration: source URL, output locations and request timeout.

use std::path::PathBuf;
use std::time::Duration;

use tracing::warn;

pub const DEFAULT_SOURCE_URL: &str =
    "https://raw.githubusercontent.com/yuhonas/free-exercise-db/main/dist/exercises.json";
pub const DEFAULT_OUTPUT_DIR: &str = "exercise_data";
pub const DEFAULT_EXPORT_FILE: &str = "gymmando_exercises.json";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Remote JSON array of exercises (or a local file path).
    pub source_url: String,
    /// Directory the raw and reduced files are written to. Created on demand.
    pub output_dir: PathBuf,
    /// File name of the reduced export inside `output_dir`.
    pub export_file: String,
    /// Total request timeout for the fetch.
    pub timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_url: DEFAULT_SOURCE_URL.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            export_file: DEFAULT_EXPORT_FILE.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl Config {
    /// Defaults overlaid with `EXERCISE_SOURCE_URL`, `EXERCISE_OUTPUT_DIR`,
    /// `EXERCISE_EXPORT_FILE` and `EXERCISE_TIMEOUT_SECS`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(url) = lookup("EXERCISE_SOURCE_URL") {
            config.source_url = url;
        }
        if let Some(dir) = lookup("EXERCISE_OUTPUT_DIR") {
            config.output_dir = PathBuf::from(dir);
        }
        if let Some(file) = lookup("EXERCISE_EXPORT_FILE") {
            config.export_file = file;
        }
        if let Some(raw) = lookup("EXERCISE_TIMEOUT_SECS") {
            match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => config.timeout = Duration::from_secs(secs),
                _ => warn!(value = %raw, "Ignoring invalid EXERCISE_TIMEOUT_SECS"),
            }
        }

        config
    }

    /// Full path of the reduced export.
    pub fn export_path(&self) -> PathBuf {
        self.output_dir.join(&self.export_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.source_url, DEFAULT_SOURCE_URL);
        assert_eq!(config.output_dir, PathBuf::from("exercise_data"));
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(
            config.export_path(),
            PathBuf::from("exercise_data").join("gymmando_exercises.json")
        );
    }

    #[test]
    fn test_env_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("EXERCISE_SOURCE_URL", "http://localhost/ex.json"),
            ("EXERCISE_OUTPUT_DIR", "/tmp/out"),
            ("EXERCISE_EXPORT_FILE", "app.json"),
            ("EXERCISE_TIMEOUT_SECS", "5"),
        ]));

        assert_eq!(config.source_url, "http://localhost/ex.json");
        assert_eq!(config.export_path(), PathBuf::from("/tmp/out/app.json"));
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_invalid_timeout_keeps_default() {
        for raw in ["abc", "0", "-3"] {
            let config = Config::from_lookup(lookup_from(&[("EXERCISE_TIMEOUT_SECS", raw)]));
            assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        }
    }
}
