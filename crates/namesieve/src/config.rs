//! Runtime configuration from the environment.
//!
//! | Variable | Default | Meaning |
//! |---|---|---|
//! | `NAMESIEVE_CACHE_DIR` | `Caches` | Directory holding `cache_<id>.json` files |
//! | `NAMESIEVE_PARALLEL_THRESHOLD` | `1000` | Key count at which scoring runs in parallel |
//!
//! Command line flags override the environment. Unparseable values are
//! logged and replaced by the default.

use std::path::PathBuf;

use namesieve_core::IndexConfig;
use tracing::warn;

pub const CACHE_DIR_VAR: &str = "NAMESIEVE_CACHE_DIR";
pub const PARALLEL_THRESHOLD_VAR: &str = "NAMESIEVE_PARALLEL_THRESHOLD";

pub const DEFAULT_CACHE_DIR: &str = "Caches";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub cache_dir: PathBuf,
    pub parallel_threshold: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_dir: PathBuf::from(DEFAULT_CACHE_DIR),
            parallel_threshold: IndexConfig::default().parallel_threshold,
        }
    }
}

impl Config {
    /// Read configuration from process environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`, falling back to defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let cache_dir = lookup(CACHE_DIR_VAR)
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.cache_dir);

        let parallel_threshold = match lookup(PARALLEL_THRESHOLD_VAR) {
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(value) if value > 0 => value,
                _ => {
                    warn!(
                        var = PARALLEL_THRESHOLD_VAR,
                        value = %raw,
                        default = defaults.parallel_threshold,
                        "invalid value, using default"
                    );
                    defaults.parallel_threshold
                }
            },
            None => defaults.parallel_threshold,
        };

        Self {
            cache_dir,
            parallel_threshold,
        }
    }

    /// Override the cache directory (command line flag)
    pub fn with_cache_dir(mut self, cache_dir: Option<PathBuf>) -> Self {
        if let Some(dir) = cache_dir {
            self.cache_dir = dir;
        }
        self
    }

    pub fn index_config(&self) -> IndexConfig {
        IndexConfig {
            parallel_threshold: self.parallel_threshold,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[]));
        assert_eq!(config.cache_dir, PathBuf::from("Caches"));
        assert_eq!(config.parallel_threshold, 1000);
    }

    #[test]
    fn test_env_values() {
        let config = Config::from_lookup(lookup(&[
            (CACHE_DIR_VAR, "/var/cache/namesieve"),
            (PARALLEL_THRESHOLD_VAR, "250"),
        ]));
        assert_eq!(config.cache_dir, PathBuf::from("/var/cache/namesieve"));
        assert_eq!(config.index_config().parallel_threshold, 250);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = Config::from_lookup(lookup(&[
            (CACHE_DIR_VAR, "  "),
            (PARALLEL_THRESHOLD_VAR, "lots"),
        ]));
        assert_eq!(config, Config::default());

        let config = Config::from_lookup(lookup(&[(PARALLEL_THRESHOLD_VAR, "0")]));
        assert_eq!(config.parallel_threshold, 1000);
    }

    #[test]
    fn test_flag_overrides_env() {
        let config = Config::from_lookup(lookup(&[(CACHE_DIR_VAR, "from-env")]))
            .with_cache_dir(Some(PathBuf::from("from-flag")));
        assert_eq!(config.cache_dir, PathBuf::from("from-flag"));

        let config = Config::from_lookup(lookup(&[(CACHE_DIR_VAR, "from-env")])).with_cache_dir(None);
        assert_eq!(config.cache_dir, PathBuf::from("from-env"));
    }
}
