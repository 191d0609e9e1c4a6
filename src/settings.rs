use std::time::{Duration, Instant};

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Runtime configuration
///
/// Loaded with the following priority (highest to lowest):
/// 1. Environment variables with RECIPE_CLIPPER__ prefix
/// 2. config.toml file in current directory
/// 3. Default values
///
/// Environment variable format: RECIPE_CLIPPER__ANALYSIS__MODEL
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    /// Primary page / oEmbed request timeout in seconds
    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout_secs: u64,
    /// User agent sent on outbound fetches
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Analyzer collaborator configuration
    #[serde(default)]
    pub analysis: AnalysisSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AnalysisSettings {
    /// Model identifier handed to the analyzer collaborator
    #[serde(default = "default_model")]
    pub model: String,
    /// How long a resolved model name stays cached before re-reading
    #[serde(default = "default_model_ttl")]
    pub model_cache_ttl_secs: u64,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            model: default_model(),
            model_cache_ttl_secs: default_model_ttl(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            fetch_timeout_secs: default_fetch_timeout(),
            user_agent: default_user_agent(),
            analysis: AnalysisSettings::default(),
        }
    }
}

fn default_fetch_timeout() -> u64 {
    15
}

fn default_user_agent() -> String {
    crate::fetch::DEFAULT_USER_AGENT.to_string()
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_model_ttl() -> u64 {
    300
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            // Optional config file (can be missing)
            .add_source(File::with_name("config").required(false))
            // Use double underscore for nested: RECIPE_CLIPPER__ANALYSIS__MODEL
            .add_source(
                Environment::with_prefix("RECIPE_CLIPPER")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

/// Time-stamped cache for the analyzer model name.
///
/// Admin updates change the configured model at runtime; callers hold
/// one of these (injected, not ambient module state) and call
/// [`ModelCache::invalidate`] when the setting changes.
#[derive(Debug)]
pub struct ModelCache {
    ttl: Duration,
    cached: Option<(String, Instant)>,
}

impl ModelCache {
    pub fn new(ttl: Duration) -> Self {
        Self { ttl, cached: None }
    }

    /// Return the cached value if fresh, otherwise reload and restamp.
    pub fn get(&mut self, load: impl FnOnce() -> String) -> String {
        if let Some((value, stamp)) = &self.cached {
            if stamp.elapsed() < self.ttl {
                return value.clone();
            }
        }
        let value = load();
        self.cached = Some((value.clone(), Instant::now()));
        value
    }

    pub fn invalidate(&mut self) {
        self.cached = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sensible() {
        let settings = Settings::default();
        assert_eq!(settings.fetch_timeout_secs, 15);
        assert_eq!(settings.analysis.model_cache_ttl_secs, 300);
        assert!(!settings.user_agent.is_empty());
    }

    #[test]
    fn model_cache_serves_fresh_value_without_reloading() {
        let mut cache = ModelCache::new(Duration::from_secs(60));
        assert_eq!(cache.get(|| "first".to_string()), "first");
        // Loader would change the value, but the cache is still fresh.
        assert_eq!(cache.get(|| "second".to_string()), "first");
    }

    #[test]
    fn model_cache_reloads_after_invalidate() {
        let mut cache = ModelCache::new(Duration::from_secs(60));
        assert_eq!(cache.get(|| "first".to_string()), "first");
        cache.invalidate();
        assert_eq!(cache.get(|| "second".to_string()), "second");
    }

    #[test]
    fn model_cache_expires_with_zero_ttl() {
        let mut cache = ModelCache::new(Duration::ZERO);
        assert_eq!(cache.get(|| "first".to_string()), "first");
        assert_eq!(cache.get(|| "second".to_string()), "second");
    }
}
