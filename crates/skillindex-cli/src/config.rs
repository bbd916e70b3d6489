use anyhow::{anyhow, Result};
use serde::Deserialize;
use skillindex_stars::StarsConfig;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Default config template created when no config exists
const DEFAULT_CONFIG: &str = r#"
[catalog]
path = "public/skills.json"

[stars]
api_base_url = "https://api.github.com"  # Override via GITHUB_API_URL env var
ttl_hours = 24
request_timeout_secs = 5

[cache]
backend = "sqlite"  # or "memory"
path = "~/.skillindex/stars.db"

[site]
base_url = "https://skillindex.dev"
output_dir = "public"

[logging]
level = "info"  # trace, debug, info, warn, error
"#;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CatalogConfig {
    pub path: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: "public/skills.json".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
    Sqlite,
    Memory,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CacheConfig {
    pub backend: CacheBackend,
    pub path: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            backend: CacheBackend::Sqlite,
            path: "~/.skillindex/stars.db".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SiteConfig {
    pub base_url: String,
    pub output_dir: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: "https://skillindex.dev".to_string(),
            output_dir: "public".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub catalog: CatalogConfig,
    pub stars: StarsConfig,
    pub cache: CacheConfig,
    pub site: SiteConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Get the global config path: ~/.skillindex/skillindex.toml
    fn global_config_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| anyhow!("Could not find home directory"))?;
        Ok(home.join(".skillindex").join("skillindex.toml"))
    }

    /// Ensure global config directory and file exist, creating defaults if needed
    fn ensure_global_config() -> Result<PathBuf> {
        let config_path = Self::global_config_path()?;

        if let Some(config_dir) = config_path.parent() {
            if !config_dir.exists() {
                fs::create_dir_all(config_dir)?;
                eprintln!("Created config directory: {}", config_dir.display());
            }
        }

        if !config_path.exists() {
            fs::write(&config_path, DEFAULT_CONFIG.trim())?;
            eprintln!("Created default config: {}", config_path.display());
        }

        Ok(config_path)
    }

    /// Load configuration with layered approach:
    /// 1. Global config: ~/.skillindex/skillindex.toml (auto-created if missing)
    /// 2. Local override: ./skillindex.toml (workspace, optional)
    /// 3. Environment variables (highest priority)
    pub fn load() -> Result<Self> {
        // Load .env file from current directory
        dotenvy::dotenv().ok();

        let global_config_path = Self::ensure_global_config()?;
        Self::load_layers(&global_config_path, "skillindex")
    }

    fn load_layers(global_config_path: &Path, local_name: &str) -> Result<Self> {
        // Later sources override earlier ones
        let mut config_builder = config::Config::builder()
            .add_source(config::File::from(global_config_path.to_path_buf()))
            .add_source(config::File::with_name(local_name).required(false))
            // SKILLINDEX__STARS__TTL_HOURS=1 -> stars.ttl_hours
            .add_source(
                config::Environment::with_prefix("SKILLINDEX")
                    .separator("__")
                    .try_parsing(true),
            );

        if let Ok(url) = env::var("GITHUB_API_URL") {
            config_builder = config_builder.set_override("stars.api_base_url", url)?;
        }

        let config: Self = config_builder.build()?.try_deserialize()?;
        Ok(config)
    }
}

/// Expand a leading `~` to the home directory
pub fn expand_tilde(path: &str) -> PathBuf {
    match (path.strip_prefix('~'), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest.trim_start_matches('/')),
        _ => PathBuf::from(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_template_parses() {
        let dir = tempfile::tempdir().unwrap();
        let global = dir.path().join("skillindex.toml");
        fs::write(&global, DEFAULT_CONFIG.trim()).unwrap();
        let local = dir.path().join("absent");

        let config = Config::load_layers(&global, local.to_str().unwrap()).unwrap();
        assert_eq!(config.catalog.path, "public/skills.json");
        assert_eq!(config.stars.ttl_hours, 24);
        assert_eq!(config.cache.backend, CacheBackend::Sqlite);
        assert_eq!(config.site.base_url, "https://skillindex.dev");
    }

    #[test]
    fn test_local_file_overrides_global() {
        let dir = tempfile::tempdir().unwrap();
        let global = dir.path().join("global.toml");
        fs::write(&global, DEFAULT_CONFIG.trim()).unwrap();
        let local = dir.path().join("local.toml");
        fs::write(&local, "[cache]\nbackend = \"memory\"\n\n[stars]\nttl_hours = 2\n").unwrap();

        let local_name = dir.path().join("local");
        let config = Config::load_layers(&global, local_name.to_str().unwrap()).unwrap();
        assert_eq!(config.cache.backend, CacheBackend::Memory);
        assert_eq!(config.stars.ttl_hours, 2);
        assert_eq!(config.stars.request_timeout_secs, 5);
    }

    #[test]
    fn test_expand_tilde() {
        assert_eq!(expand_tilde("/tmp/stars.db"), PathBuf::from("/tmp/stars.db"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(
                expand_tilde("~/.skillindex/stars.db"),
                home.join(".skillindex/stars.db")
            );
        }
    }
}
