//! Runtime configuration for the Atelier subsystem.
//!
//! Configuration is TOML-based with a precedence system:
//! - Bundled defaults (include_str! from atelier.toml)
//! - User overrides (~/.config/atelier/atelier.toml, then ./atelier.toml)
//! - `ATELIER_*` environment variables (highest precedence)

use atelier_error::{AtelierError, AtelierResult, ConfigError};
use atelier_lineage::LineageLimits;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Database connection settings.
///
/// # Example
///
/// ```toml
/// [database]
/// url = "postgres://localhost/atelier"
/// max_connections = 10
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,

    /// Maximum number of pooled connections
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

/// Top-level Atelier configuration.
///
/// # Example
///
/// ```no_run
/// use atelier::AtelierConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = AtelierConfig::load()?;
/// println!("depth ceiling: {}", config.lineage_limits().hard_max_depth);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
pub struct AtelierConfig {
    /// Database connection settings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<DatabaseConfig>,

    /// Depth limits applied to lineage traversals
    #[serde(default)]
    pub lineage: LineageLimits,
}

impl AtelierConfig {
    /// Load configuration from a specific file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> AtelierResult<Self> {
        debug!("Loading configuration from file");

        Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()
            .map_err(|e| {
                AtelierError::from(ConfigError::new(format!(
                    "Failed to read configuration from {}: {}",
                    path.as_ref().display(),
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                AtelierError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })
    }

    /// Load configuration with precedence: env > user override > bundled
    /// default.
    ///
    /// Configuration sources in order of precedence (later sources override
    /// earlier):
    /// 1. Bundled defaults (atelier.toml shipped with the library)
    /// 2. User config in home directory (~/.config/atelier/atelier.toml)
    /// 3. User config in current directory (./atelier.toml)
    /// 4. `ATELIER_*` environment variables, `__` separating nested keys
    ///    (e.g. `ATELIER_DATABASE__URL`, `ATELIER_LINEAGE__HARD_MAX_DEPTH`)
    ///
    /// A `.env` file in the working directory is read first, so overrides
    /// can live there too. User config files are optional and silently
    /// skipped if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if a present source cannot be read or the merged
    /// result cannot be parsed.
    #[instrument]
    pub fn load() -> AtelierResult<Self> {
        debug!("Loading configuration with precedence: env > current dir > home dir > bundled defaults");

        dotenvy::dotenv().ok();

        // Bundled default configuration
        const DEFAULT_CONFIG: &str = include_str!("../../../atelier.toml");

        let mut builder = Config::builder()
            // Start with bundled defaults
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        // Add user config from home directory (optional)
        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/atelier/atelier.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        // Add user config from current directory (optional)
        builder = builder.add_source(File::with_name("atelier").required(false));

        // Environment variables win over every file source
        builder = builder.add_source(Environment::with_prefix("ATELIER").separator("__"));

        // Build and deserialize
        builder
            .build()
            .map_err(|e| {
                AtelierError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                AtelierError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })
    }

    /// Depth limits to hand to the lineage walker or service.
    pub fn lineage_limits(&self) -> LineageLimits {
        self.lineage
    }

    /// Build a PostgreSQL connection pool from these settings.
    ///
    /// Falls back to the `DATABASE_URL` environment variable when no
    /// `[database]` section is configured.
    ///
    /// # Errors
    ///
    /// Returns a database error if no URL is available or the pool cannot
    /// be built.
    #[cfg(feature = "database")]
    pub fn database_pool(&self) -> AtelierResult<atelier_database::PgPool> {
        match &self.database {
            Some(database) => {
                atelier_database::build_pool(&database.url, database.max_connections)
            }
            None => atelier_database::pool_from_env(default_max_connections()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atelier_error::AtelierErrorKind;

    fn parse(document: &str) -> AtelierConfig {
        Config::builder()
            .add_source(File::from_str(document, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn bundled_defaults_match_the_type_defaults() {
        let bundled = parse(include_str!("../../../atelier.toml"));

        assert_eq!(bundled, AtelierConfig::default());
        assert_eq!(bundled.lineage.default_max_depth, 25);
        assert_eq!(bundled.lineage.hard_max_depth, 50);
        assert!(bundled.database.is_none());
    }

    #[test]
    fn full_document_parses() {
        let config = parse(
            r#"
            [database]
            url = "postgres://localhost/atelier_test"

            [lineage]
            default_max_depth = 10
            hard_max_depth = 20
            "#,
        );

        let database = config.database.clone().expect("database section");
        assert_eq!(database.url, "postgres://localhost/atelier_test");
        assert_eq!(database.max_connections, 10);
        assert_eq!(config.lineage_limits().default_max_depth, 10);
        assert_eq!(config.lineage_limits().hard_max_depth, 20);
    }

    #[test]
    fn partial_lineage_section_keeps_other_defaults() {
        let config = parse("[lineage]\nhard_max_depth = 40\n");

        assert_eq!(config.lineage.default_max_depth, 25);
        assert_eq!(config.lineage.hard_max_depth, 40);
    }

    #[test]
    fn from_file_reads_a_toml_document() {
        let path = std::env::temp_dir().join(format!("atelier-config-{}.toml", std::process::id()));
        std::fs::write(
            &path,
            "[database]\nurl = \"postgres://localhost/atelier\"\nmax_connections = 4\n",
        )
        .unwrap();

        let config = AtelierConfig::from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        let database = config.database.expect("database section");
        assert_eq!(database.max_connections, 4);
        assert_eq!(config.lineage, LineageLimits::default());
    }

    #[test]
    fn missing_file_is_a_config_error() {
        let err = AtelierConfig::from_file("/nonexistent/atelier.toml").unwrap_err();

        match err.kind() {
            AtelierErrorKind::Config(e) => {
                assert!(e.message.contains("Failed to read configuration"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
