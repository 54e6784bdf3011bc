// Configuration module entry point
// Layers defaults, config file, environment variables and CLI overrides.

mod cli;
mod state;
mod types;

use std::net::SocketAddr;

// Re-export public types
pub use cli::Cli;
pub use state::AppState;
pub use types::{CacheConfig, CompressConfig, Config, LoggingConfig, ServerConfig};

/// Default compressible-extension pattern
const DEFAULT_ZIP_MATCH: &str = "^(css|js|html|json|txt)$";

impl Config {
    /// Load configuration with CLI overrides applied on top.
    ///
    /// Precedence, lowest to highest: built-in defaults, the config file
    /// (TOML, optional), `STATICD_*` environment variables, CLI flags.
    pub fn load(cli: &Cli) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(&cli.config).required(false))
            .add_source(config::Environment::with_prefix("STATICD"))
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("server.root", "./static")?
            .set_default("server.index", "index.html")?
            .set_default("cache.cache_control", true)?
            .set_default("cache.expires", true)?
            .set_default("cache.etag", true)?
            .set_default("cache.last_modified", true)?
            .set_default("cache.max_age", 3600)?
            .set_default("compress.zip_match", DEFAULT_ZIP_MATCH)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_override_option("server.port", cli.port.map(i64::from))?
            .set_override_option("server.root", cli.root.clone())?
            .set_override_option("server.index", cli.index.clone())?
            .set_override_option("cache.cache_control", cli.cachecontrol)?
            .set_override_option("cache.expires", cli.expires)?
            .set_override_option("cache.etag", cli.etag)?
            .set_override_option("cache.last_modified", cli.lastmodified)?
            .set_override_option("cache.max_age", cli.maxage.map(i64::from))?
            .build()?;

        settings.try_deserialize()
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

/// Hand-built configuration for unit tests.
#[cfg(test)]
pub(crate) fn test_config(root: &str) -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8080,
            root: root.to_string(),
            index: "index.html".to_string(),
            workers: None,
        },
        cache: CacheConfig {
            cache_control: true,
            expires: true,
            etag: true,
            last_modified: true,
            max_age: 3600,
        },
        compress: CompressConfig {
            zip_match: DEFAULT_ZIP_MATCH.to_string(),
        },
        logging: LoggingConfig {
            level: "info".to_string(),
            access_log: false,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_file() {
        let cli = Cli {
            config: "does-not-exist".to_string(),
            ..Cli::default()
        };
        let config = Config::load(&cli).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.index, "index.html");
        assert!(config.cache.etag);
        assert!(config.cache.cache_control);
        assert_eq!(config.cache.max_age, 3600);
        assert_eq!(config.compress.zip_match, DEFAULT_ZIP_MATCH);
    }

    #[test]
    fn test_cli_overrides_defaults() {
        let cli = Cli {
            port: Some(9999),
            root: Some("/srv/files".to_string()),
            etag: Some(false),
            maxage: Some(60),
            config: "does-not-exist".to_string(),
            ..Cli::default()
        };
        let config = Config::load(&cli).unwrap();
        assert_eq!(config.server.port, 9999);
        assert_eq!(config.server.root, "/srv/files");
        assert!(!config.cache.etag);
        assert!(config.cache.last_modified);
        assert_eq!(config.cache.max_age, 60);
    }

    #[test]
    fn test_socket_addr() {
        let config = test_config("/tmp");
        assert_eq!(config.socket_addr().unwrap().port(), 8080);
    }
}
