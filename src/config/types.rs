// Configuration types module
// Defines all configuration-related data structures

use serde::Deserialize;

/// Main configuration structure
///
/// Built once at startup from merged defaults, config file, environment
/// and CLI values; never mutated afterward.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub cache: CacheConfig,
    pub compress: CompressConfig,
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Static resource root directory
    pub root: String,
    /// Default page name served for directories and SPA routes
    pub index: String,
    pub workers: Option<usize>,
}

/// Cache header feature toggles
#[derive(Debug, Deserialize, Clone)]
pub struct CacheConfig {
    pub cache_control: bool,
    pub expires: bool,
    pub etag: bool,
    pub last_modified: bool,
    /// max-age seconds used by both Cache-Control and Expires
    pub max_age: u64,
}

/// Compression configuration
#[derive(Debug, Deserialize, Clone)]
pub struct CompressConfig {
    /// Regex matched against the file extension to select compressible files
    pub zip_match: String,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub access_log: bool,
}
