// Application state module
// Immutable process-wide state shared by every request handler.

use regex::Regex;
use std::path::{Path, PathBuf};

use super::types::Config;

/// Application state
///
/// The configuration plus values derived from it once at startup, so no
/// request pays for re-parsing. Shared as `Arc<AppState>`; nothing in here
/// is mutated after construction.
pub struct AppState {
    pub config: Config,
    /// Compiled compressible-extension pattern
    pub zip_match: Regex,
}

impl AppState {
    /// Compile derived state from the loaded configuration.
    ///
    /// An invalid `zip_match` pattern is a startup failure, not a
    /// per-request one.
    pub fn new(config: Config) -> Result<Self, regex::Error> {
        let zip_match = Regex::new(&config.compress.zip_match)?;
        Ok(Self { config, zip_match })
    }

    /// Path of the root index page, served for directories and SPA routes.
    pub fn index_path(&self) -> PathBuf {
        Path::new(&self.config.server.root).join(&self.config.server.index)
    }
}
