// Command line interface module
// CLI flags override config-file and environment values.

use clap::Parser;

/// Asynchronous HTTP static file server
#[derive(Parser, Debug, Default)]
#[command(name = "staticd", version, about)]
pub struct Cli {
    /// Port to listen on
    #[arg(long)]
    pub port: Option<u16>,

    /// Static resource root directory
    #[arg(long)]
    pub root: Option<String>,

    /// Default page name for directories and SPA routes
    #[arg(long)]
    pub index: Option<String>,

    /// Emit Cache-Control headers
    #[arg(long)]
    pub cachecontrol: Option<bool>,

    /// Emit Expires headers
    #[arg(long)]
    pub expires: Option<bool>,

    /// Emit ETag headers
    #[arg(long)]
    pub etag: Option<bool>,

    /// Emit Last-Modified headers
    #[arg(long)]
    pub lastmodified: Option<bool>,

    /// max-age seconds for Cache-Control and Expires
    #[arg(long)]
    pub maxage: Option<u32>,

    /// Configuration file name (without extension)
    #[arg(long, default_value = "staticd")]
    pub config: String,
}
