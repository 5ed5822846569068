//! Command line interface definition

use clap::Parser;
use cyget_types::ColorChoice;
use std::path::PathBuf;

/// cyget - fetch packages and their dependencies from a Cygwin mirror
#[derive(Parser, Debug)]
#[command(name = "cyget")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Fetch and verify packages from a Cygwin mirror")]
#[command(long_about = None)]
pub struct Cli {
    /// Package names, or @Category to select a whole category
    #[arg(value_name = "PACKAGE")]
    pub packages: Vec<String>,

    /// Resolve only; print the artifact paths that would be downloaded
    #[arg(short = 'n', long)]
    pub no_download: bool,

    /// Catalog file to use; "*" downloads a fresh copy from the mirror
    #[arg(short = 's', long = "setupinfo", value_name = "FILE")]
    pub setup_info: Option<String>,

    /// XML response file listing packages to fetch
    #[arg(short = 'r', long = "response", value_name = "FILE")]
    pub response: Option<PathBuf>,

    /// Directory that receives the catalog and downloaded artifacts
    #[arg(short = 'd', short_alias = 't', long, value_name = "DIR")]
    pub target_dir: Option<PathBuf>,

    /// Mirror root URL
    #[arg(short = 'm', long, value_name = "URL")]
    pub mirror: Option<String>,

    /// Preferred version spec: test, current or prev
    #[arg(short = 'v', long, value_name = "SPEC")]
    pub version_spec: Option<String>,

    /// Number of concurrent downloads
    #[arg(short = 'j', long, value_name = "N")]
    pub parallel: Option<usize>,

    /// Enable debug logging to a file under the config directory
    #[arg(long)]
    pub debug: bool,

    /// Color output control
    #[arg(long, value_enum)]
    pub color: Option<ColorChoice>,

    /// Use alternate config file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}
