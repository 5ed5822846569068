//! Built-in defaults shared by the config layer and the CLI

/// Mirror used when neither the config file nor the environment names one
pub const DEFAULT_MIRROR: &str = "http://mirrors.163.com/cygwin";

/// Catalog file name, both on the mirror and inside the target directory
pub const CATALOG_FILE_NAME: &str = "setup.ini";

/// Directory that receives downloaded artifacts and the local catalog
pub const DEFAULT_TARGET_DIR: &str = "packages";

/// Version spec applied to requests that do not name one
pub const DEFAULT_VERSION_SPEC: &str = "test";

/// Number of concurrent download workers
pub const DEFAULT_PARALLEL_DOWNLOADS: usize = 5;
