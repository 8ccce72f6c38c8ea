/// LiSSA engine version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Separator between a parent identifier and a child index.
pub const ELEMENT_ID_SEPARATOR: &str = "$";

/// Separator between the kind and the platform in a classifier module name.
pub const MODULE_NAME_SEPARATOR: char = '_';

/// Separator used when composing cache file names from origin and parameters.
pub const CACHE_NAME_SEPARATOR: &str = "_";

/// Replacement for `:` in cache file names.
pub const CACHE_NAME_COLON_REPLACEMENT: &str = "__";

/// Suffix appended to a cache file while a flush is in progress.
pub const CACHE_TEMP_SUFFIX: &str = ".tmp.json";

/// Environment variable for per-subsystem log levels.
pub const LOG_ENV_VAR: &str = "LISSA_LOG";

/// Environment variable overriding the configured cache directory.
pub const CACHE_DIR_ENV_VAR: &str = "LISSA_CACHE_DIR";
