//! Run configuration: module selection, defaults, and validation.

pub mod defaults;
pub mod env;
pub mod gold_standard_config;
pub mod lissa_config;
pub mod module_config;

pub use gold_standard_config::GoldStandardConfig;
pub use lissa_config::{CacheBackend, ClassifierSelection, LissaConfig};
pub use module_config::ModuleConfiguration;
