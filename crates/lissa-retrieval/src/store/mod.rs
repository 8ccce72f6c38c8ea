pub mod element_store;
pub mod source;
pub mod target;

pub use element_store::ElementStore;
pub use source::SourceElementStore;
pub use target::TargetElementStore;

/// Module name a source store is expected to be configured with.
pub const SOURCE_STORE_MODULE: &str = "custom";
