//! Shared annotation view cache

pub mod metadata_cache;

pub use metadata_cache::MetadataCache;
