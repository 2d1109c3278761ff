//! Capability contracts shared by the satchel caches.
//!
//! Discovery and decoding are external to the caches: a cache only ever sees
//! a [`ResourceDiscoverer`] that names and reads resources, and an
//! [`AssetDecoder`] that turns bytes into a typed asset.

pub mod asset;

pub use asset::{
    AssetDecoder, BoxError, ExtensionFilter, FontProgram, GlyphMetrics, ResourceDiscoverer,
    ResourceEntry,
};
