//! In-memory caches for bundled application resources: configuration
//! values, fonts, images and localized text.
//!
//! Assets are discovered once, decoded into a keyed store, and served by
//! key. Derived variants (scaled images, restyled fonts, formatted text)
//! are computed on request and never replace the cached original.

pub mod bits;
pub mod codec;
pub mod config;
pub mod context;
pub mod error;
pub mod font;
pub mod locale;
pub mod logging;
pub mod raster;
pub mod resource;
pub mod settings;
pub mod store;

pub use config::ConfigStore;
pub use context::ResourceContext;
pub use error::{Result, SatchelError};
pub use font::{FontCache, FontFace, FontParams, FontStyle};
pub use locale::{BundleCategory, Locale, LocaleBundleIndex, TextLookup};
pub use raster::{ImageCache, ImageParams, RasterImage};
pub use resource::DirectoryDiscoverer;
pub use settings::Settings;
pub use store::{KeyPolicy, KeyedAssetStore, LoadReport, VariantResolver};
