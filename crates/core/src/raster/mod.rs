//! Image cache.
//!
//! Images are keyed by `stem-extension` (`20x20_red-png`), so every format of
//! one base name is kept. Scaled variants are computed on request and never
//! replace the cached original.

use crate::codec::ImageDecoder;
use crate::error::{Result, SatchelError};
use crate::store::{KeyPolicy, KeyedAssetStore, LoadReport, VariantResolver};
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, ImageFormat, Rgba};
use satchel_plugin::{AssetDecoder, ExtensionFilter, ResourceDiscoverer, ResourceEntry};
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;
use tracing::warn;

/// Image suffixes recognized when no filter is given
pub const DEFAULT_IMAGE_EXTENSIONS: &[&str] = &[
    ".bmp", ".gif", ".ico", ".jpg", ".jpeg", ".png", ".tif", ".tiff", ".BMP", ".GIF", ".ICO",
    ".JPG", ".JPEG", ".PNG", ".TIF", ".TIFF",
];

/// Decoded raster image
#[derive(Debug, Clone, PartialEq)]
pub struct RasterImage {
    pixels: DynamicImage,
}

impl RasterImage {
    pub fn new(pixels: DynamicImage) -> Self {
        Self { pixels }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    /// RGBA value at `(x, y)`. Panics if out of bounds, like `GenericImageView::get_pixel`.
    pub fn pixel(&self, x: u32, y: u32) -> Rgba<u8> {
        self.pixels.get_pixel(x, y)
    }

    pub fn as_dynamic(&self) -> &DynamicImage {
        &self.pixels
    }

    pub fn into_dynamic(self) -> DynamicImage {
        self.pixels
    }

    /// Encode to `path`, format chosen from its extension
    pub fn save(&self, path: &Path) -> Result<()> {
        let format = ImageFormat::from_path(path).map_err(|e| {
            SatchelError::InvalidArgument(format!("{}: {}", path.display(), e))
        })?;
        self.pixels.save_with_format(path, format).map_err(|e| SatchelError::Encode {
            resource: path.display().to_string(),
            message: e.to_string(),
        })
    }
}

/// Target size for a scaled image.
///
/// Scaling happens only when both dimensions are positive and at least one
/// differs from the source; anything else returns the image unchanged.
/// A missing dimension counts as zero, so giving only one never scales.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ImageParams {
    /// Target width in pixels
    pub width: Option<i32>,
    /// Target height in pixels
    pub height: Option<i32>,
}

impl ImageParams {
    pub fn scale_to(width: i32, height: i32) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
        }
    }

    pub fn with_width(mut self, width: i32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn with_height(mut self, height: i32) -> Self {
        self.height = Some(height);
        self
    }

    /// The size to scale to from `(width, height)`, if any
    fn target(&self, (width, height): (u32, u32)) -> Option<(u32, u32)> {
        let new_width = self.width.unwrap_or(0);
        let new_height = self.height.unwrap_or(0);
        if new_width <= 0 || new_height <= 0 {
            return None;
        }
        let target = (new_width as u32, new_height as u32);
        (target != (width, height)).then_some(target)
    }
}

impl VariantResolver for RasterImage {
    type Params = ImageParams;

    fn resolve(&self, params: &ImageParams) -> Self {
        match params.target(self.dimensions()) {
            Some((width, height)) => Self::new(self.pixels.resize_exact(width, height, FilterType::Triangle)),
            None => self.clone(),
        }
    }
}

/// All images of an application, keyed by `stem-extension`
pub struct ImageCache {
    store: KeyedAssetStore<RasterImage>,
    discoverer: Arc<dyn ResourceDiscoverer>,
    decoder: Arc<dyn AssetDecoder<RasterImage>>,
    default_filter: ExtensionFilter,
}

impl ImageCache {
    pub fn new(discoverer: Arc<dyn ResourceDiscoverer>) -> Self {
        Self::with_decoder(discoverer, Arc::new(ImageDecoder))
    }

    pub fn with_decoder(
        discoverer: Arc<dyn ResourceDiscoverer>,
        decoder: Arc<dyn AssetDecoder<RasterImage>>,
    ) -> Self {
        Self {
            store: KeyedAssetStore::new("image", KeyPolicy::StemWithExtension),
            discoverer,
            decoder,
            default_filter: ExtensionFilter::new(DEFAULT_IMAGE_EXTENSIONS.iter().copied()),
        }
    }

    /// Replace the suffixes used by [`ImageCache::load_all_images`]
    pub fn with_default_filter(mut self, filter: ExtensionFilter) -> Self {
        self.default_filter = filter;
        self
    }

    pub fn default_filter(&self) -> &ExtensionFilter {
        &self.default_filter
    }

    /// Load every image under `scope` with one of the default suffixes
    pub fn load_all_images(&self, scope: &str) -> LoadReport {
        self.load_all_images_with(scope, &self.default_filter)
    }

    pub fn load_all_images_with(&self, scope: &str, filter: &ExtensionFilter) -> LoadReport {
        self.store
            .load_all(self.discoverer.as_ref(), self.decoder.as_ref(), scope, filter)
    }

    /// Decode the file at `path` and store it under `key`
    pub fn load_image_from_path(&self, key: &str, path: &Path) -> Result<()> {
        let name = path.display().to_string();
        let bytes = std::fs::read(path)?;
        let entry = ResourceEntry::new(name.clone(), path.to_path_buf());
        match self.decoder.decode(&entry, &bytes) {
            Ok(image) => {
                self.store.insert(key, image);
                Ok(())
            }
            Err(e) => {
                warn!("Failed to decode image {}: {}", name, e);
                Err(SatchelError::Decode {
                    resource: name,
                    message: e.to_string(),
                })
            }
        }
    }

    pub fn insert_image(&self, key: impl Into<String>, image: RasterImage) {
        self.store.insert(key, image);
    }

    /// The cached image, unscaled
    pub fn image(&self, key: &str) -> Option<Arc<RasterImage>> {
        self.store.get(key)
    }

    /// A copy of the cached image scaled per `params`
    pub fn scaled_image(&self, key: &str, params: &ImageParams) -> Option<RasterImage> {
        self.store.get_variant(key, params)
    }

    pub fn image_keys(&self) -> HashSet<String> {
        self.store.keys()
    }

    pub fn clear(&self) {
        self.store.clear();
    }

    pub fn store(&self) -> &KeyedAssetStore<RasterImage> {
        &self.store
    }
}
