use crate::config::ConfigStore;
use crate::font::FontCache;
use crate::locale::{Locale, LocaleBundleIndex};
use crate::raster::ImageCache;
use crate::resource::DirectoryDiscoverer;
use crate::settings::Settings;
use satchel_plugin::ResourceDiscoverer;
use std::sync::Arc;

/// Every cache of one application, reading from the same resources
pub struct ResourceContext {
    pub config: ConfigStore,
    pub fonts: FontCache,
    pub images: ImageCache,
    pub texts: LocaleBundleIndex,
}

impl ResourceContext {
    pub fn new(discoverer: Arc<dyn ResourceDiscoverer>, default_locale: Locale) -> Self {
        Self {
            config: ConfigStore::new(discoverer.clone()),
            fonts: FontCache::new(discoverer.clone()),
            images: ImageCache::new(discoverer.clone()),
            texts: LocaleBundleIndex::new(discoverer, default_locale),
        }
    }

    /// Context over `settings.resource_root` with the configured extensions
    pub fn from_settings(settings: &Settings) -> Self {
        let discoverer: Arc<dyn ResourceDiscoverer> =
            Arc::new(DirectoryDiscoverer::new(settings.resource_root.clone()));
        Self {
            config: ConfigStore::new(discoverer.clone()),
            fonts: FontCache::new(discoverer.clone()).with_default_filter(settings.font_filter()),
            images: ImageCache::new(discoverer.clone())
                .with_default_filter(settings.image_filter()),
            texts: LocaleBundleIndex::new(discoverer, settings.resolved_locale()),
        }
    }

    /// Empty every cache
    pub fn clear_all(&self) {
        self.config.clear();
        self.fonts.clear();
        self.images.clear();
        self.texts.clear();
    }
}
