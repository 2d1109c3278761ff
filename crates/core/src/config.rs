//! Flat key/value configuration read from `.properties` resources.

use crate::codec::{StringTable, decode_text, parse_properties};
use crate::error::{Result, SatchelError};
use satchel_plugin::ResourceDiscoverer;
use std::collections::HashSet;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, warn};

#[derive(Default)]
struct ConfigState {
    values: StringTable,
    sources: Vec<String>,
}

pub struct ConfigStore {
    discoverer: Arc<dyn ResourceDiscoverer>,
    state: RwLock<ConfigState>,
}

impl ConfigStore {
    pub fn new(discoverer: Arc<dyn ResourceDiscoverer>) -> Self {
        Self {
            discoverer,
            state: RwLock::new(ConfigState::default()),
        }
    }

    /// Merge the entries of `resource` into the table; later loads win on
    /// duplicate keys. Returns the number of entries read.
    pub fn load(&self, resource: &str) -> Result<usize> {
        let bytes = self.discoverer.read(resource)?;
        let table = parse_properties(&decode_text(&bytes));
        let count = table.len();

        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.values.extend(table);
        state.sources.push(resource.to_string());

        debug!("Loaded {} config entries from '{}'", count, resource);
        Ok(count)
    }

    pub fn get_opt(&self, key: &str) -> Option<String> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values
            .get(key)
            .cloned()
    }

    pub fn get(&self, key: &str) -> Result<String> {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        match state.values.get(key) {
            Some(value) => Ok(value.clone()),
            None => {
                let resource = if state.sources.is_empty() {
                    "<no resource loaded>".to_string()
                } else {
                    state.sources.join(", ")
                };
                warn!("Config key '{}' not found in '{}'", key, resource);
                Err(SatchelError::UnknownKey {
                    key: key.to_string(),
                    resource,
                })
            }
        }
    }

    pub fn keys(&self) -> HashSet<String> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values
            .keys()
            .cloned()
            .collect()
    }

    /// Resources merged so far, in load order
    pub fn sources(&self) -> Vec<String> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .sources
            .clone()
    }

    pub fn clear(&self) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.values.clear();
        state.sources.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use satchel_plugin::{ExtensionFilter, ResourceEntry};
    use std::io;

    struct OneFile(&'static str, &'static str);

    impl ResourceDiscoverer for OneFile {
        fn discover(
            &self,
            _scope: &str,
            _filter: &ExtensionFilter,
        ) -> Box<dyn Iterator<Item = ResourceEntry> + Send + '_> {
            Box::new(std::iter::once(ResourceEntry::virtual_entry(self.0)))
        }

        fn read(&self, name: &str) -> io::Result<Vec<u8>> {
            if name == self.0 {
                Ok(self.1.as_bytes().to_vec())
            } else {
                Err(io::Error::new(io::ErrorKind::NotFound, name.to_string()))
            }
        }

        fn name(&self) -> &str {
            "One File"
        }
    }

    #[test]
    fn test_missing_key_names_resource() {
        let store = ConfigStore::new(Arc::new(OneFile("app.properties", "a=1\nb=2")));
        assert_eq!(store.load("app.properties").unwrap(), 2);
        assert_eq!(store.get("a").unwrap(), "1");

        let err = store.get("c").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Config key 'c' is not present in 'app.properties'"
        );
    }

    #[test]
    fn test_get_before_load() {
        let store = ConfigStore::new(Arc::new(OneFile("app.properties", "")));
        assert!(store.get_opt("a").is_none());
        assert!(store.get("a").unwrap_err().to_string().contains("<no resource loaded>"));
    }

    #[test]
    fn test_missing_resource_is_io_error() {
        let store = ConfigStore::new(Arc::new(OneFile("app.properties", "")));
        assert!(matches!(
            store.load("other.properties"),
            Err(SatchelError::Io(_))
        ));
    }
}
