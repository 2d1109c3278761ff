//! Directory-backed resource discovery.
//!
//! Resources live under one root directory. A scope narrows discovery to a
//! subdirectory (`images/red`); the empty scope walks the whole root.
//! Resource names are always root-relative and `/`-separated.

use satchel_plugin::{ExtensionFilter, ResourceDiscoverer, ResourceEntry};
use std::io;
use std::path::{Component, Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Discovers resources below a directory on disk
#[derive(Debug, Clone)]
pub struct DirectoryDiscoverer {
    root: PathBuf,
}

impl DirectoryDiscoverer {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn scope_dir(&self, scope: &str) -> PathBuf {
        scope
            .split('/')
            .filter(|segment| !segment.is_empty() && *segment != ".")
            .fold(self.root.clone(), |dir, segment| dir.join(segment))
    }

    /// Map a resource name onto the root, rejecting names that escape it
    fn resolve(&self, name: &str) -> io::Result<PathBuf> {
        let relative = Path::new(name.trim_start_matches('/'));
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes || name.trim().is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid resource name '{}'", name),
            ));
        }
        Ok(self.root.join(relative))
    }
}

/// Root-relative `/`-separated name for a path below `root`
fn resource_name(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let segments: Option<Vec<&str>> = relative.components().map(|c| c.as_os_str().to_str()).collect();
    let name = segments?.join("/");
    (!name.is_empty()).then_some(name)
}

impl ResourceDiscoverer for DirectoryDiscoverer {
    fn discover(
        &self,
        scope: &str,
        filter: &ExtensionFilter,
    ) -> Box<dyn Iterator<Item = ResourceEntry> + Send + '_> {
        let dir = self.scope_dir(scope);
        if !dir.is_dir() {
            debug!("Scope '{}' does not exist below {:?}", scope, self.root);
            return Box::new(std::iter::empty());
        }

        let filter = filter.clone();
        let root = self.root.clone();
        Box::new(
            WalkDir::new(dir)
                .sort_by_file_name()
                .into_iter()
                .filter_map(|e| e.ok())
                .filter(|e| e.file_type().is_file())
                .filter_map(move |e| {
                    let name = resource_name(&root, e.path())?;
                    filter
                        .matches(&name)
                        .then(|| ResourceEntry::new(name, e.into_path()))
                }),
        )
    }

    fn read(&self, name: &str) -> io::Result<Vec<u8>> {
        std::fs::read(self.resolve(name)?)
    }

    fn exists(&self, name: &str) -> bool {
        self.resolve(name).map(|p| p.is_file()).unwrap_or(false)
    }

    fn name(&self) -> &str {
        "Directory Discoverer"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(root: &Path, name: &str) {
        let path = root.join(name);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"x").unwrap();
    }

    #[test]
    fn test_discover_whole_root_and_scope() {
        let temp = tempfile::tempdir().unwrap();
        touch(temp.path(), "images/red/a.png");
        touch(temp.path(), "images/green/b.png");
        touch(temp.path(), "fonts/c.ttf");

        let discoverer = DirectoryDiscoverer::new(temp.path());
        let filter = ExtensionFilter::new([".png"]);

        let all: Vec<_> = discoverer.discover("", &filter).map(|e| e.name).collect();
        assert_eq!(all, vec!["images/green/b.png", "images/red/a.png"]);

        let red: Vec<_> = discoverer
            .discover("images/red", &filter)
            .map(|e| e.name)
            .collect();
        assert_eq!(red, vec!["images/red/a.png"]);
    }

    #[test]
    fn test_discover_missing_scope_is_empty() {
        let temp = tempfile::tempdir().unwrap();
        let discoverer = DirectoryDiscoverer::new(temp.path());
        let filter = ExtensionFilter::new([".png"]);
        assert_eq!(discoverer.discover("nope", &filter).count(), 0);
    }

    #[test]
    fn test_extension_case_is_not_folded() {
        let temp = tempfile::tempdir().unwrap();
        touch(temp.path(), "upper/A.PNG");
        touch(temp.path(), "upper/b.png");

        let discoverer = DirectoryDiscoverer::new(temp.path());
        let lower = ExtensionFilter::new([".png"]);
        assert_eq!(discoverer.discover("upper", &lower).count(), 1);

        let both = ExtensionFilter::new([".png", ".PNG"]);
        assert_eq!(discoverer.discover("upper", &both).count(), 2);
    }

    #[test]
    fn test_read_rejects_escaping_names() {
        let temp = tempfile::tempdir().unwrap();
        touch(temp.path(), "config.properties");
        let discoverer = DirectoryDiscoverer::new(temp.path());

        assert!(discoverer.read("config.properties").is_ok());
        assert!(discoverer.exists("/config.properties"));
        let err = discoverer.read("../etc/passwd").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        let err = discoverer.read("missing.properties").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
