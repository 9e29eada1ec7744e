//! Model configuration stores.
//!
//! A store resolves a template name such as `tfidf_autofaq` to a
//! configuration document. The skill only sees the [`ConfigStore`] trait;
//! where the template comes from (compiled in, or a directory of JSON files)
//! is the store's business.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde_json::Value;

use crate::config::TFIDF_AUTOFAQ;
use crate::error::{AutofaqError, Result};

/// Environment variable naming an extra template directory.
pub const CONFIG_DIR_ENV: &str = "AUTOFAQ_CONFIG_DIR";

/// Resolves configuration templates by name.
pub trait ConfigStore: Send + Sync {
    /// Return a fresh copy of the named configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`AutofaqError::TemplateNotFound`] when the store has no such
    /// template, or a parse error when the template is not valid JSON.
    fn find(&self, name: &str) -> Result<Value>;
}

/// Templates compiled into the library.
#[derive(Debug, Clone)]
pub struct BundledConfigStore {
    templates: HashMap<&'static str, &'static str>,
}

impl BundledConfigStore {
    /// Create a store holding the bundled templates.
    pub fn new() -> Self {
        let mut templates = HashMap::new();
        templates.insert(
            TFIDF_AUTOFAQ,
            include_str!("../../configs/tfidf_autofaq.json"),
        );
        BundledConfigStore { templates }
    }

    /// Names of the bundled templates.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.templates.keys().copied().collect();
        names.sort_unstable();
        names
    }
}

impl Default for BundledConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for BundledConfigStore {
    fn find(&self, name: &str) -> Result<Value> {
        let source = self
            .templates
            .get(name)
            .ok_or_else(|| AutofaqError::template_not_found(name))?;
        Ok(serde_json::from_str(source)?)
    }
}

/// Templates stored as `<name>.json` files under a directory tree.
///
/// A name that is itself a path to an existing file is read directly.
#[derive(Debug, Clone)]
pub struct DirConfigStore {
    root: PathBuf,
}

impl DirConfigStore {
    /// Create a store rooted at the given directory.
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        DirConfigStore {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Root directory searched by this store.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn search(dir: &Path, file_name: &str) -> Result<Option<PathBuf>> {
        let candidate = dir.join(file_name);
        if candidate.is_file() {
            return Ok(Some(candidate));
        }

        let mut subdirs: Vec<PathBuf> = fs::read_dir(dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.is_dir())
            .collect();
        subdirs.sort();

        for subdir in subdirs {
            if let Some(found) = Self::search(&subdir, file_name)? {
                return Ok(Some(found));
            }
        }
        Ok(None)
    }
}

impl ConfigStore for DirConfigStore {
    fn find(&self, name: &str) -> Result<Value> {
        let direct = Path::new(name);
        let path = if direct.is_file() {
            Some(direct.to_path_buf())
        } else if self.root.is_dir() {
            let file_name = if name.ends_with(".json") {
                name.to_string()
            } else {
                format!("{name}.json")
            };
            Self::search(&self.root, &file_name)?
        } else {
            None
        };

        let path = path.ok_or_else(|| AutofaqError::template_not_found(name))?;
        debug!("Reading configuration template from {}", path.display());
        let content = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// Tries several stores in order; the first one that knows the name wins.
pub struct LayeredConfigStore {
    layers: Vec<Box<dyn ConfigStore>>,
}

impl LayeredConfigStore {
    /// Create an empty layered store.
    pub fn new() -> Self {
        LayeredConfigStore { layers: Vec::new() }
    }

    /// Add a layer with lower priority than the existing ones.
    pub fn with_layer(mut self, store: Box<dyn ConfigStore>) -> Self {
        self.layers.push(store);
        self
    }

    /// Number of layers.
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Whether no layer has been added.
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

impl Default for LayeredConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for LayeredConfigStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayeredConfigStore")
            .field("layers", &self.layers.len())
            .finish()
    }
}

impl ConfigStore for LayeredConfigStore {
    fn find(&self, name: &str) -> Result<Value> {
        for layer in &self.layers {
            match layer.find(name) {
                Err(AutofaqError::TemplateNotFound { .. }) => continue,
                other => return other,
            }
        }
        Err(AutofaqError::template_not_found(name))
    }
}

/// The store used when the caller does not supply one.
///
/// Templates in the directory named by `AUTOFAQ_CONFIG_DIR` (when set)
/// shadow the bundled ones.
pub fn default_store() -> LayeredConfigStore {
    let mut store = LayeredConfigStore::new();
    if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
        store = store.with_layer(Box::new(DirConfigStore::new(dir)));
    }
    store.with_layer(Box::new(BundledConfigStore::new()))
}
