//! Bounded, per-run cache of parsed modules.
//!
//! A rewrite run touches the consuming file plus every module on the
//! re-export chains it imports through. Barrels are typically shared by many
//! consumers, so they stay hot while leaf modules fall out of the cache.

use log::trace;
use lru::LruCache;
use std::{
    num::NonZeroUsize,
    path::{Path, PathBuf},
    rc::Rc,
};

use crate::{error::ModuleError, parser::parse_module, types::Module};

pub struct ModuleCache {
    entries: LruCache<PathBuf, Rc<Module>>,
    hits: usize,
    misses: usize,
}

impl ModuleCache {
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self { entries: LruCache::new(capacity), hits: 0, misses: 0 }
    }

    /// Returns the parsed module for `path`, parsing it on a miss.
    /// Failures are not cached; the file is re-read on the next request.
    pub fn load(&mut self, path: &Path) -> Result<Rc<Module>, ModuleError> {
        if let Some(module) = self.entries.get(path) {
            trace!("Cache hit for module: {}", path.display());
            self.hits += 1;
            return Ok(Rc::clone(module));
        }
        self.misses += 1;
        let module = Rc::new(parse_module(path)?);
        self.entries.put(path.to_path_buf(), Rc::clone(&module));
        Ok(module)
    }

    /// Drops `path` so the next [`load`](Self::load) sees the file on disk.
    pub fn invalidate(&mut self, path: &Path) {
        if self.entries.pop(path).is_some() {
            trace!("Invalidated cached module: {}", path.display());
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hits(&self) -> usize {
        self.hits
    }

    pub fn misses(&self) -> usize {
        self.misses
    }
}
