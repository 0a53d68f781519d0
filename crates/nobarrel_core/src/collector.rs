use anyhow::{Result, bail};
use ignore::WalkBuilder;
use log::{debug, trace, warn};
use std::path::PathBuf;

use crate::{classifier::is_index_candidate, ignorer::Ignorer};

pub struct CollectorConfig {
    pub root: PathBuf,
    /// Extensions without the leading dot.
    pub extensions: Vec<String>,
    /// Keep only `*index.*` files (barrel discovery pre-filter).
    pub index_only: bool,
}

/// Lists candidate source files under the root, sorted, with ignored paths
/// already removed. Unreadable directories are logged and skipped.
pub fn collect_candidates(cfg: &CollectorConfig, ignorer: &Ignorer) -> Result<Vec<PathBuf>> {
    debug!("Collecting candidate files");
    let root = &cfg.root;
    if !root.is_dir() {
        bail!("Root path {} is not a directory", root.display());
    }
    debug!("Walking directory tree from root: {}", root.display());
    let walker = WalkBuilder::new(root)
        .hidden(true)
        .ignore(false)
        .git_ignore(false)
        .git_global(false)
        .git_exclude(false)
        .parents(false)
        .filter_entry(|entry| entry.file_name() != "node_modules")
        .build();

    let mut files: Vec<PathBuf> = Vec::new();
    for res in walker {
        let dent = match res {
            Ok(dent) => dent,
            Err(e) => {
                warn!("Skipping unreadable entry: {}", e);
                continue;
            }
        };
        let p = dent.path();
        if !p.is_file() {
            continue;
        }

        let Some(ext) = p.extension().and_then(|e| e.to_str()) else {
            continue;
        };
        if !cfg.extensions.iter().any(|e| e == ext) {
            continue;
        }
        if cfg.index_only && !is_index_candidate(p) {
            continue;
        }
        if ignorer.ignores(p) {
            trace!("Ignoring file: {}", p.display());
            continue;
        }

        trace!("Found candidate file: {}", p.display());
        files.push(p.to_path_buf());
    }
    files.sort();
    debug!("Collected {} candidate files", files.len());
    Ok(files)
}
