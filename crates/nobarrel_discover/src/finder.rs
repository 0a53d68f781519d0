use anyhow::Result;
use log::{debug, info, trace, warn};
use nobarrel_core::{
    CollectorConfig, ProjectConfig, collect_candidates, display_path, is_barrel, parse_module,
};
use rayon::prelude::*;

use crate::types::DiscoveryResult;

/// Lists every index-named file under the root that re-exports from another
/// module. Unreadable or unparsable files are skipped with a warning.
pub fn find_barrel_files(cfg: &ProjectConfig) -> Result<DiscoveryResult> {
    info!("Starting barrel file discovery");
    let root = cfg.resolve_root()?;
    let ignorer = cfg.ignorer(&root);

    let collector =
        CollectorConfig { root: root.clone(), extensions: cfg.extensions(), index_only: true };
    let candidates = collect_candidates(&collector, &ignorer)?;
    info!("Classifying {} index files in parallel", candidates.len());

    let verdicts: Vec<Option<bool>> = candidates
        .par_iter()
        .map(|path| match parse_module(path) {
            Ok(module) => {
                let barrel = is_barrel(&module);
                trace!("{} barrel: {}", path.display(), barrel);
                Some(barrel)
            }
            Err(e) => {
                warn!("Skipping {}", e);
                None
            }
        })
        .collect();

    let mut result = DiscoveryResult { files_scanned: candidates.len(), ..Default::default() };
    for (path, verdict) in candidates.iter().zip(verdicts) {
        match verdict {
            Some(true) => result.barrels.push(display_path(&root, path)),
            Some(false) => {}
            None => result.files_skipped += 1,
        }
    }
    result.barrels.sort();

    debug!("Skipped {} files", result.files_skipped);
    info!("Found {} barrel files", result.count());
    Ok(result)
}
