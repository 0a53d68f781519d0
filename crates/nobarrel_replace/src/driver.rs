use anyhow::Result;
use log::{debug, info, warn};
use nobarrel_core::{
    CollectorConfig, ModuleCache, Resolver, collect_candidates, display_path, load_aliases,
};
use std::{fs, path::Path};

use crate::{
    config::ReplaceConfig,
    error::ReplaceError,
    planner::{PlanOptions, Planner},
    render::render,
    types::ReplaceResult,
};

enum FileOutcome {
    Unchanged,
    Updated { relocated: usize },
    Skipped,
}

/// Rewrites every import that goes through a barrel to import from the
/// declaring module instead. Files are processed one at a time and a file
/// that can not be read, parsed or written is skipped.
pub fn run_replace(cfg: &ReplaceConfig) -> Result<ReplaceResult> {
    info!("Starting barrel import replacement");
    let alias_config = cfg.alias_config_path.as_ref().ok_or(ReplaceError::MissingAliasConfig)?;

    let root = cfg.project.resolve_root()?;
    let aliases = load_aliases(&root.join(alias_config));
    let ignorer = cfg.project.ignorer(&root);

    let collector = CollectorConfig {
        root: root.clone(),
        extensions: cfg.project.extensions(),
        index_only: false,
    };
    let files = collect_candidates(&collector, &ignorer)?;
    info!("Found {} candidate files", files.len());

    let resolver = Resolver::new(root.clone(), aliases);
    let options = PlanOptions {
        partial: cfg.partial,
        prefer_alias: cfg.prefer_alias,
        index_only: cfg.index_only,
    };
    let planner = Planner::new(&resolver, cfg.max_hops, options);
    let mut cache = ModuleCache::new(cfg.cache_size);

    let mut result =
        ReplaceResult { files_scanned: files.len(), dry_run: cfg.dry_run, ..Default::default() };
    for file in &files {
        match process_file(file, &planner, &mut cache, cfg.dry_run) {
            FileOutcome::Unchanged => {}
            FileOutcome::Updated { relocated } => {
                result.files_updated += 1;
                result.bindings_relocated += relocated;
                result.updated_files.push(display_path(&root, file));
            }
            FileOutcome::Skipped => result.skipped_files.push(display_path(&root, file)),
        }
    }

    debug!(
        "Module cache: {} hits, {} misses; {} resolutions memoized",
        cache.hits(),
        cache.misses(),
        resolver.cached_resolutions()
    );
    info!(
        "{} files {}, {} skipped",
        result.files_updated,
        if cfg.dry_run { "would be updated" } else { "updated" },
        result.skipped_files.len()
    );
    Ok(result)
}

fn process_file(
    file: &Path,
    planner: &Planner,
    cache: &mut ModuleCache,
    dry_run: bool,
) -> FileOutcome {
    let module = match cache.load(file) {
        Ok(module) => module,
        Err(e) => {
            warn!("Skipping {}", e);
            return FileOutcome::Skipped;
        }
    };

    let plan = planner.plan(cache, &module);
    if plan.is_empty() {
        return FileOutcome::Unchanged;
    }
    let updated = render(&module, &plan);
    if updated == module.source {
        return FileOutcome::Unchanged;
    }

    if dry_run {
        debug!("Would update {}", file.display());
    } else {
        if let Err(e) = fs::write(file, &updated) {
            warn!("Skipping {}: failed to write: {}", file.display(), e);
            return FileOutcome::Skipped;
        }
        debug!("Updated {}", file.display());
        cache.invalidate(file);
    }
    FileOutcome::Updated { relocated: plan.relocated() }
}
