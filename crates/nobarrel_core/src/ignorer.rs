use ignore::gitignore::{Gitignore, GitignoreBuilder};
use log::{debug, trace, warn};
use std::path::{Path, PathBuf};

/// Gitignore-style predicate built from an ignore file plus manually
/// specified path fragments, evaluated relative to the project root.
pub struct Ignorer {
    root: PathBuf,
    matcher: Gitignore,
}

impl Ignorer {
    pub fn new(root: &Path, ignore_paths: &[String], gitignore_path: &Path) -> Self {
        let mut builder = GitignoreBuilder::new(root);

        let gitignore = root.join(gitignore_path);
        if gitignore.is_file() {
            debug!("Loading ignore rules from {}", gitignore.display());
            if let Some(err) = builder.add(&gitignore) {
                warn!("Error reading {}: {}", gitignore.display(), err);
            }
        } else {
            trace!("No ignore file at {}", gitignore.display());
        }

        for pattern in ignore_paths.iter().map(|p| p.trim()).filter(|p| !p.is_empty()) {
            trace!("Adding manual ignore pattern '{}'", pattern);
            if let Err(err) = builder.add_line(None, pattern) {
                warn!("Invalid ignore pattern '{}': {}", pattern, err);
            }
        }

        let matcher = builder.build().unwrap_or_else(|err| {
            warn!("Could not build ignore rules, nothing will be ignored: {}", err);
            Gitignore::empty()
        });
        debug!("Loaded {} ignore rules", matcher.num_ignores());

        Self { root: root.to_path_buf(), matcher }
    }

    pub fn ignores(&self, path: &Path) -> bool {
        let Ok(relative) = path.strip_prefix(&self.root) else {
            return false;
        };
        if relative.as_os_str().is_empty() {
            return false;
        }
        self.matcher.matched_path_or_any_parents(relative, path.is_dir()).is_ignore()
    }
}
