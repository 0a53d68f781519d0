use anyhow::{Context, Result, anyhow};
use clap::Args;
use log::{debug, trace};
use std::{
    env,
    path::{Path, PathBuf},
};

use crate::{constants::DEFAULT_EXTENSIONS, ignorer::Ignorer};

/// Options shared by every subcommand.
#[derive(Debug, Clone, Args)]
pub struct ProjectConfig {
    /// Root directory of the project (defaults to git root, then the current directory)
    #[arg(short = 'r', long)]
    pub root_path: Option<PathBuf>,

    /// Comma separated list of file extensions to process
    #[arg(short = 'e', long, default_value = ".ts,.js,.tsx,.jsx")]
    pub extensions: String,

    /// Comma separated list of paths to ignore, gitignore syntax
    #[arg(short = 'i', long, default_value = "")]
    pub ignore_paths: String,

    /// Gitignore file, relative to the root
    #[arg(short = 'g', long, default_value = ".gitignore")]
    pub gitignore_path: PathBuf,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            root_path: None,
            extensions: DEFAULT_EXTENSIONS
                .iter()
                .map(|e| format!(".{}", e))
                .collect::<Vec<_>>()
                .join(","),
            ignore_paths: String::new(),
            gitignore_path: PathBuf::from(".gitignore"),
        }
    }
}

impl ProjectConfig {
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root_path: Some(root.into()), ..Self::default() }
    }

    /// Canonical project root.
    pub fn resolve_root(&self) -> Result<PathBuf> {
        let root = match &self.root_path {
            Some(root) => root.clone(),
            None => match find_git_root() {
                Ok(root) => root,
                Err(_) => env::current_dir().context("Failed to read current directory")?,
            },
        };
        let root = root
            .canonicalize()
            .with_context(|| format!("Root path {} does not exist", root.display()))?;
        debug!("Using project root: {}", root.display());
        Ok(root)
    }

    /// Extensions without their leading dot.
    pub fn extensions(&self) -> Vec<String> {
        split_list(&self.extensions)
            .into_iter()
            .map(|e| e.trim_start_matches('.').to_string())
            .filter(|e| !e.is_empty())
            .collect()
    }

    pub fn ignore_paths(&self) -> Vec<String> {
        split_list(&self.ignore_paths)
    }

    pub fn ignorer(&self, root: &Path) -> Ignorer {
        Ignorer::new(root, &self.ignore_paths(), &self.gitignore_path)
    }
}

fn split_list(value: &str) -> Vec<String> {
    value.split(',').map(str::trim).filter(|s| !s.is_empty()).map(String::from).collect()
}

pub fn find_git_root() -> Result<PathBuf> {
    debug!("Searching for git root");
    let mut current_dir = env::current_dir()?;
    trace!("Starting search from: {:?}", current_dir);

    loop {
        if current_dir.join(".git").exists() {
            debug!("Found git root at: {:?}", current_dir);
            return Ok(current_dir);
        }
        match current_dir.parent() {
            Some(parent) => current_dir = parent.to_path_buf(),
            None => return Err(anyhow!("Could not find .git directory in any parent folder")),
        }
    }
}

/// Root-relative path with forward slashes, as printed in reports.
pub fn display_path(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_extensions_accept_optional_dot() {
        let cfg = ProjectConfig { extensions: ".ts, tsx,,.mjs".to_string(), ..Default::default() };
        assert_eq!(cfg.extensions(), vec!["ts", "tsx", "mjs"]);
    }

    #[test]
    fn test_default_extensions() {
        assert_eq!(ProjectConfig::default().extensions(), vec!["ts", "js", "tsx", "jsx"]);
    }

    #[test]
    fn test_ignore_paths_split() {
        let cfg = ProjectConfig { ignore_paths: "dist, **/*.test.ts".to_string(), ..Default::default() };
        assert_eq!(cfg.ignore_paths(), vec!["dist", "**/*.test.ts"]);
        assert!(ProjectConfig::default().ignore_paths().is_empty());
    }

    #[test]
    fn test_resolve_explicit_root() {
        let temp_dir = TempDir::new().unwrap();
        let cfg = ProjectConfig::with_root(temp_dir.path());
        assert_eq!(cfg.resolve_root().unwrap(), temp_dir.path().canonicalize().unwrap());
    }

    #[test]
    fn test_resolve_missing_root_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let cfg = ProjectConfig::with_root(temp_dir.path().join("missing"));
        assert!(cfg.resolve_root().is_err());
    }

    #[test]
    fn test_display_path() {
        let root = Path::new("/p");
        assert_eq!(display_path(root, Path::new("/p/src/components/index.ts")), "src/components/index.ts");
    }

    #[test]
    fn test_ignorer_uses_configured_gitignore() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::write(root.join(".customignore"), "dist\n").unwrap();
        let cfg = ProjectConfig {
            gitignore_path: PathBuf::from(".customignore"),
            ignore_paths: "legacy".to_string(),
            ..ProjectConfig::with_root(root)
        };
        let ignorer = cfg.ignorer(root);
        assert!(ignorer.ignores(&root.join("dist/a.ts")));
        assert!(ignorer.ignores(&root.join("legacy/a.ts")));
        assert!(!ignorer.ignores(&root.join("src/a.ts")));
    }
}
