use clap::ValueEnum;
use nobarrel_core::Binding;
use serde::Serialize;

/// What to do with an import when only some of its bindings can be
/// relocated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum PartialPolicy {
    /// Keep the unresolved bindings in the original import and move the rest
    #[default]
    Split,
    /// Leave the whole import untouched
    Keep,
}

/// A new import declaration produced by a rewrite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Addition {
    /// Index of the first original import that contributed a binding; the
    /// new declaration is emitted in its place.
    pub anchor: usize,
    pub specifier: String,
    pub type_only: bool,
    pub bindings: Vec<Binding>,
}

/// Edits planned for one consuming module, indexed by position in
/// `Module::imports`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RewritePlan {
    /// Imports whose bindings were all relocated.
    pub removals: Vec<usize>,
    /// Imports rewritten to keep only the bindings that could not be traced.
    pub retained: Vec<(usize, Vec<Binding>)>,
    pub additions: Vec<Addition>,
}

impl RewritePlan {
    pub fn is_empty(&self) -> bool {
        self.additions.is_empty()
    }

    pub fn relocated(&self) -> usize {
        self.additions.iter().map(|a| a.bindings.len()).sum()
    }

    pub(crate) fn touches(&self, index: usize) -> bool {
        self.removals.contains(&index) || self.retained.iter().any(|(i, _)| *i == index)
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ReplaceResult {
    pub files_scanned: usize,
    pub files_updated: usize,
    /// Root-relative, forward-slash paths of rewritten files.
    pub updated_files: Vec<String>,
    /// Files that could not be read, parsed or written.
    pub skipped_files: Vec<String>,
    pub bindings_relocated: usize,
    pub dry_run: bool,
}
