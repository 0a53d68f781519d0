use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
pub struct DiscoveryResult {
    /// Root-relative, forward-slash paths of every barrel file, sorted.
    pub barrels: Vec<String>,
    /// Index-named candidates that were read.
    pub files_scanned: usize,
    /// Candidates that could not be read or parsed.
    pub files_skipped: usize,
}

impl DiscoveryResult {
    pub fn count(&self) -> usize {
        self.barrels.len()
    }
}
