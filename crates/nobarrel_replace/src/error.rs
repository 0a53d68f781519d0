use thiserror::Error;

/// Misconfigurations that stop a rewrite before any file is touched.
#[derive(Debug, Error)]
pub enum ReplaceError {
    #[error("--alias-config-path is required for replace")]
    MissingAliasConfig,
}
