use thiserror::Error;

/// Errors raised around the validation gate.
///
/// Validation findings are never errors; they live in
/// [`ValidationResult`](crate::ValidationResult). This type covers the
/// operations around the gate that can fail.
#[derive(Error, Debug)]
pub enum ManifestError {
    // ── Manifest errors ────────────────────────────────────────
    #[error("manifest rejected: {}", .errors.join("; "))]
    Invalid { errors: Vec<String> },

    #[error("template error: {0}")]
    Template(String),

    // ── Config errors ──────────────────────────────────────────
    #[error("config error: {0}")]
    Config(String),

    // ── Generic wrappers ───────────────────────────────────────
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ManifestError>;
