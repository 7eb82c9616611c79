use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum EprError {
    #[error("failed to load mandate table from {path}: {reason}")]
    MandateLoad { path: PathBuf, reason: String },

    #[error("invalid mandate table: {0}")]
    MandateInvalid(String),

    #[error("unknown mandate preset '{name}'. Available: {available}")]
    UnknownPreset { name: String, available: String },

    #[error("failed to read saved report: {0}")]
    ReportLoad(String),

    #[error("unknown category '{0}' (expected Cat-I, Cat-II, Cat-III or Cat-IV)")]
    UnknownCategory(String),

    #[error("unknown grouping dimension '{0}' (expected product, component, polymer, category or supplier)")]
    UnknownDimension(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
