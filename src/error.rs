use std::path::PathBuf;

/// Errors surfaced by the build and query paths
#[derive(Debug, thiserror::Error)]
pub enum RecommendError {
    /// query title is not present in the corpus
    #[error("title not found in corpus: {title:?}")]
    NotFound { title: String },

    /// corpus or model artifact absent or unreadable
    #[error("missing artifact {path:?}: {source}")]
    MissingArtifact {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// structured field that is neither text nor absent
    #[error("malformed field `{field}`")]
    MalformedField { field: &'static str },

    /// corpus and model were not written as a pair
    #[error("corpus has {corpus_rows} rows but model was built from {matrix_rows}")]
    Misaligned { corpus_rows: usize, matrix_rows: usize },

    /// model artifact decoded but is structurally inconsistent
    #[error("invalid model artifact: {0}")]
    InvalidModel(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CBOR error: {0}")]
    Cbor(#[from] serde_cbor::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RecommendError>;
