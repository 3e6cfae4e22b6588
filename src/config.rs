//! Defaults and tunables for the build and query paths.
//!
//! Compile-time constants live here; runtime overrides come from CLI flags
//! and environment variables in the binaries.

use serde::{Deserialize, Serialize};

/// Upper bound on vocabulary size (columns of the vector matrix).
pub const DEFAULT_MAX_FEATURES: usize = 10_000;

/// Number of recommendations returned when the caller does not say.
pub const DEFAULT_TOP_N: usize = 50;

/// Directory holding the corpus and model artifacts.
pub const DEFAULT_DATA_DIR: &str = "./data";

/// Corpus artifact file name inside the data directory.
pub const CORPUS_FILE: &str = "corpus.cbor";

/// Model artifact file name inside the data directory.
pub const MODEL_FILE: &str = "model.cbor";

/// Shortest token (in chars) kept by the vectorization tokenizer.
pub const DEFAULT_MIN_TOKEN_LEN: usize = 1;

/// Vectorizer settings, frozen into the model at build time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VectorizerConfig {
    /// keep at most this many terms, ranked by document frequency
    pub max_features: usize,
    /// fold tokens to lowercase before counting
    pub lowercase: bool,
    /// drop tokens shorter than this
    pub min_token_len: usize,
}

impl Default for VectorizerConfig {
    fn default() -> Self {
        Self {
            max_features: DEFAULT_MAX_FEATURES,
            lowercase: true,
            min_token_len: DEFAULT_MIN_TOKEN_LEN,
        }
    }
}

impl VectorizerConfig {
    pub fn with_max_features(mut self, max_features: usize) -> Self {
        self.max_features = max_features;
        self
    }
}

/// Options for turning item records into documents
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildOptions {
    /// append extracted plot keywords after the plot fragment
    pub include_keywords: bool,
}
