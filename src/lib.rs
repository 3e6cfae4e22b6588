/// This crate is a content-based recommender over a catalog of titled items,
/// using raw term-frequency vectors and cosine similarity.
pub mod analyzer;
pub mod config;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod store;
pub mod utils;
pub mod vectorizer;

/// Recommender
/// The top-level query struct of this crate.
/// It pairs a `Corpus` with the `VectorSpaceModel` built from it and answers
/// "which titles are most like this one".
///
/// Lookup is by exact title. Every corpus row is scored by cosine similarity,
/// the scores are sorted descending (stable, so ties keep corpus order), the
/// first ranked entry is dropped as the query itself and the next `top_n`
/// titles are returned.
///
/// # Thread Safety
/// Read-only after construction; share it behind an `Arc` to serve
/// concurrent queries.
pub use vectorizer::evaluate::scoring::Recommender;

/// Search Hits and Hit Entry structures
/// - `Hits`: holds scored rows and provides stable sorting by score
/// - `HitEntry`: a single (row, score) pair
/// - `Recommendation`: a title with its score
pub use vectorizer::evaluate::scoring::{HitEntry, Hits, Recommendation};

/// Vector Space Model
/// Vocabulary plus one L2-normalized term-frequency vector per corpus row.
///
/// Built by a pure function of the corpus. The vocabulary keeps the
/// `max_features` terms found in the most documents; values are raw counts
/// (no IDF) normalized to unit length.
///
/// `VectorSpaceModel<N, E>` has the following generic parameters:
/// - `N`: Vector parameter type (f32, f64)
/// - `E`: term weighting engine (e.g., DefaultTFEngine)
///
/// # Serialization
/// Supported. The tokenizer settings are stored with the model.
pub use vectorizer::{VectorMatrix, VectorSpaceModel};

/// Vocabulary
/// Frozen term -> column mapping, column 0 being the most widespread term.
pub use vectorizer::vocab::Vocabulary;

/// Corpus
/// Ordered, append-only collection of documents with unique titles.
/// Row positions are stable and shared with the vector matrix.
///
/// `Corpus::merge` adds documents whose titles are not yet stored and reports
/// what it did with a `MergeReport`.
pub use vectorizer::corpus::{Corpus, MergeReport};

/// Token Frequency structure
/// A struct for analyzing/managing token occurrence frequency within a document.
/// It manages:
/// - The count of occurrences of each token
/// - The total number of tokens in the document
///
/// Used as base data for TF (Term Frequency) calculation.
pub use vectorizer::token::TokenFrequency;

/// TF Calculation Engine Trait
/// Decides the raw weight of each vocabulary term in a document.
/// `DefaultTFEngine` uses the plain occurrence count.
pub use vectorizer::tf::{DefaultTFEngine, TFEngine};

/// Tokenizer used at vectorization time
pub use vectorizer::tokenizer::Tokenizer;

/// Documents and their construction
/// - `ItemRecord`: raw catalog row (title plus optional text fields)
/// - `NormalizedFields`: cleaned per-field lists
/// - `Document`: title plus bag of words
/// - `DocumentBuilder`: record -> document in a fixed field order
pub use analyzer::document::{Document, DocumentBuilder, ItemRecord, NormalizedFields};

/// Keyword Extractor
/// Degree/frequency phrase scoring (RAKE style) over free text with a
/// pluggable stopword set.
pub use analyzer::keyword::{EnglishStopwords, KeywordExtractor, KeywordScores, Stopwords};

/// Build pipeline and artifact storage
pub use pipeline::{build_and_store, build_pipeline, BuildSummary};
pub use store::ArtifactStore;

pub use config::{BuildOptions, VectorizerConfig};
pub use error::{RecommendError, Result};
