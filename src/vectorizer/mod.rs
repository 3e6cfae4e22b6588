pub mod corpus;
pub mod evaluate;
pub mod tf;
pub mod token;
pub mod tokenizer;
pub mod vocab;

use std::marker::PhantomData;

use serde::{Deserialize, Serialize};
use num::Float;
use rayon::prelude::*;

use crate::config::VectorizerConfig;
use crate::error::{RecommendError, Result};
use crate::utils::math::vector::SpVec;
use crate::vectorizer::{
    corpus::Corpus,
    tf::{DefaultTFEngine, TFEngine},
    token::TokenFrequency,
    tokenizer::Tokenizer,
    vocab::Vocabulary,
};

/// One L2-normalized vector per corpus row, same row order as the corpus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(
    serialize = "N: Serialize",
    deserialize = "N: Deserialize<'de>"
))]
pub struct VectorMatrix<N = f32>
where
    N: Float,
{
    /// vocabulary size every row is laid out against
    ncols: usize,
    rows: Vec<SpVec<N>>,
}

impl<N> VectorMatrix<N>
where
    N: Float,
{
    #[inline]
    pub fn row(&self, row: usize) -> Option<&SpVec<N>> {
        self.rows.get(row)
    }

    /// number of rows
    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[inline]
    pub fn ncols(&self) -> usize {
        self.ncols
    }

    pub fn rows(&self) -> &[SpVec<N>] {
        &self.rows
    }
}

/// Vocabulary plus vector matrix, produced together by one build.
///
/// A value object: built by a pure function of the corpus and never updated
/// in place. Any corpus change means a full rebuild.
///
/// `VectorSpaceModel<N, E>` has the following generic parameters:
/// - `N`: matrix value type (f32, f64)
/// - `E`: term weighting engine (raw term frequency by default)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(
    serialize = "N: Serialize",
    deserialize = "N: Deserialize<'de>"
))]
pub struct VectorSpaceModel<N = f32, E = DefaultTFEngine>
where
    N: Float,
    E: TFEngine<N>,
{
    config: VectorizerConfig,
    vocabulary: Vocabulary,
    matrix: VectorMatrix<N>,
    #[serde(skip)]
    _marker: PhantomData<E>,
}

impl<N, E> VectorSpaceModel<N, E>
where
    N: Float + Into<f64> + Send + Sync,
    E: TFEngine<N>,
{
    /// Build vocabulary and matrix from the whole corpus.
    ///
    /// 1. tokenize every bag of words
    /// 2. keep the `max_features` terms with the highest document frequency
    /// 3. count vocabulary terms per document
    /// 4. L2-normalize each row (zero rows stay zero)
    pub fn build(corpus: &Corpus, config: &VectorizerConfig) -> Self {
        let tokenizer = Tokenizer::from_config(config);
        let bags: Vec<&str> = corpus.bags().collect();

        let freqs: Vec<TokenFrequency> = bags
            .par_iter()
            .map(|bag| TokenFrequency::from_tokens(&tokenizer.tokenize(bag)))
            .collect();

        let vocabulary = Vocabulary::from_document_terms(
            freqs.iter().map(|f| f.iter().map(|(t, _)| t)),
            config.max_features,
        );

        let rows: Vec<SpVec<N>> = freqs
            .par_iter()
            .map(|freq| {
                let mut row = E::tf_vec(freq, &vocabulary);
                row.l2_normalize();
                row
            })
            .collect();

        tracing::info!(
            "built vector space: {} rows, {} terms (max {})",
            rows.len(),
            vocabulary.len(),
            config.max_features
        );

        Self {
            config: config.clone(),
            matrix: VectorMatrix {
                ncols: vocabulary.len(),
                rows,
            },
            vocabulary,
            _marker: PhantomData,
        }
    }
}

impl<N, E> VectorSpaceModel<N, E>
where
    N: Float,
    E: TFEngine<N>,
{
    #[inline]
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    #[inline]
    pub fn matrix(&self) -> &VectorMatrix<N> {
        &self.matrix
    }

    #[inline]
    pub fn config(&self) -> &VectorizerConfig {
        &self.config
    }

    /// rows in the matrix
    #[inline]
    pub fn rows(&self) -> usize {
        self.matrix.len()
    }

    /// Structural checks for a model read back from storage
    pub fn validate(&self) -> Result<()> {
        let ncols = self.vocabulary.len();
        if self.matrix.ncols != ncols || self.matrix.rows.iter().any(|r| r.len() != ncols) {
            return Err(RecommendError::InvalidModel(format!(
                "matrix width does not match vocabulary size {}",
                ncols
            )));
        }
        Ok(())
    }

    /// The model must have exactly one row per corpus row
    pub fn check_aligned(&self, corpus: &Corpus) -> Result<()> {
        if self.matrix.len() != corpus.len() {
            return Err(RecommendError::Misaligned {
                corpus_rows: corpus.len(),
                matrix_rows: self.matrix.len(),
            });
        }
        Ok(())
    }
}
