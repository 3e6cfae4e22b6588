use num::Float;

use crate::utils::math::vector::SpVec;
use crate::vectorizer::{token::TokenFrequency, vocab::Vocabulary};

/// Turns a document's token counts into a weight vector over the vocabulary.
///
/// Normalization is applied by the model afterwards, so engines only decide
/// the raw weight per term.
pub trait TFEngine<N>
where
    N: Float,
{
    /// # Arguments
    /// * `freq` - token counts of one document
    /// * `vocab` - frozen vocabulary defining the columns
    fn tf_vec(freq: &TokenFrequency, vocab: &Vocabulary) -> SpVec<N>;
}

/// Raw term frequency: each column holds the token's count in the document.
/// Tokens outside the vocabulary are ignored. No IDF weighting.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTFEngine;

impl<N> TFEngine<N> for DefaultTFEngine
where
    N: Float + Default,
{
    fn tf_vec(freq: &TokenFrequency, vocab: &Vocabulary) -> SpVec<N> {
        let pairs = freq.iter().filter_map(|(token, count)| {
            let column = vocab.index_of(token)?;
            let weight = <N as num::NumCast>::from(count)?;
            Some((column as u32, weight))
        });
        SpVec::from_pairs(vocab.len(), pairs)
    }
}
