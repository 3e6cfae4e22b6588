use std::fmt::{self, Debug, Display};

use rayon::prelude::*;
use serde::Serialize;

use crate::config::DEFAULT_TOP_N;
use crate::error::{RecommendError, Result};
use crate::vectorizer::{corpus::Corpus, VectorSpaceModel};

/// One scored corpus row
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitEntry {
    pub row: usize,
    pub score: f64,
}

/// Structure to store similarity results
pub struct Hits {
    /// (row, score), row order until sorted
    pub list: Vec<HitEntry>,
}

impl Hits {
    pub fn new(list: Vec<HitEntry>) -> Self {
        Hits { list }
    }

    /// Sort by descending score.
    /// Stable: equal scores keep corpus row order.
    pub fn sort_by_score_desc(&mut self) -> &mut Self {
        self.list.retain(|h| !h.score.is_nan());
        self.list.sort_by(|a, b| b.score.total_cmp(&a.score));
        self
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }
}

impl Debug for Hits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            writeln!(f, "Hits [")?;
            for hit in &self.list {
                writeln!(f, "    #{}: {:.6}", hit.row, hit.score)?;
            }
            write!(f, "]")
        } else {
            f.debug_list()
                .entries(self.list.iter().map(|h| (h.row, h.score)))
                .finish()
        }
    }
}

/// A recommended title and its cosine similarity to the query
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub title: String,
    pub score: f64,
}

impl Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.4})", self.title, self.score)
    }
}

/// Read-only query context: a corpus and the model built from it.
///
/// Loaded once, never mutated, so it can be shared across threads and serve
/// concurrent queries without locking.
#[derive(Debug, Clone)]
pub struct Recommender {
    corpus: Corpus,
    model: VectorSpaceModel,
}

impl Recommender {
    /// Pair a corpus with its model; they must agree row for row
    pub fn new(corpus: Corpus, model: VectorSpaceModel) -> Result<Self> {
        model.check_aligned(&corpus)?;
        Ok(Self { corpus, model })
    }

    #[inline]
    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    #[inline]
    pub fn model(&self) -> &VectorSpaceModel {
        &self.model
    }

    /// Row of the first document titled exactly `title`
    pub fn lookup(&self, title: &str) -> Result<usize> {
        self.corpus
            .position(title)
            .ok_or_else(|| RecommendError::NotFound {
                title: title.to_string(),
            })
    }

    /// Cosine similarity of `row` against every row, itself included, in row order
    pub fn similarity(&self, row: usize) -> Hits {
        let matrix = self.model.matrix();
        let Some(query) = matrix.row(row) else {
            return Hits::new(Vec::new());
        };
        let list = matrix
            .rows()
            .par_iter()
            .enumerate()
            .map(|(i, other)| HitEntry {
                row: i,
                score: query.cosine_similarity(other),
            })
            .collect();
        Hits::new(list)
    }

    /// Every row ranked against `title`, query row included
    pub fn ranked(&self, title: &str) -> Result<Hits> {
        let row = self.lookup(title)?;
        let mut hits = self.similarity(row);
        hits.sort_by_score_desc();
        Ok(hits)
    }

    /// Top `top_n` titles with scores.
    ///
    /// Drops rank 0 by position, assuming it is the query itself. When an
    /// earlier row has the same normalized vector (any bag with proportional
    /// counts), that row ties at rank 0 and is the one dropped.
    pub fn recommend_scored(&self, title: &str, top_n: usize) -> Result<Vec<Recommendation>> {
        let hits = self.ranked(title)?;
        Ok(hits
            .list
            .iter()
            .skip(1)
            .take(top_n)
            .filter_map(|hit| {
                self.corpus.title(hit.row).map(|t| Recommendation {
                    title: t.to_string(),
                    score: hit.score,
                })
            })
            .collect())
    }

    /// Top `top_n` titles most similar to `title`
    pub fn try_recommend(&self, title: &str, top_n: usize) -> Result<Vec<String>> {
        Ok(self
            .recommend_scored(title, top_n)?
            .into_iter()
            .map(|r| r.title)
            .collect())
    }

    /// Like `try_recommend`, but an unknown title logs a warning and yields no titles
    pub fn recommend(&self, title: &str, top_n: usize) -> Vec<String> {
        match self.try_recommend(title, top_n) {
            Ok(titles) => titles,
            Err(e) => {
                tracing::warn!("{}", e);
                Vec::new()
            }
        }
    }

    /// `recommend` with the default result count
    pub fn recommend_default(&self, title: &str) -> Vec<String> {
        self.recommend(title, DEFAULT_TOP_N)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::document::Document;
    use crate::config::VectorizerConfig;

    const EPS: f64 = 1e-6;

    fn recommender(rows: &[(&str, &str)]) -> Recommender {
        let corpus = Corpus::from_documents(rows.iter().map(|(t, b)| Document::new(*t, *b)));
        let model = VectorSpaceModel::build(&corpus, &VectorizerConfig::default());
        Recommender::new(corpus, model).unwrap()
    }

    fn scenario() -> Recommender {
        recommender(&[
            ("A", "space adventure robot"),
            ("B", "space adventure robot"),
            ("C", "romantic comedy wedding"),
        ])
    }

    #[test]
    fn duplicate_bag_ranks_first_and_ties_keep_row_order() {
        let r = scenario();
        assert_eq!(r.model().vocabulary().len(), 6);
        assert_eq!(r.try_recommend("A", 2).unwrap(), vec!["B", "C"]);

        let scored = r.recommend_scored("A", 2).unwrap();
        assert!((scored[0].score - 1.0).abs() < EPS);
        assert_eq!(scored[1].score, 0.0);
    }

    #[test]
    fn query_ranks_first_against_itself() {
        let r = recommender(&[
            ("Alien", "alien horror space crew"),
            ("Aliens", "alien action space marines"),
            ("Heat", "crime heist los angeles"),
        ]);
        for title in ["Alien", "Aliens", "Heat"] {
            let hits = r.ranked(title).unwrap();
            let row = r.lookup(title).unwrap();
            assert_eq!(hits.list[0].row, row);
            assert!((hits.list[0].score - 1.0).abs() < EPS);
        }
        assert_eq!(r.try_recommend("Alien", 1).unwrap(), vec!["Aliens"]);
    }

    #[test]
    fn unknown_title_is_not_found() {
        let r = scenario();
        assert!(matches!(
            r.try_recommend("Nonexistent Title", 5),
            Err(RecommendError::NotFound { .. })
        ));
        assert!(r.recommend("Nonexistent Title", 5).is_empty());
        assert!(r.recommend("a", 5).is_empty());
    }

    #[test]
    fn result_length_is_bounded() {
        let r = scenario();
        for n in 0..5 {
            let got = r.try_recommend("C", n).unwrap();
            assert!(got.len() <= n.min(r.corpus().len() - 1));
        }
        assert_eq!(r.recommend_default("C").len(), 2);
    }

    #[test]
    fn single_document_corpus_has_no_recommendations() {
        let r = recommender(&[("Solo", "lonely")]);
        assert!(r.try_recommend("Solo", 10).unwrap().is_empty());
    }

    #[test]
    fn zero_vector_query_scores_zero_everywhere() {
        let corpus = Corpus::from_documents(vec![
            Document::new("A", "alpha beta"),
            Document::new("B", "alpha beta"),
            Document::new("Z", "zeta"),
        ]);
        let config = VectorizerConfig::default().with_max_features(2);
        let model = VectorSpaceModel::build(&corpus, &config);
        let r = Recommender::new(corpus, model).unwrap();
        let hits = r.similarity(2);
        assert!(hits.list.iter().all(|h| h.score == 0.0));
        // all tied: stable ranking keeps row order, rank 0 (row A) is dropped
        assert_eq!(r.try_recommend("Z", 5).unwrap(), vec!["B", "Z"]);
    }

    #[test]
    fn earlier_row_with_same_direction_takes_rank_zero() {
        // "a a b b" and "a b" differ as bags but normalize to the same vector
        let r = recommender(&[("V", "a a b b"), ("Q", "a b"), ("C", "c")]);
        let hits = r.ranked("Q").unwrap();
        assert_eq!(hits.list[0].row, 0);
        assert_eq!(hits.list[0].score, hits.list[1].score);
        // rank 0 is dropped by position, so the query lists itself
        assert_eq!(r.try_recommend("Q", 5).unwrap(), vec!["Q", "C"]);
        assert_eq!(r.try_recommend("V", 5).unwrap(), vec!["Q", "C"]);
    }

    #[test]
    fn misaligned_pair_is_rejected() {
        let corpus = Corpus::from_documents(vec![Document::new("A", "x")]);
        let model = VectorSpaceModel::build(&Corpus::new(), &VectorizerConfig::default());
        assert!(matches!(
            Recommender::new(corpus, model),
            Err(RecommendError::Misaligned { .. })
        ));
    }

    #[test]
    fn hits_sort_is_stable() {
        let mut hits = Hits::new(vec![
            HitEntry { row: 0, score: 0.5 },
            HitEntry { row: 1, score: 0.9 },
            HitEntry { row: 2, score: 0.5 },
            HitEntry { row: 3, score: f64::NAN },
        ]);
        hits.sort_by_score_desc();
        let rows: Vec<usize> = hits.list.iter().map(|h| h.row).collect();
        assert_eq!(rows, vec![1, 0, 2]);
    }
}
