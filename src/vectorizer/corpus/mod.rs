use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::analyzer::document::Document;

/// Ordered, append-only set of documents keyed by title.
///
/// Row position is assigned on insertion and never changes; it is the index
/// shared with the vector matrix. Titles are unique: a second document with
/// an already stored title is skipped, first occurrence wins.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<Document>", into = "Vec<Document>")]
pub struct Corpus {
    /// title -> bag of words
    rows: IndexMap<String, String>,
}

/// What a merge did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MergeReport {
    /// documents appended
    pub added: usize,
    /// incoming documents whose title was already present
    pub skipped: usize,
}

impl MergeReport {
    #[inline]
    pub fn is_noop(&self) -> bool {
        self.added == 0
    }
}

impl Corpus {
    pub fn new() -> Self {
        Self {
            rows: IndexMap::new(),
        }
    }

    /// Build from documents in order, keeping the first of any repeated title
    pub fn from_documents<I>(docs: I) -> Self
    where
        I: IntoIterator<Item = Document>,
    {
        let mut corpus = Self::new();
        corpus.extend_new(docs);
        corpus
    }

    /// Append documents whose titles are not yet present, keeping their relative order.
    /// Returns the number appended.
    pub fn extend_new<I>(&mut self, docs: I) -> usize
    where
        I: IntoIterator<Item = Document>,
    {
        let before = self.rows.len();
        for doc in docs {
            if !self.rows.contains_key(&doc.title) {
                self.rows.insert(doc.title, doc.bag_of_words);
            }
        }
        self.rows.len() - before
    }

    /// Merge `incoming` into `existing` by title set difference.
    ///
    /// - no existing corpus: the result is `incoming` in its given order
    /// - otherwise: incoming documents with unseen titles are appended, in order
    ///
    /// Re-merging the same `incoming` into the result is a no-op.
    pub fn merge(existing: Option<Corpus>, incoming: Vec<Document>) -> (Corpus, MergeReport) {
        let total = incoming.len();
        let mut corpus = existing.unwrap_or_default();
        let added = corpus.extend_new(incoming);
        let report = MergeReport {
            added,
            skipped: total - added,
        };
        tracing::debug!(
            "corpus merge: {} added, {} skipped, {} rows",
            report.added,
            report.skipped,
            corpus.len()
        );
        (corpus, report)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row of the document titled exactly `title` (case-sensitive)
    #[inline]
    pub fn position(&self, title: &str) -> Option<usize> {
        self.rows.get_index_of(title)
    }

    /// `(title, bag_of_words)` at `row`
    #[inline]
    pub fn get(&self, row: usize) -> Option<(&str, &str)> {
        self.rows
            .get_index(row)
            .map(|(t, b)| (t.as_str(), b.as_str()))
    }

    #[inline]
    pub fn title(&self, row: usize) -> Option<&str> {
        self.rows.get_index(row).map(|(t, _)| t.as_str())
    }

    /// Rows in order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.rows.iter().map(|(t, b)| (t.as_str(), b.as_str()))
    }

    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.rows.keys().map(|t| t.as_str())
    }

    pub fn bags(&self) -> impl Iterator<Item = &str> {
        self.rows.values().map(|b| b.as_str())
    }
}

// row order is part of a corpus' identity
impl PartialEq for Corpus {
    fn eq(&self, other: &Self) -> bool {
        self.rows.len() == other.rows.len() && self.rows.iter().eq(other.rows.iter())
    }
}

impl Eq for Corpus {}

impl From<Vec<Document>> for Corpus {
    fn from(docs: Vec<Document>) -> Self {
        Corpus::from_documents(docs)
    }
}

impl From<Corpus> for Vec<Document> {
    fn from(corpus: Corpus) -> Self {
        corpus
            .rows
            .into_iter()
            .map(|(title, bag_of_words)| Document { title, bag_of_words })
            .collect()
    }
}
