use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

/// Frozen term -> column mapping.
///
/// Built once per model build from document frequencies and never updated
/// afterwards. Column order is rank order: column 0 holds the term found in
/// the most documents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Vocabulary {
    terms: IndexSet<String>,
}

impl Vocabulary {
    /// Keep the `max_features` terms with the highest document frequency.
    ///
    /// `docs` yields each document's distinct tokens; ties are broken by the
    /// order in which terms are first encountered while scanning.
    pub fn from_document_terms<'a, D, T>(docs: D, max_features: usize) -> Self
    where
        D: IntoIterator<Item = T>,
        T: IntoIterator<Item = &'a str>,
    {
        // term -> document frequency, first-encountered order
        let mut doc_freq: IndexMap<&'a str, u32> = IndexMap::new();
        for terms in docs {
            for term in terms {
                *doc_freq.entry(term).or_insert(0) += 1;
            }
        }

        let mut ranked: Vec<(&str, u32)> = doc_freq.into_iter().collect();
        // stable: equal frequencies keep encounter order
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(max_features);

        Self {
            terms: ranked.into_iter().map(|(t, _)| t.to_string()).collect(),
        }
    }

    /// Column of `term`
    #[inline]
    pub fn index_of(&self, term: &str) -> Option<usize> {
        self.terms.get_index_of(term)
    }

    #[inline]
    pub fn contains(&self, term: &str) -> bool {
        self.terms.contains(term)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(|t| t.as_str())
    }
}
