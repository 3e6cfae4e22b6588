//! Degree-based keyword extraction (RAKE style) over plot text.
//!
//! Text is lowercased and split into candidate phrases wherever a stopword or
//! punctuation char occurs. Within each phrase every word co-occurs with every
//! word (itself included); a word's degree is the sum of its co-occurrence
//! counts and its frequency is how often it appears in phrases.
//!
//! Only the scored words are handed downstream, in first-discovery order.

use std::collections::HashSet;

use indexmap::IndexMap;

/// Supplies the stopword list used as a phrase boundary
pub trait Stopwords {
    fn is_stopword(&self, word: &str) -> bool;
}

impl Stopwords for HashSet<String> {
    #[inline]
    fn is_stopword(&self, word: &str) -> bool {
        self.contains(word)
    }
}

impl Stopwords for HashSet<&str> {
    #[inline]
    fn is_stopword(&self, word: &str) -> bool {
        self.contains(word)
    }
}

/// Built-in English stopword list
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishStopwords;

impl Stopwords for EnglishStopwords {
    #[inline]
    fn is_stopword(&self, word: &str) -> bool {
        ENGLISH_STOPWORDS.binary_search(&word).is_ok()
    }
}

/// Sorted, so lookups can binary search.
const ENGLISH_STOPWORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "ain", "all", "am", "an", "and", "any",
    "are", "aren", "as", "at", "be", "because", "been", "before", "being", "below", "between",
    "both", "but", "by", "can", "couldn", "d", "did", "didn", "do", "does", "doesn", "doing",
    "don", "down", "during", "each", "few", "for", "from", "further", "had", "hadn", "has",
    "hasn", "have", "haven", "having", "he", "her", "here", "hers", "herself", "him", "himself",
    "his", "how", "i", "if", "in", "into", "is", "isn", "it", "its", "itself", "just", "ll", "m",
    "ma", "me", "mightn", "more", "most", "mustn", "my", "myself", "needn", "no", "nor", "not",
    "now", "o", "of", "off", "on", "once", "only", "or", "other", "our", "ours", "ourselves",
    "out", "over", "own", "re", "s", "same", "shan", "she", "should", "shouldn", "so", "some",
    "such", "t", "than", "that", "the", "their", "theirs", "them", "themselves", "then", "there",
    "these", "they", "this", "those", "through", "to", "too", "under", "until", "up", "ve",
    "very", "was", "wasn", "we", "were", "weren", "what", "when", "where", "which", "while",
    "who", "whom", "why", "will", "with", "won", "wouldn", "y", "you", "your", "yours",
    "yourself", "yourselves",
];

/// Degree and frequency of one word across the candidate phrases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WordScore {
    pub degree: u32,
    pub frequency: u32,
}

impl WordScore {
    /// degree / frequency
    #[inline]
    pub fn ratio(&self) -> f64 {
        if self.frequency == 0 {
            return 0.0;
        }
        self.degree as f64 / self.frequency as f64
    }
}

/// Per-document word scores, in first-discovery order
#[derive(Debug, Clone, Default)]
pub struct KeywordScores {
    words: IndexMap<String, WordScore>,
}

impl KeywordScores {
    /// The scored words; numeric scores are dropped.
    pub fn keywords(&self) -> Vec<String> {
        self.words.keys().cloned().collect()
    }

    pub fn get(&self, word: &str) -> Option<&WordScore> {
        self.words.get(word)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &WordScore)> {
        self.words.iter().map(|(w, s)| (w.as_str(), s))
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Keyword extractor parameterized by its stopword capability
#[derive(Debug, Clone, Default)]
pub struct KeywordExtractor<S = EnglishStopwords>
where
    S: Stopwords,
{
    stopwords: S,
}

impl KeywordExtractor<EnglishStopwords> {
    pub fn new() -> Self {
        Self { stopwords: EnglishStopwords }
    }
}

impl<S> KeywordExtractor<S>
where
    S: Stopwords,
{
    pub fn with_stopwords(stopwords: S) -> Self {
        Self { stopwords }
    }

    /// Split text into candidate phrases at stopword and punctuation boundaries.
    /// Words are lowercased.
    pub fn candidate_phrases(&self, text: &str) -> Vec<Vec<String>> {
        let mut phrases = Vec::new();
        let mut current: Vec<String> = Vec::new();
        let mut word = String::new();

        let close_word = |word: &mut String, current: &mut Vec<String>, phrases: &mut Vec<Vec<String>>| {
            if word.is_empty() {
                return;
            }
            let lowered = word.to_lowercase();
            word.clear();
            if self.stopwords.is_stopword(&lowered) {
                if !current.is_empty() {
                    phrases.push(std::mem::take(current));
                }
            } else {
                current.push(lowered);
            }
        };

        for c in text.chars() {
            if c.is_alphanumeric() {
                word.push(c);
            } else {
                close_word(&mut word, &mut current, &mut phrases);
                // punctuation ends the phrase, whitespace only ends the word
                if !c.is_whitespace() && !current.is_empty() {
                    phrases.push(std::mem::take(&mut current));
                }
            }
        }
        close_word(&mut word, &mut current, &mut phrases);
        if !current.is_empty() {
            phrases.push(current);
        }
        phrases
    }

    /// Score every word of the candidate phrases.
    pub fn extract(&self, text: &str) -> KeywordScores {
        let mut words: IndexMap<String, WordScore> = IndexMap::new();
        for phrase in self.candidate_phrases(text) {
            // each word co-occurs with every word of its phrase, itself included
            let degree = phrase.len() as u32;
            for word in phrase {
                let score = words.entry(word).or_default();
                score.degree += degree;
                score.frequency += 1;
            }
        }
        KeywordScores { words }
    }

    /// Keyword list for a plot, in first-discovery order
    #[inline]
    pub fn keywords(&self, text: &str) -> Vec<String> {
        self.extract(text).keywords()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stopword_list_is_sorted() {
        assert!(ENGLISH_STOPWORDS.windows(2).all(|w| w[0] < w[1]));
        assert!(EnglishStopwords.is_stopword("the"));
        assert!(!EnglishStopwords.is_stopword("robot"));
    }

    #[test]
    fn phrases_split_on_stopwords() {
        let ex = KeywordExtractor::new();
        let phrases = ex.candidate_phrases("A Robot falls in love with the lonely Space Captain");
        assert_eq!(
            phrases,
            vec![
                vec!["robot".to_string(), "falls".to_string()],
                vec!["love".to_string()],
                vec!["lonely".to_string(), "space".to_string(), "captain".to_string()],
            ]
        );
    }

    #[test]
    fn punctuation_is_a_boundary() {
        let ex = KeywordExtractor::new();
        let phrases = ex.candidate_phrases("deep space, cold war");
        assert_eq!(phrases.len(), 2);
    }

    #[test]
    fn degree_and_frequency() {
        let ex = KeywordExtractor::new();
        let scores = ex.extract("robot uprising and robot love");
        // phrases: [robot uprising], [robot love]
        assert_eq!(scores.get("robot"), Some(&WordScore { degree: 4, frequency: 2 }));
        assert_eq!(scores.get("uprising"), Some(&WordScore { degree: 2, frequency: 1 }));
        assert_eq!(scores.get("love").map(|s| s.ratio()), Some(1.0));
        assert_eq!(scores.keywords(), vec!["robot", "uprising", "love"]);
    }

    #[test]
    fn custom_stopwords() {
        let stop: HashSet<&str> = ["space"].into_iter().collect();
        let ex = KeywordExtractor::with_stopwords(stop);
        assert_eq!(ex.keywords("the space robot"), vec!["the", "robot"]);
    }

    #[test]
    fn empty_text_has_no_keywords() {
        assert!(KeywordExtractor::new().extract("").is_empty());
        assert!(KeywordExtractor::new().extract("and the of").is_empty());
    }
}
