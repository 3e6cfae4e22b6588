//! Word-boundary tokenizer used at vectorization time.
//!
//! A token is a maximal run of alphanumeric chars; everything else separates.
//! Casing follows `VectorizerConfig::lowercase` so title tokens fold the same
//! way as the already-lowercased metadata fields.

use crate::config::VectorizerConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tokenizer {
    lowercase: bool,
    min_token_len: usize,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::from_config(&VectorizerConfig::default())
    }
}

impl Tokenizer {
    pub fn from_config(config: &VectorizerConfig) -> Self {
        Self {
            lowercase: config.lowercase,
            min_token_len: config.min_token_len.max(1),
        }
    }

    /// Split `text` into tokens in reading order.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let mut tokens = Vec::new();
        let mut start: Option<usize> = None;
        for (i, c) in text.char_indices() {
            if c.is_alphanumeric() {
                if start.is_none() {
                    start = Some(i);
                }
            } else if let Some(s) = start.take() {
                self.push(&mut tokens, &text[s..i]);
            }
        }
        if let Some(s) = start {
            self.push(&mut tokens, &text[s..]);
        }
        tokens
    }

    #[inline]
    fn push(&self, tokens: &mut Vec<String>, raw: &str) {
        if raw.chars().count() < self.min_token_len {
            return;
        }
        if self.lowercase {
            tokens.push(raw.to_lowercase());
        } else {
            tokens.push(raw.to_string());
        }
    }
}
