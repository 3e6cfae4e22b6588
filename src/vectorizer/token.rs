use indexmap::IndexMap;

/// Token occurrence counts for one document.
///
/// Tokens keep first-seen order, which the vocabulary build relies on for
/// deterministic tie breaking.
///
/// # Examples
/// ```
/// use tf_recommender::TokenFrequency;
/// let mut freq = TokenFrequency::new();
/// freq.add_tokens(&["space", "robot", "space"]);
/// assert_eq!(freq.token_count("space"), 2);
/// assert_eq!(freq.iter().map(|(t, _)| t).collect::<Vec<_>>(), vec!["space", "robot"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenFrequency {
    token_count: IndexMap<String, u32>,
}

/// Adding tokens
impl TokenFrequency {
    pub fn new() -> Self {
        TokenFrequency {
            token_count: IndexMap::new(),
        }
    }

    /// Count one occurrence of `token`
    #[inline]
    pub fn add_token(&mut self, token: &str) -> &mut Self {
        match self.token_count.get_mut(token) {
            Some(count) => *count += 1,
            None => {
                self.token_count.insert(token.to_string(), 1);
            }
        }
        self
    }

    /// Count every token of the slice
    #[inline]
    pub fn add_tokens<T>(&mut self, tokens: &[T]) -> &mut Self
    where
        T: AsRef<str>,
    {
        for token in tokens {
            self.add_token(token.as_ref());
        }
        self
    }

    pub fn from_tokens<T>(tokens: &[T]) -> Self
    where
        T: AsRef<str>,
    {
        let mut freq = Self::new();
        freq.add_tokens(tokens);
        freq
    }
}

/// Reading counts
impl TokenFrequency {
    /// Occurrences of `token`, 0 when unseen
    #[inline]
    pub fn token_count(&self, token: &str) -> u32 {
        self.token_count.get(token).copied().unwrap_or(0)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.token_count.is_empty()
    }

    /// `(token, count)` in first-seen order
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.token_count.iter().map(|(t, &c)| (t.as_str(), c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_and_order() {
        let mut freq = TokenFrequency::new();
        freq.add_tokens(&["robot", "space", "robot", "love"]);
        assert_eq!(freq.token_count("robot"), 2);
        assert_eq!(freq.token_count("missing"), 0);
        let order: Vec<(&str, u32)> = freq.iter().collect();
        assert_eq!(order, vec![("robot", 2), ("space", 1), ("love", 1)]);
    }

    #[test]
    fn no_tokens_is_empty() {
        let freq = TokenFrequency::from_tokens::<&str>(&[]);
        assert!(freq.is_empty());
        assert_eq!(freq.iter().count(), 0);
    }
}
