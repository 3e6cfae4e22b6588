//! Field-level text normalization for item metadata.
//!
//! List fields come out as `Vec<String>` with possibly empty entries; the
//! document builder decides what to drop.

/// Remove every char that is not an ASCII letter, ASCII digit or whitespace.
/// Case and whitespace layout are preserved.
#[inline]
pub fn clean_text(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace())
        .collect()
}

/// Strip double quotes from a title. Nothing else is touched.
#[inline]
pub fn normalize_title(title: &str) -> String {
    title.replace('"', "")
}

/// Comma separated genres, lowercased and trimmed.
/// Punctuation inside a genre is kept.
pub fn normalize_genres(raw: Option<&str>) -> Vec<String> {
    match raw {
        Some(text) => text
            .split(',')
            .map(|genre| genre.to_lowercase().trim().to_string())
            .collect(),
        None => Vec::new(),
    }
}

/// Director names are split on a single space, not on commas.
/// Each piece is cleaned, lowercased and trimmed.
pub fn normalize_directors(raw: Option<&str>) -> Vec<String> {
    split_clean(raw, ' ')
}

/// Comma separated actor names, each cleaned, lowercased and trimmed.
pub fn normalize_actors(raw: Option<&str>) -> Vec<String> {
    split_clean(raw, ',')
}

/// Plot text with `/` removed before cleaning. Case is preserved.
pub fn normalize_plot(raw: Option<&str>) -> Option<String> {
    raw.map(|plot| clean_text(&plot.replace('/', "")))
}

fn split_clean(raw: Option<&str>, sep: char) -> Vec<String> {
    match raw {
        Some(text) => text
            .split(sep)
            .map(|piece| clean_text(piece).to_lowercase().trim().to_string())
            .collect(),
        None => Vec::new(),
    }
}
