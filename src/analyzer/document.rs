use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::analyzer::keyword::{KeywordExtractor, Stopwords};
use crate::config::BuildOptions;
use crate::error::RecommendError;
use crate::utils::normalizer::{
    normalize_actors, normalize_directors, normalize_genres, normalize_plot, normalize_title,
};

/// Raw input row for one catalog item.
///
/// Any field may be missing or hold a non-text value (number, array, ...);
/// parsing accepts it and normalization decides what survives. A numeric or
/// boolean title is used in its printed form; a record with no usable title
/// is skipped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemRecord {
    #[serde(default)]
    pub title: Option<Value>,
    #[serde(default)]
    pub genres: Option<Value>,
    #[serde(default)]
    pub director_names: Option<Value>,
    #[serde(default)]
    pub actor_names: Option<Value>,
    #[serde(default)]
    pub plot: Option<Value>,
}

impl ItemRecord {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: Some(Value::String(title.into())),
            ..Default::default()
        }
    }

    pub fn genres(mut self, genres: impl Into<String>) -> Self {
        self.genres = Some(Value::String(genres.into()));
        self
    }

    pub fn directors(mut self, directors: impl Into<String>) -> Self {
        self.director_names = Some(Value::String(directors.into()));
        self
    }

    pub fn actors(mut self, actors: impl Into<String>) -> Self {
        self.actor_names = Some(Value::String(actors.into()));
        self
    }

    pub fn plot(mut self, plot: impl Into<String>) -> Self {
        self.plot = Some(Value::String(plot.into()));
        self
    }
}

/// Text of a structured field, `None` when absent or not text.
fn text_field<'a>(field: &'static str, value: &'a Option<Value>) -> Option<&'a str> {
    match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.as_str()),
        Some(_) => {
            let err = RecommendError::MalformedField { field };
            tracing::warn!("{}, treating as absent", err);
            None
        }
    }
}

/// Title text of a record, `None` when it is absent or not a scalar.
fn title_field(value: &Option<Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        None | Some(Value::Null) => {
            tracing::warn!("record without a title, skipping");
            None
        }
        Some(_) => {
            let err = RecommendError::MalformedField { field: "title" };
            tracing::warn!("{}, skipping record", err);
            None
        }
    }
}

/// Per-item derived lists
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedFields {
    pub title: String,
    pub genres: Vec<String>,
    pub director_names: Vec<String>,
    pub actor_names: Vec<String>,
    pub plot: Option<String>,
    /// plot keywords, first-discovery order
    pub keywords: Vec<String>,
}

impl NormalizedFields {
    /// `None` when the record has no usable title
    pub fn from_record<S: Stopwords>(record: &ItemRecord, extractor: &KeywordExtractor<S>) -> Option<Self> {
        let title = title_field(&record.title)?;
        let plot = normalize_plot(text_field("plot", &record.plot));
        let keywords = plot
            .as_deref()
            .map(|p| extractor.keywords(p))
            .unwrap_or_default();
        Some(Self {
            title: normalize_title(&title),
            genres: normalize_genres(text_field("genres", &record.genres)),
            director_names: normalize_directors(text_field("director_names", &record.director_names)),
            actor_names: normalize_actors(text_field("actor_names", &record.actor_names)),
            plot,
            keywords,
        })
    }
}

/// One corpus row: unique title plus its bag of words
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Document {
    pub title: String,
    pub bag_of_words: String,
}

impl Document {
    pub fn new(title: impl Into<String>, bag_of_words: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            bag_of_words: bag_of_words.into(),
        }
    }
}

/// Assembles the bag of words from a fixed field order:
/// title, genres, director_names, actor_names, plot (then keywords when enabled).
#[derive(Debug, Clone)]
pub struct DocumentBuilder<S = crate::analyzer::keyword::EnglishStopwords>
where
    S: Stopwords,
{
    extractor: KeywordExtractor<S>,
    options: BuildOptions,
}

impl Default for DocumentBuilder {
    fn default() -> Self {
        Self::new(BuildOptions::default())
    }
}

impl DocumentBuilder {
    pub fn new(options: BuildOptions) -> Self {
        Self {
            extractor: KeywordExtractor::new(),
            options,
        }
    }
}

impl<S> DocumentBuilder<S>
where
    S: Stopwords,
{
    pub fn with_extractor(extractor: KeywordExtractor<S>, options: BuildOptions) -> Self {
        Self { extractor, options }
    }

    pub fn normalize(&self, record: &ItemRecord) -> Option<NormalizedFields> {
        NormalizedFields::from_record(record, &self.extractor)
    }

    /// Corpus row for `record`, `None` when it has no usable title
    pub fn build(&self, record: &ItemRecord) -> Option<Document> {
        let fields = self.normalize(record)?;
        let bag_of_words = self.join_fields(&fields);
        Some(Document {
            title: fields.title,
            bag_of_words,
        })
    }

    fn join_fields(&self, fields: &NormalizedFields) -> String {
        let mut items: Vec<String> = Vec::with_capacity(6);
        push_scalar(&mut items, &fields.title);
        push_list(&mut items, &fields.genres);
        push_list(&mut items, &fields.director_names);
        push_list(&mut items, &fields.actor_names);
        if let Some(plot) = &fields.plot {
            push_scalar(&mut items, plot);
        }
        if self.options.include_keywords {
            push_list(&mut items, &fields.keywords);
        }
        items.join(" ")
    }
}

fn push_scalar(items: &mut Vec<String>, value: &str) {
    if !value.trim().is_empty() {
        items.push(value.to_string());
    }
}

fn push_list(items: &mut Vec<String>, values: &[String]) {
    let joined = values
        .iter()
        .filter(|v| !v.is_empty())
        .map(String::as_str)
        .collect::<Vec<_>>();
    if !joined.is_empty() {
        items.push(joined.join(" "));
    }
}
