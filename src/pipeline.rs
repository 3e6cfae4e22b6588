//! Offline build: item records to documents, merged corpus, rebuilt model.

use std::fs;
use std::path::Path;

use rayon::prelude::*;
use serde::Serialize;

use crate::analyzer::document::{Document, DocumentBuilder, ItemRecord};
use crate::config::{BuildOptions, VectorizerConfig};
use crate::error::Result;
use crate::store::ArtifactStore;
use crate::vectorizer::{
    corpus::{Corpus, MergeReport},
    VectorSpaceModel,
};

/// Normalize and assemble every record, merge into `existing`, rebuild the model.
///
/// Documents keep input order; records without a usable title are dropped.
/// The model always covers the whole merged corpus, even when the merge
/// added nothing.
pub fn build_pipeline(
    records: &[ItemRecord],
    existing: Option<Corpus>,
    options: &BuildOptions,
    config: &VectorizerConfig,
) -> (Corpus, VectorSpaceModel, MergeReport) {
    let builder = DocumentBuilder::new(*options);
    let documents: Vec<Document> = records.par_iter().filter_map(|r| builder.build(r)).collect();
    let dropped = records.len() - documents.len();
    if dropped > 0 {
        tracing::warn!("{} records without a usable title dropped", dropped);
    }
    tracing::debug!("built {} documents", documents.len());

    let (corpus, report) = Corpus::merge(existing, documents);
    let model = VectorSpaceModel::build(&corpus, config);
    (corpus, model, report)
}

/// Summary of one build run, printed by the build CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BuildSummary {
    pub rows: usize,
    pub added: usize,
    pub vocabulary: usize,
}

/// Read records from a JSON array file
pub fn read_records(path: &Path) -> Result<Vec<ItemRecord>> {
    let text = fs::read_to_string(path)?;
    let records: Vec<ItemRecord> = serde_json::from_str(&text)?;
    tracing::info!("read {} records from {:?}", records.len(), path);
    Ok(records)
}

/// Run the pipeline against the stored corpus and persist the result
pub fn build_and_store(
    store: &ArtifactStore,
    records: &[ItemRecord],
    options: &BuildOptions,
    config: &VectorizerConfig,
) -> Result<BuildSummary> {
    let existing = store.load_corpus_opt()?;
    let (corpus, model, report) = build_pipeline(records, existing, options, config);
    store.save_pair(&corpus, &model, !report.is_noop())?;
    tracing::info!(
        "build done: {} rows ({} added, {} skipped)",
        corpus.len(),
        report.added,
        report.skipped
    );
    Ok(BuildSummary {
        rows: corpus.len(),
        added: report.added,
        vocabulary: model.vocabulary().len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records() -> Vec<ItemRecord> {
        vec![
            ItemRecord::new("Alien").genres("Horror, Sci-Fi").plot("A crew meets a creature in space."),
            ItemRecord::new("Aliens").genres("Action, Sci-Fi").plot("Marines fight creatures in space."),
            ItemRecord::new("Heat").genres("Crime").plot("A heist in Los Angeles."),
        ]
    }

    #[test]
    fn first_build_keeps_input_order() {
        let (corpus, model, report) =
            build_pipeline(&records(), None, &BuildOptions::default(), &VectorizerConfig::default());
        assert_eq!(corpus.titles().collect::<Vec<_>>(), vec!["Alien", "Aliens", "Heat"]);
        assert_eq!(report, MergeReport { added: 3, skipped: 0 });
        assert_eq!(model.rows(), 3);
        model.check_aligned(&corpus).unwrap();
    }

    #[test]
    fn duplicate_incoming_titles_keep_first() {
        let mut input = records();
        input.push(ItemRecord::new("Alien").plot("something else"));
        let (corpus, _, report) =
            build_pipeline(&input, None, &BuildOptions::default(), &VectorizerConfig::default());
        assert_eq!(corpus.len(), 3);
        assert_eq!(report.skipped, 1);
        assert!(corpus.get(0).unwrap().1.contains("creature"));
    }

    #[test]
    fn rerun_is_a_noop_merge() {
        let options = BuildOptions::default();
        let config = VectorizerConfig::default();
        let (first, first_model, _) = build_pipeline(&records(), None, &options, &config);
        let (second, second_model, report) =
            build_pipeline(&records(), Some(first.clone()), &options, &config);
        assert!(report.is_noop());
        assert_eq!(first, second);
        assert_eq!(first_model.matrix(), second_model.matrix());
    }

    #[test]
    fn new_titles_are_appended() {
        let options = BuildOptions::default();
        let config = VectorizerConfig::default();
        let (first, _, _) = build_pipeline(&records()[..2], None, &options, &config);
        let (merged, model, report) = build_pipeline(&records(), Some(first), &options, &config);
        assert_eq!(report, MergeReport { added: 1, skipped: 2 });
        assert_eq!(merged.title(2), Some("Heat"));
        assert_eq!(model.rows(), 3);
    }

    #[test]
    fn build_and_store_persists_both_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path());
        let summary = build_and_store(
            &store,
            &records(),
            &BuildOptions::default(),
            &VectorizerConfig::default(),
        )
        .unwrap();
        assert_eq!(summary.rows, 3);
        assert_eq!(summary.added, 3);
        assert!(summary.vocabulary > 0);

        let again = build_and_store(
            &store,
            &records(),
            &BuildOptions::default(),
            &VectorizerConfig::default(),
        )
        .unwrap();
        assert_eq!(again.added, 0);
        assert_eq!(again.rows, 3);
        assert_eq!(again.vocabulary, summary.vocabulary);
    }

    #[test]
    fn bad_titles_do_not_sink_the_batch() {
        let dir = tempfile::tempdir().unwrap();
        let items = dir.path().join("items.json");
        fs::write(
            &items,
            r#"[{"title":1917,"genres":"War"},{"genres":"Drama"},{"title":"Heat","genres":"Crime"}]"#,
        )
        .unwrap();

        let records = read_records(&items).unwrap();
        assert_eq!(records.len(), 3);

        let store = ArtifactStore::new(dir.path().join("data"));
        let summary = build_and_store(
            &store,
            &records,
            &BuildOptions::default(),
            &VectorizerConfig::default(),
        )
        .unwrap();
        assert_eq!(summary.rows, 2);
        assert_eq!(summary.added, 2);

        let corpus = store.load_corpus().unwrap();
        assert_eq!(corpus.titles().collect::<Vec<_>>(), vec!["1917", "Heat"]);
    }
}
