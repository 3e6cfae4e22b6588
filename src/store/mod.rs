//! Durable corpus and model artifacts.
//!
//! Both artifacts are CBOR files in one data directory. Writes go to a
//! temporary file that is renamed over the target, so a reader sees either
//! the old file or the new one.

use std::fs;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};

use crate::config::{CORPUS_FILE, DEFAULT_DATA_DIR, MODEL_FILE};
use crate::error::{RecommendError, Result};
use crate::vectorizer::{corpus::Corpus, evaluate::scoring::Recommender, VectorSpaceModel};

/// Data directory holding `corpus.cbor` and `model.cbor`
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    dir: PathBuf,
}

impl Default for ArtifactStore {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_DIR)
    }
}

impl ArtifactStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn corpus_path(&self) -> PathBuf {
        self.dir.join(CORPUS_FILE)
    }

    pub fn model_path(&self) -> PathBuf {
        self.dir.join(MODEL_FILE)
    }

    /// Stored corpus, or `None` when nothing has been built yet
    pub fn load_corpus_opt(&self) -> Result<Option<Corpus>> {
        let path = self.corpus_path();
        match read_cbor::<Corpus>(&path) {
            Ok(corpus) => {
                tracing::info!("loaded corpus {:?}: {} rows", path, corpus.len());
                Ok(Some(corpus))
            }
            Err(RecommendError::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
                tracing::info!("no corpus at {:?}, starting empty", path);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Stored corpus; absence is an error
    pub fn load_corpus(&self) -> Result<Corpus> {
        let path = self.corpus_path();
        let corpus: Corpus = read_artifact(&path)?;
        tracing::info!("loaded corpus {:?}: {} rows", path, corpus.len());
        Ok(corpus)
    }

    /// Stored model, structurally checked
    pub fn load_model(&self) -> Result<VectorSpaceModel> {
        let path = self.model_path();
        let model: VectorSpaceModel = read_artifact(&path)?;
        model.validate()?;
        tracing::info!(
            "loaded model {:?}: {} rows, {} terms",
            path,
            model.rows(),
            model.vocabulary().len()
        );
        Ok(model)
    }

    /// Load both artifacts as a query context
    pub fn load_recommender(&self) -> Result<Recommender> {
        let corpus = self.load_corpus()?;
        let model = self.load_model()?;
        Recommender::new(corpus, model)
    }

    pub fn save_corpus(&self, corpus: &Corpus) -> Result<()> {
        let bytes = write_cbor(&self.dir, &self.corpus_path(), corpus)?;
        tracing::info!("saved corpus: {} rows ({} bytes)", corpus.len(), bytes);
        Ok(())
    }

    pub fn save_model(&self, model: &VectorSpaceModel) -> Result<()> {
        let bytes = write_cbor(&self.dir, &self.model_path(), model)?;
        tracing::info!(
            "saved model: {} rows, {} terms ({} bytes)",
            model.rows(),
            model.vocabulary().len(),
            bytes
        );
        Ok(())
    }

    /// Write the pair, corpus first.
    /// The corpus is left untouched when `corpus_changed` is false.
    pub fn save_pair(&self, corpus: &Corpus, model: &VectorSpaceModel, corpus_changed: bool) -> Result<()> {
        if corpus_changed {
            self.save_corpus(corpus)?;
        } else {
            tracing::debug!("corpus unchanged, not rewritten");
        }
        self.save_model(model)
    }
}

fn read_cbor<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = fs::File::open(path)?;
    Ok(serde_cbor::from_reader(BufReader::new(file))?)
}

/// `read_cbor` with open failures reported as a missing artifact
fn read_artifact<T: DeserializeOwned>(path: &Path) -> Result<T> {
    match read_cbor(path) {
        Err(RecommendError::Io(source)) => Err(RecommendError::MissingArtifact {
            path: path.to_path_buf(),
            source,
        }),
        other => other,
    }
}

/// Serialize, write to `<path>.tmp`, rename over `path`. Returns bytes written.
fn write_cbor<T: Serialize>(dir: &Path, path: &Path, value: &T) -> Result<usize> {
    let bytes = serde_cbor::to_vec(value)?;
    fs::create_dir_all(dir)?;
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);
    if let Err(e) = fs::write(&tmp, &bytes).and_then(|_| fs::rename(&tmp, path)) {
        // the target keeps its previous contents; drop the partial temp file
        let _ = fs::remove_file(&tmp);
        return Err(e.into());
    }
    Ok(bytes.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::document::Document;
    use crate::config::VectorizerConfig;

    fn sample() -> (Corpus, VectorSpaceModel) {
        let corpus = Corpus::from_documents(vec![
            Document::new("A", "space adventure robot"),
            Document::new("B", "space adventure robot"),
            Document::new("C", "romantic comedy wedding"),
        ]);
        let model = VectorSpaceModel::build(&corpus, &VectorizerConfig::default());
        (corpus, model)
    }

    #[test]
    fn first_build_has_no_corpus() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path());
        assert!(store.load_corpus_opt().unwrap().is_none());
    }

    #[test]
    fn missing_artifacts_are_reported() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path().join("nowhere"));
        assert!(matches!(
            store.load_corpus(),
            Err(RecommendError::MissingArtifact { .. })
        ));
        assert!(matches!(
            store.load_model(),
            Err(RecommendError::MissingArtifact { .. })
        ));
        assert!(store.load_recommender().is_err());
    }

    #[test]
    fn pair_survives_a_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path().join("data"));
        let (corpus, model) = sample();
        store.save_pair(&corpus, &model, true).unwrap();

        assert!(store.corpus_path().exists());
        assert!(!dir.path().join("data").join("corpus.cbor.tmp").exists());

        let loaded = store.load_corpus_opt().unwrap().unwrap();
        assert_eq!(loaded, corpus);
        let titles: Vec<&str> = loaded.titles().collect();
        assert_eq!(titles, vec!["A", "B", "C"]);

        let recommender = store.load_recommender().unwrap();
        assert_eq!(recommender.model().matrix(), model.matrix());
        assert_eq!(recommender.try_recommend("A", 2).unwrap(), vec!["B", "C"]);
    }

    #[test]
    fn torn_pair_is_misaligned() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path());
        let (corpus, model) = sample();
        store.save_model(&model).unwrap();

        let mut bigger = corpus.clone();
        bigger.extend_new(vec![Document::new("D", "haunted house")]);
        store.save_corpus(&bigger).unwrap();

        assert!(matches!(
            store.load_recommender(),
            Err(RecommendError::Misaligned { corpus_rows: 4, matrix_rows: 3 })
        ));
    }

    #[test]
    fn failed_rename_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path());
        // a non-empty directory where the corpus file should go cannot be replaced
        fs::create_dir_all(store.corpus_path().join("occupied")).unwrap();

        let (corpus, _) = sample();
        assert!(matches!(store.save_corpus(&corpus), Err(RecommendError::Io(_))));
        assert!(!dir.path().join("corpus.cbor.tmp").exists());
        assert!(store.corpus_path().join("occupied").is_dir());
    }

    #[test]
    fn garbage_is_a_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path());
        fs::write(store.corpus_path(), b"not cbor at all").unwrap();
        assert!(matches!(store.load_corpus_opt(), Err(RecommendError::Cbor(_))));
    }
}
