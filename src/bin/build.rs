use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tf_recommender::{config, logging, pipeline, ArtifactStore, BuildOptions, VectorizerConfig};

/// Merge item records into the stored corpus and rebuild the model.
#[derive(Parser)]
#[command(name = "build-corpus", about = "Build the recommendation corpus and model")]
struct Args {
    /// JSON array of item records
    items: PathBuf,

    /// Directory holding the corpus and model artifacts
    #[arg(short, long, env = "TF_RECOMMENDER_DATA_DIR", default_value = config::DEFAULT_DATA_DIR)]
    data_dir: PathBuf,

    /// Vocabulary size limit
    #[arg(long, env = "TF_RECOMMENDER_MAX_FEATURES", default_value_t = config::DEFAULT_MAX_FEATURES)]
    max_features: usize,

    /// Append extracted plot keywords to each bag of words
    #[arg(long, default_value_t = false)]
    include_keywords: bool,
}

fn run(args: &Args) -> tf_recommender::Result<String> {
    let records = pipeline::read_records(&args.items)?;
    let store = ArtifactStore::new(&args.data_dir);
    let options = BuildOptions {
        include_keywords: args.include_keywords,
    };
    let config = VectorizerConfig::default().with_max_features(args.max_features);
    let summary = pipeline::build_and_store(&store, &records, &options, &config)?;
    Ok(serde_json::to_string(&summary)?)
}

fn main() -> ExitCode {
    logging::init();
    let args = Args::parse();

    match run(&args) {
        Ok(summary) => {
            println!("{}", summary);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
