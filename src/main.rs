use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tf_recommender::{config, logging, ArtifactStore, RecommendError};

/// Recommend titles similar to a given one.
///
/// Prints a JSON array of titles on stdout; diagnostics go to stderr.
#[derive(Parser)]
#[command(name = "recommend", about = "Content-based title recommendations")]
struct Args {
    /// Exact title to find similar items for
    title: Option<String>,

    /// Number of recommendations
    #[arg(short = 'n', long, env = "TF_RECOMMENDER_TOP_N", default_value_t = config::DEFAULT_TOP_N)]
    top_n: usize,

    /// Directory holding the corpus and model artifacts
    #[arg(short, long, env = "TF_RECOMMENDER_DATA_DIR", default_value = config::DEFAULT_DATA_DIR)]
    data_dir: PathBuf,
}

fn main() -> ExitCode {
    logging::init();
    let args = Args::parse();

    let Some(title) = args.title else {
        println!("[]");
        return ExitCode::SUCCESS;
    };

    let store = ArtifactStore::new(&args.data_dir);
    let recommender = match store.load_recommender() {
        Ok(r) => r,
        Err(e) => {
            eprintln!("error: cannot load recommender from {:?}: {}", args.data_dir, e);
            return ExitCode::FAILURE;
        }
    };

    let titles = match recommender.try_recommend(&title, args.top_n) {
        Ok(titles) => titles,
        Err(RecommendError::NotFound { title }) => {
            eprintln!("Title '{}' not found in corpus.", title);
            Vec::new()
        }
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match serde_json::to_string(&titles) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
