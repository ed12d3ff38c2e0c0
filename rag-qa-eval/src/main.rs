//! RAG QA Evaluation CLI

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use rag_qa_eval::{
    analysis::{exact_match, f1_score, rouge_scores, EvaluationEngine},
    config::Config,
    dataset::{load_ground_truth_from_file, load_predictions_from_file},
    reporting::{print_console_report, JsonReport},
};

#[derive(Parser)]
#[command(name = "rag-qa-eval")]
#[command(about = "Evaluate QA predictions for End-to-End RAG Benchmark")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a predictions file against ground truth
    Evaluate {
        /// Path to predictions JSON file
        #[arg(short, long)]
        predictions: PathBuf,

        /// Path to ground truth JSON file
        #[arg(short, long)]
        ground_truth: PathBuf,

        /// Path to save detailed results
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Score questions in parallel
        #[arg(long)]
        parallel: bool,
    },

    /// Score a single prediction against a reference answer
    Score {
        /// Predicted answer
        #[arg(long)]
        prediction: String,

        /// Reference answer
        #[arg(long)]
        reference: String,

        /// Accepted alternative answer (repeatable)
        #[arg(long = "alternative")]
        alternatives: Vec<String>,
    },

    /// Generate sample configuration
    InitConfig {
        /// Output path for configuration file
        #[arg(short, long, default_value = "config/eval.toml")]
        output: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("rag_qa_eval=debug,info")
    } else {
        EnvFilter::new("rag_qa_eval=info,warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::load_or_default(),
    };

    match cli.command {
        Commands::Evaluate {
            predictions,
            ground_truth,
            output,
            parallel,
        } => {
            evaluate(&config, predictions, ground_truth, output, parallel)?;
        }

        Commands::Score {
            prediction,
            reference,
            alternatives,
        } => {
            score(&prediction, &reference, &alternatives);
        }

        Commands::InitConfig { output } => {
            init_config(output)?;
        }
    }

    Ok(())
}

fn evaluate(
    config: &Config,
    predictions_path: PathBuf,
    ground_truth_path: PathBuf,
    output: Option<PathBuf>,
    parallel: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let predictions = load_predictions_from_file(&predictions_path)?;
    let ground_truth = load_ground_truth_from_file(&ground_truth_path)?;

    let engine = EvaluationEngine::from_config(config).parallel(parallel || config.evaluation.parallel);
    let run = engine.evaluate(&ground_truth, &predictions);

    print_console_report(&run.aggregated);

    if let Some(path) = output {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        JsonReport::from_run(&run, config.output.include_details)
            .write_to_file(&path, config.output.pretty)?;
        println!("\nDetailed results written to: {}", path.display());
    }

    Ok(())
}

fn score(prediction: &str, reference: &str, alternatives: &[String]) {
    let rouge = rouge_scores(prediction, reference);

    println!("exact_match: {:.3}", exact_match(prediction, reference, alternatives));
    println!("f1_score: {:.3}", f1_score(prediction, reference));
    println!("rouge_1: {:.3}", rouge.rouge_1);
    println!("rouge_2: {:.3}", rouge.rouge_2);
    println!("rouge_l: {:.3}", rouge.rouge_l);
}

fn init_config(output: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::default();

    // Ensure parent directory exists
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    config.save_toml(&output)?;
    println!("Configuration written to: {}", output.display());
    Ok(())
}
