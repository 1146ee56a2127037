mod report;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use colored::Colorize;
use data_loader::{fmt_rating, HistoryStore};
use eval::parse_prediction;
use inference::{ConstantCompletions, ScriptedCompletions, TextGeneration};
use prompting::{PromptComposer, PromptConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;
use report::CaseReport;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info};

/// Prompt-based movie rating prediction harness over MovieLens
#[derive(Parser)]
#[command(name = "reel-prompt")]
#[command(about = "Builds rating-prediction prompts and scores model answers", long_about = None)]
struct Cli {
    /// Path to the ml-latest-small dataset directory
    #[arg(long, default_value = "ml-latest-small")]
    data_dir: PathBuf,

    /// Directory the per-run results folder is created under
    #[arg(long, default_value = "results")]
    output_dir: PathBuf,

    /// Seed for the training/evaluation split
    #[arg(long, default_value_t = 0)]
    dataset_seed: u64,

    /// Fraction of the history drawn into the training split, in (0, 1]
    #[arg(long, default_value_t = 0.8)]
    training_ratio: f64,

    /// Batch size hint passed to the inference backend
    #[arg(long, default_value_t = 8)]
    batch_size: usize,

    /// Seed for context and few-shot example sampling
    #[arg(long, default_value_t = 0)]
    prompt_seed: u64,

    /// Cap on liked movies sampled into each context
    #[arg(long, default_value_t = 10)]
    likes_count: usize,

    /// Cap on disliked movies sampled into each context
    #[arg(long, default_value_t = 10)]
    dislikes_count: usize,

    /// Prefix each question with the user's likes/dislikes context
    #[arg(long, action = ArgAction::Set, default_value_t = true)]
    with_context: bool,

    /// Emit the likes block before the dislikes block
    #[arg(long, action = ArgAction::Set, default_value_t = true)]
    likes_first: bool,

    /// Task description template version (1 or 2)
    #[arg(long, default_value_t = 1)]
    task_version: u8,

    /// Few-shot examples drawn per evaluation case
    #[arg(long, default_value_t = 0)]
    shots: usize,

    /// Append the genre list to each movie description
    #[arg(long, action = ArgAction::Set, default_value_t = false)]
    with_genre: bool,

    /// Append the global median rating to each movie description
    #[arg(long, action = ArgAction::Set, default_value_t = false)]
    with_global_rating: bool,

    /// Replay model completions from this file (one per prompt) instead
    /// of the constant backend
    #[arg(long)]
    completions: Option<PathBuf>,

    /// Answer the constant backend gives to every prompt
    #[arg(long, default_value = "3.0 stars")]
    constant_answer: String,
}

impl Cli {
    fn prompt_config(&self) -> PromptConfig {
        PromptConfig {
            with_context: self.with_context,
            likes_first: self.likes_first,
            likes_count: self.likes_count,
            dislikes_count: self.dislikes_count,
            task_version: self.task_version,
            shots: self.shots,
            with_genre: self.with_genre,
            with_global_rating: self.with_global_rating,
        }
    }

    /// Per-run folder name encoding every prompt-shaping setting, so two
    /// runs with different configurations never overwrite each other.
    fn run_name(&self, backend: &str) -> String {
        format!(
            "experiment_training_ratio={}_prompt_seed={}_backend={}_with_context={}_likes_first={}_task_version={}_shots={}_with_genre={}_with_global_rating={}_likes_count={}_dislikes_count={}",
            self.training_ratio,
            self.prompt_seed,
            backend,
            self.with_context,
            self.likes_first,
            self.task_version,
            self.shots,
            self.with_genre,
            self.with_global_rating,
            self.likes_count,
            self.dislikes_count,
        )
    }
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    // An invalid template version must fail here, before any data is
    // loaded or any sampling happens.
    let config = cli.prompt_config();
    config.validate().context("Invalid prompt configuration")?;

    info!("Creating dataset...");
    let (catalog, ratings) = data_loader::load_dataset(&cli.data_dir)
        .with_context(|| format!("Loading dataset from {}", cli.data_dir.display()))?;
    let history = HistoryStore::new(ratings, cli.training_ratio, cli.dataset_seed)
        .context("Splitting rating history")?;
    info!(
        movies = catalog.len(),
        training = history.training().len(),
        evaluation = history.evaluation().len(),
        "Dataset ready"
    );

    info!("Generating prompts...");
    let composer = PromptComposer::new(&catalog, &history, &config);
    let mut rng = StdRng::seed_from_u64(cli.prompt_seed);
    let cases = history.evaluation();
    let prompts = cases
        .iter()
        .map(|case| composer.prompt(case.user_id, case.movie_id, &mut rng))
        .collect::<prompting::Result<Vec<_>>>()
        .context("Generating prompts")?;
    if let Some(first) = prompts.first() {
        debug!("Prompt example:\n{first}");
    }

    let backend: Box<dyn TextGeneration> = match &cli.completions {
        Some(path) => Box::new(
            ScriptedCompletions::from_file(path)
                .with_context(|| format!("Loading completions from {}", path.display()))?,
        ),
        None => Box::new(ConstantCompletions::new(cli.constant_answer.clone())),
    };

    info!("Running {} backend...", backend.name());
    let outputs = backend
        .complete(&prompts, cli.batch_size)
        .context("Running inference backend")?;

    info!("Parsing outputs...");
    let predictions = outputs
        .iter()
        .map(|o| parse_prediction(o))
        .collect::<eval::Result<Vec<_>>>()
        .context("Parsing model outputs")?;
    let truth: Vec<f32> = cases.iter().map(|case| case.rating).collect();

    info!("Dumping results...");
    let run_dir = cli.output_dir.join(cli.run_name(backend.name()));
    fs::create_dir_all(&run_dir)
        .with_context(|| format!("Creating results folder {}", run_dir.display()))?;

    let mut rows = Vec::with_capacity(cases.len());
    for (((case, prompt), output), prediction) in
        cases.iter().zip(&prompts).zip(&outputs).zip(&predictions)
    {
        rows.push(CaseReport {
            prompt: prompt.clone(),
            movie: catalog.name(case.movie_id)?.to_string(),
            output: output.clone(),
            prediction: fmt_rating(*prediction),
            truth: fmt_rating(case.rating),
        });
    }
    let report_path = run_dir.join("results.csv");
    report::write_report(&report_path, &rows)?;
    println!(
        "{} Wrote {} case rows to {}",
        "✓".green(),
        rows.len(),
        report_path.display()
    );

    info!("Reporting metrics...");
    let evaluation = eval::evaluate(&truth, &predictions).context("Scoring predictions")?;
    println!("{} RMSE: {:.4}", "✓".green(), evaluation.rmse);
    println!("Classification report:\n{}", evaluation.report);

    Ok(())
}
