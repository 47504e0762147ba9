//! Ringkas CLI entrypoint.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;

use ringkas::{
    CleanOptions, Config, EvaluateOptions, GenerateOptions, GenerationParams, ModelConfig,
    PreprocessOptions, PromptOptions, Quantization, RecordFormat, Summarizer, run_evaluate,
    run_generate, run_preprocess,
};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Parser)]
#[command(
    name = "ringkas",
    version,
    about = "Summarize Indonesian e-commerce reviews with quantized instruction-tuned models"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Clean the review text in a dataset file.
    Preprocess {
        /// Input dataset (.json, .jsonl, or .csv).
        #[arg(long)]
        input: PathBuf,

        /// Output path; its extension picks the format unless --format is set.
        #[arg(long)]
        output: PathBuf,

        /// Lowercase the cleaned text.
        #[arg(long)]
        lowercase: bool,

        /// Strip punctuation from the cleaned text.
        #[arg(long)]
        remove_punctuation: bool,

        /// Force a format (json, jsonl, csv) instead of detecting it.
        #[arg(long, default_value = "auto")]
        format: String,
    },

    /// Generate a summary for every review in a dataset.
    Generate {
        /// Input dataset (.json, .jsonl, or .csv).
        #[arg(long)]
        input: PathBuf,

        /// Output path for the records with generated summaries.
        #[arg(long)]
        output: PathBuf,

        /// GGUF model file, or a directory holding quantization variants.
        #[arg(long)]
        model: PathBuf,

        /// Tokenizer file; defaults to tokenizer.json next to the model.
        #[arg(long)]
        tokenizer: Option<PathBuf>,

        /// Prompt template: mistral, llama, generic, or indonesian.
        #[arg(long)]
        model_type: Option<String>,

        /// Record field holding the review text.
        #[arg(long, default_value = "review")]
        review_field: String,

        /// Token budget for each generated summary.
        #[arg(long)]
        max_new_tokens: Option<usize>,

        /// Sampling temperature; 0 means greedy decoding.
        #[arg(long)]
        temperature: Option<f64>,

        /// Sampling seed.
        #[arg(long)]
        seed: Option<u64>,

        /// Load the 4-bit quantized variant.
        #[arg(long)]
        load_in_4bit: bool,

        /// Load the 8-bit quantized variant.
        #[arg(long)]
        load_in_8bit: bool,
    },

    /// Score generated summaries against references with ROUGE-1/2/L.
    Evaluate {
        /// Dataset holding the generated summaries.
        #[arg(long)]
        predictions: PathBuf,

        /// Dataset holding the reference summaries.
        #[arg(long)]
        references: PathBuf,

        /// Field holding the prediction text.
        #[arg(long, default_value = "generated_summary")]
        pred_field: String,

        /// Field holding the reference text.
        #[arg(long, default_value = "summary")]
        ref_field: String,

        /// Optional path for the JSON report.
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Preprocess {
            input,
            output,
            lowercase,
            remove_punctuation,
            format,
        } => {
            let format = match format.as_str() {
                "auto" => None,
                other => Some(other.parse::<RecordFormat>()?),
            };
            let options = PreprocessOptions {
                input,
                output,
                format,
                clean_options: CleanOptions {
                    lowercase,
                    remove_punctuation,
                },
            };

            let count = run_preprocess(&options)?;
            println!(
                "Processed {count} records -> {}",
                options.output.display()
            );
        }

        Command::Generate {
            input,
            output,
            model,
            tokenizer,
            model_type,
            review_field,
            max_new_tokens,
            temperature,
            seed,
            load_in_4bit,
            load_in_8bit,
        } => {
            let config = Config::from_env()?;

            let template = match model_type {
                Some(name) => name.parse()?,
                None => config.default_template,
            };

            let mut model_config = ModelConfig::new(&model);
            model_config.quantization = Quantization::from_flags(load_in_4bit, load_in_8bit)?;
            if let Some(tokenizer) = tokenizer {
                model_config.tokenizer_path = tokenizer;
            }
            if let Some(seed) = seed {
                model_config.seed = seed;
            }

            let params = GenerationParams {
                max_new_tokens: max_new_tokens.unwrap_or(config.max_new_tokens),
                temperature: temperature.unwrap_or(config.temperature),
                top_p: config.top_p,
                top_k: config.top_k,
            };

            let summarizer = Summarizer::load(model_config)?;
            let options = GenerateOptions {
                input,
                output,
                review_field,
                model_label: model.display().to_string(),
                template,
                prompt_options: PromptOptions::default(),
                params,
            };

            let stats = run_generate(&options, &summarizer)?;
            println!(
                "Generated {} summaries ({} failed, {} skipped) -> {}",
                stats.generated,
                stats.failed,
                stats.skipped,
                options.output.display()
            );
        }

        Command::Evaluate {
            predictions,
            references,
            pred_field,
            ref_field,
            output,
        } => {
            let options = EvaluateOptions {
                predictions,
                references,
                pred_field,
                ref_field,
                output,
            };

            let report = run_evaluate(&options)?;
            println!("{}", "=".repeat(80));
            println!("{}", report.format());
            println!("{}", "=".repeat(80));
        }
    }

    Ok(())
}
