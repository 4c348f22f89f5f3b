//! ListenLab command-line interface
//!
//! Imports transcripts, exports captions and runs the practice drills from a
//! terminal. Logs go to stderr (`RUST_LOG`, default `info`); results go to
//! stdout.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::fs;
use tracing::{debug, Level};
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter};

use listenlab_lib::core::practice::{
    format_clock, highlight_vocabulary, render_cloze, word_frequencies, DictationOutcome,
    TranscriptStats,
};
use listenlab_lib::core::settings::SETTINGS_FILE;
use listenlab_lib::{
    export_srt, ingest, EngineSettings, SegmentStore, SettingsManager, SourceFormat, Vocabulary,
};

/// CLI wrapper for SourceFormat (needed for clap ValueEnum)
#[derive(Clone, Copy, ValueEnum)]
enum CliFormat {
    Srt,
    Docx,
    Pdf,
    Text,
}

impl From<CliFormat> for SourceFormat {
    fn from(cli: CliFormat) -> Self {
        match cli {
            CliFormat::Srt => SourceFormat::Srt,
            CliFormat::Docx => SourceFormat::Docx,
            CliFormat::Pdf => SourceFormat::Pdf,
            CliFormat::Text => SourceFormat::PlainText,
        }
    }
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("segment {index} is out of range (transcript has {total} segments)")]
    SegmentOutOfRange { index: usize, total: usize },
}

#[derive(Parser)]
#[command(name = "listenlab")]
#[command(about = "Turn captions and documents into sentence-by-sentence listening drills")]
struct Cli {
    /// Settings file (defaults to the user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

/// Options shared by every command that reads a transcript
#[derive(clap::Args)]
struct Input {
    /// Transcript file (.srt, .txt, .doc, .docx, .pdf)
    file: PathBuf,

    /// Override the format guessed from the file extension
    #[arg(short, long)]
    format: Option<CliFormat>,
}

#[derive(Subcommand)]
enum Command {
    /// Ingest a file and list its segments
    Import {
        #[command(flatten)]
        input: Input,

        /// Print segments as JSON
        #[arg(long)]
        json: bool,
    },

    /// Convert a file to SRT captions
    Export {
        #[command(flatten)]
        input: Input,

        /// Output path (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print every segment as a fill-in-the-blank exercise
    Cloze {
        #[command(flatten)]
        input: Input,

        /// Seed for reproducible masking
        #[arg(long)]
        seed: Option<u64>,

        /// Masking probability (0.0-1.0)
        #[arg(long)]
        probability: Option<f64>,
    },

    /// Print segments with vocabulary words marked
    Highlight {
        #[command(flatten)]
        input: Input,

        /// Vocabulary word (repeatable)
        #[arg(short, long = "word", required = true)]
        words: Vec<String>,
    },

    /// Show the most frequent words
    Freq {
        #[command(flatten)]
        input: Input,

        /// Number of words to show
        #[arg(long)]
        top: Option<usize>,
    },

    /// Grade a dictation answer against one segment
    Check {
        #[command(flatten)]
        input: Input,

        /// 1-based segment index
        #[arg(long)]
        segment: usize,

        /// What you heard
        #[arg(long)]
        answer: String,
    },

    /// Show transcript statistics
    Stats {
        #[command(flatten)]
        input: Input,

        /// Print statistics as JSON
        #[arg(long)]
        json: bool,
    },
}

fn init_logging() {
    let subscriber = tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with(fmt::layer().with_writer(std::io::stderr));

    let _ = tracing::subscriber::set_global_default(subscriber);
}

fn settings_path(explicit: Option<PathBuf>) -> Option<PathBuf> {
    explicit.or_else(|| dirs::config_dir().map(|dir| dir.join("listenlab").join(SETTINGS_FILE)))
}

fn load_settings(explicit: Option<PathBuf>) -> EngineSettings {
    match settings_path(explicit) {
        Some(path) => SettingsManager::with_path(path).load(),
        None => EngineSettings::default(),
    }
}

async fn load_store(input: &Input, settings: &EngineSettings) -> Result<SegmentStore> {
    let format = match input.format {
        Some(format) => format.into(),
        None => SourceFormat::from_path(&input.file)
            .with_context(|| format!("Cannot tell the format of {}", input.file.display()))?,
    };

    let bytes = fs::read(&input.file)
        .await
        .with_context(|| format!("Failed to read {}", input.file.display()))?;
    debug!(path = %input.file.display(), %format, bytes = bytes.len(), "Read transcript");

    ingest(&bytes, format, &settings.segmenter)
        .with_context(|| format!("Failed to ingest {}", input.file.display()))
}

fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

async fn write_output(path: Option<&Path>, content: &str) -> Result<()> {
    match path {
        Some(path) => fs::write(path, content)
            .await
            .with_context(|| format!("Failed to write {}", path.display())),
        None => {
            print!("{content}");
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();
    let mut settings = load_settings(cli.config);

    match cli.command {
        Command::Import { input, json } => {
            let store = load_store(&input, &settings).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&store)?);
            } else {
                for segment in &store {
                    println!(
                        "{:>4}  {}  {}",
                        segment.index(),
                        format_clock(segment.start()),
                        segment.text()
                    );
                }
            }
        }

        Command::Export { input, output } => {
            let store = load_store(&input, &settings).await?;
            write_output(output.as_deref(), &export_srt(&store)).await?;
        }

        Command::Cloze {
            input,
            seed,
            probability,
        } => {
            if let Some(probability) = probability {
                settings.cloze.mask_probability = probability;
                settings.normalize();
            }
            let store = load_store(&input, &settings).await?;
            let mut rng = rng_from_seed(seed);
            for segment in &store {
                println!(
                    "{:>4}  {}",
                    segment.index(),
                    render_cloze(segment, &settings.cloze, &mut rng)
                );
            }
        }

        Command::Highlight { input, words } => {
            let store = load_store(&input, &settings).await?;
            let vocabulary: Vocabulary = words.iter().collect();
            for segment in &store {
                println!(
                    "{:>4}  {}",
                    segment.index(),
                    highlight_vocabulary(
                        segment.text(),
                        vocabulary.entries(),
                        &settings.highlight.marker
                    )
                );
            }
        }

        Command::Freq { input, top } => {
            let store = load_store(&input, &settings).await?;
            let top_n = top.unwrap_or(settings.frequency.top_n);
            for entry in word_frequencies(&store, top_n) {
                println!("{:>6}  {}", entry.count, entry.word);
            }
        }

        Command::Check {
            input,
            segment,
            answer,
        } => {
            let store = load_store(&input, &settings).await?;
            let target = store.get(segment).ok_or(CliError::SegmentOutOfRange {
                index: segment,
                total: store.len(),
            })?;
            let outcome = DictationOutcome::grade(target.text(), &answer);
            if outcome.is_exact_match {
                println!("Correct!");
            } else {
                println!("Not quite. Expected: {}", outcome.target);
            }
        }

        Command::Stats { input, json } => {
            let store = load_store(&input, &settings).await?;
            let stats = TranscriptStats::compute(&store, 0);
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                println!("Segments:       {}", stats.total_segments);
                println!("Words:          {}", stats.total_words);
                println!("Words/segment:  {:.1}", stats.average_words);
                println!("Duration:       {}", format_clock(stats.total_duration));
            }
        }
    }

    Ok(())
}
