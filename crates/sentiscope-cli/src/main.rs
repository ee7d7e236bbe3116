mod analyze;

use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use sentiscope_sentiment::SentimentAnalyzer;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "sentiscope")]
#[command(about = "Sentiscope sentiment analysis command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Analyze text given as an argument, read from files, or piped on stdin
    Analyze {
        /// Text to analyze
        text: Option<String>,

        /// Analyze the contents of a file (repeatable)
        #[arg(long = "file", value_name = "PATH")]
        files: Vec<PathBuf>,

        /// Try the configured remote providers before the local lexicon
        #[arg(long)]
        remote: bool,

        /// Print the local scorer's intermediate counters
        #[arg(long, conflicts_with = "remote")]
        explain: bool,
    },
    /// Print the active lexicon configuration as YAML
    Lexicon,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = sentiscope_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    // stdout carries the JSON output.
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Analyze {
            text,
            files,
            remote,
            explain,
        }) => {
            let analyzer = SentimentAnalyzer::from_config(&config)?;
            let inputs = analyze::collect_inputs(text, &files, std::io::stdin().lock())?;
            let mode = analyze::Mode::from_flags(remote, explain);
            for output in analyze::run_analyze(&analyzer, &inputs, mode).await? {
                println!("{output}");
            }
        }
        Some(Commands::Lexicon) => {
            let analyzer = SentimentAnalyzer::from_config(&config)?;
            print!("{}", analyze::render_lexicon(&analyzer)?);
        }
        None => Cli::command().print_help()?,
    }

    Ok(())
}
