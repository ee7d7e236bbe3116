//! Handlers for the `analyze` and `lexicon` commands.

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::Context;
use sentiscope_sentiment::SentimentAnalyzer;
use serde::Serialize;

/// One piece of text to analyze and where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Input {
    pub label: String,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Mode {
    Local,
    Remote,
    Explain,
}

impl Mode {
    pub(crate) fn from_flags(remote: bool, explain: bool) -> Self {
        if explain {
            Self::Explain
        } else if remote {
            Self::Remote
        } else {
            Self::Local
        }
    }
}

#[derive(Debug, Serialize)]
struct Output<'a, T: Serialize> {
    input: &'a str,
    #[serde(flatten)]
    result: T,
}

/// Gather the text argument and each file; fall back to `stdin` when
/// neither is given.
///
/// # Errors
///
/// Returns an error if a file or `stdin` cannot be read as UTF-8.
pub(crate) fn collect_inputs(
    text: Option<String>,
    files: &[PathBuf],
    mut stdin: impl Read,
) -> anyhow::Result<Vec<Input>> {
    let mut inputs = Vec::with_capacity(files.len() + 1);

    if let Some(text) = text {
        inputs.push(Input {
            label: "argument".to_string(),
            text,
        });
    }
    for path in files {
        inputs.push(Input {
            label: path.display().to_string(),
            text: read_file(path)?,
        });
    }

    if inputs.is_empty() {
        let mut text = String::new();
        stdin
            .read_to_string(&mut text)
            .context("failed to read text from stdin")?;
        inputs.push(Input {
            label: "stdin".to_string(),
            text,
        });
    }

    Ok(inputs)
}

fn read_file(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

/// Analyze every input and render each result as pretty JSON.
///
/// # Errors
///
/// Returns an error if a result cannot be serialized.
pub(crate) async fn run_analyze(
    analyzer: &SentimentAnalyzer,
    inputs: &[Input],
    mode: Mode,
) -> anyhow::Result<Vec<String>> {
    let mut rendered = Vec::with_capacity(inputs.len());

    for input in inputs {
        let json = match mode {
            Mode::Local => render(&input.label, analyzer.analyze_local(&input.text))?,
            Mode::Remote => render(&input.label, analyzer.analyze(&input.text).await)?,
            Mode::Explain => render(
                &input.label,
                analyzer.scorer().score_detailed(&input.text),
            )?,
        };
        tracing::debug!(input = %input.label, "analyzed");
        rendered.push(json);
    }

    Ok(rendered)
}

fn render<T: Serialize>(label: &str, result: T) -> anyhow::Result<String> {
    let output = Output {
        input: label,
        result,
    };
    serde_json::to_string_pretty(&output).context("failed to serialize analysis")
}

/// Render the analyzer's lexicon configuration as YAML.
///
/// # Errors
///
/// Returns an error if the configuration cannot be serialized.
pub(crate) fn render_lexicon(analyzer: &SentimentAnalyzer) -> anyhow::Result<String> {
    Ok(analyzer.scorer().config().to_yaml()?)
}
