//! Parse anime filenames from arguments or stdin and print one JSON object per line.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tanto_core::{Elements, Options, Tanto, Token};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "tanto-parse")]
#[command(about = "Extract metadata from anime filenames as JSON lines")]
#[command(version)]
struct Cli {
    /// Filenames to parse. Read from stdin, one per line, when omitted.
    filenames: Vec<String>,

    /// JSON file with parser options; flags below override it
    #[arg(short, long)]
    options: Option<PathBuf>,

    /// Characters allowed as delimiters
    #[arg(short, long)]
    delimiters: Option<String>,

    /// Substring removed before parsing (repeatable)
    #[arg(short, long = "ignore")]
    ignore: Vec<String>,

    #[arg(long)]
    no_episode_number: bool,

    #[arg(long)]
    no_episode_title: bool,

    #[arg(long)]
    no_file_extension: bool,

    #[arg(long)]
    no_release_group: bool,

    /// Include the classified token sequence in the output
    #[arg(long)]
    tokens: bool,

    /// Pretty-print each JSON object
    #[arg(long)]
    pretty: bool,
}

impl Cli {
    fn build_options(&self) -> Result<Options> {
        let mut options = match &self.options {
            Some(path) => {
                let raw = fs::read_to_string(path)
                    .with_context(|| format!("failed to read {}", path.display()))?;
                serde_json::from_str(&raw)
                    .with_context(|| format!("failed to parse options from {}", path.display()))?
            }
            None => Options::default(),
        };

        if let Some(delimiters) = &self.delimiters {
            options.allowed_delimiters = delimiters.clone();
        }
        options.ignored_strings.extend(self.ignore.iter().cloned());
        options.parse_episode_number &= !self.no_episode_number;
        options.parse_episode_title &= !self.no_episode_title;
        options.parse_file_extension &= !self.no_file_extension;
        options.parse_release_group &= !self.no_release_group;
        Ok(options)
    }
}

#[derive(Debug, Serialize)]
struct ParseOutput {
    input: String,
    elements: Elements,
    #[serde(skip_serializing_if = "Option::is_none")]
    tokens: Option<Vec<Token>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn parse_line(tanto: &Tanto, input: &str, with_tokens: bool) -> ParseOutput {
    match tanto.parse(input) {
        Ok(result) => {
            debug!(input, title = ?result.anime_title(), "parsed");
            ParseOutput {
                input: input.to_string(),
                elements: result.elements,
                tokens: with_tokens.then_some(result.tokens),
                error: None,
            }
        }
        Err(e) => {
            warn!(input, error = %e, "parse failed");
            ParseOutput {
                input: input.to_string(),
                elements: Elements::new(),
                tokens: None,
                error: Some(e.to_string()),
            }
        }
    }
}

fn emit(out: &mut impl Write, output: &ParseOutput, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(output)?
    } else {
        serde_json::to_string(output)?
    };
    writeln!(out, "{json}")?;
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let tanto = Tanto::new(cli.build_options()?).context("invalid parser options")?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if cli.filenames.is_empty() {
        for line in io::stdin().lock().lines() {
            let line = line.context("failed to read stdin")?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            emit(&mut out, &parse_line(&tanto, line, cli.tokens), cli.pretty)?;
        }
    } else {
        for filename in &cli.filenames {
            emit(&mut out, &parse_line(&tanto, filename, cli.tokens), cli.pretty)?;
        }
    }

    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::try_parse_from([
            "tanto-parse",
            "--no-release-group",
            "--ignore",
            "[Preview]",
            "--delimiters",
            " _",
            "Show - 01.mkv",
        ])
        .unwrap();
        let options = cli.build_options().unwrap();
        assert!(!options.parse_release_group);
        assert!(options.parse_episode_number);
        assert_eq!(options.allowed_delimiters, " _");
        assert_eq!(options.ignored_strings, ["[Preview]"]);
        assert_eq!(cli.filenames, ["Show - 01.mkv"]);
    }

    #[test]
    fn failed_parse_reports_error() {
        let tanto = Tanto::new(Options::default()).unwrap();
        let output = parse_line(&tanto, "", false);
        assert!(output.error.is_some());
        assert!(output.elements.is_empty());

        let output = parse_line(&tanto, "[Group] Show - 01.mkv", true);
        assert!(output.error.is_none());
        assert!(output.tokens.is_some());
        let json = serde_json::to_string(&output).unwrap();
        assert!(json.contains("\"release_group\""));
    }
}
