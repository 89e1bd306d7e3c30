//! Vidsift command line front end
//!
//! Reads captured yt-dlp output (from a file or stdin) or URLs and prints
//! what the core library makes of them, as JSON or display strings.

use std::collections::HashMap;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{debug, info, Level};

use vidsift_core::classify::{ClassifierConfig, HostMatching, UrlClassifier};
use vidsift_core::parser::{
    split_tool_output, FormatTableParser, ProgressLineNormalizer, TableParserConfig,
};
use vidsift_core::types::{EnglishLabels, LabelProvider, LabelTable, VideoFormatRecord};

/// CLI arguments
#[derive(Parser)]
#[command(name = "vidsift")]
#[command(about = "Parse yt-dlp output and classify video links")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// JSON file mapping label keys to display text
    #[arg(short, long, env = "VIDSIFT_LABELS", global = true)]
    labels: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a captured format table into records
    Formats {
        /// Input file (stdin when omitted)
        file: Option<PathBuf>,
        /// Pretty-print the JSON output
        #[arg(short, long)]
        pretty: bool,
    },
    /// Normalize progress lines, one per input line
    Progress {
        /// Input file (stdin when omitted)
        file: Option<PathBuf>,
        /// Print numeric snapshots as JSON instead of display strings
        #[arg(short, long)]
        snapshot: bool,
    },
    /// Split a full tool output into formats and progress
    Digest {
        /// Input file (stdin when omitted)
        file: Option<PathBuf>,
        /// Pretty-print the JSON output
        #[arg(short, long)]
        pretty: bool,
    },
    /// Classify one or more URLs
    Classify {
        #[arg(required = true)]
        urls: Vec<String>,
        /// Extra base-domain labels to accept as extractable
        #[arg(long = "allow-domain")]
        allow_domains: Vec<String>,
        /// Do not treat HLS manifests as extractable
        #[arg(long)]
        no_hls: bool,
        /// Match platform domains on label boundaries instead of containment
        #[arg(long)]
        strict_hosts: bool,
    },
}

#[derive(Serialize)]
struct Digest {
    formats: Vec<VideoFormatRecord>,
    progress: Vec<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let labels = load_labels(cli.labels.as_deref())?;

    match cli.command {
        Commands::Formats { file, pretty } => {
            let input = read_input(file.as_deref())?;
            let parser = FormatTableParser::new(TableParserConfig::default(), labels);
            let formats = parser.parse(&input);
            info!("Parsed {} formats", formats.len());
            print_json(&formats, pretty)?;
        }
        Commands::Progress { file, snapshot } => {
            let input = read_input(file.as_deref())?;
            let normalizer =
                ProgressLineNormalizer::new(labels).context("Failed to build progress normalizer")?;
            for line in input.lines().filter(|l| !l.trim().is_empty()) {
                if snapshot {
                    if let Some(snap) = normalizer.snapshot(line) {
                        println!("{}", serde_json::to_string(&snap)?);
                    }
                } else {
                    println!("{}", normalizer.normalize(line));
                }
            }
        }
        Commands::Digest { file, pretty } => {
            let input = read_input(file.as_deref())?;
            let split = split_tool_output(&input);
            debug!(
                has_table = split.table.is_some(),
                lines = split.progress_lines.len(),
                "tool output split"
            );

            let parser = FormatTableParser::new(TableParserConfig::default(), labels.clone());
            let normalizer =
                ProgressLineNormalizer::new(labels).context("Failed to build progress normalizer")?;
            let digest = Digest {
                formats: split
                    .table
                    .as_deref()
                    .map(|table| parser.parse(table))
                    .unwrap_or_default(),
                progress: split
                    .progress_lines
                    .iter()
                    .map(|line| normalizer.normalize(line))
                    .collect(),
            };
            print_json(&digest, pretty)?;
        }
        Commands::Classify {
            urls,
            allow_domains,
            no_hls,
            strict_hosts,
        } => {
            let matching = if strict_hosts {
                HostMatching::LabelBoundary
            } else {
                HostMatching::Contains
            };
            let config = allow_domains
                .into_iter()
                .fold(ClassifierConfig::new(), |config, domain| {
                    config.with_extra_domain(domain)
                })
                .with_hls_is_extractable(!no_hls)
                .with_host_matching(matching);
            let classifier = UrlClassifier::new(config).context("Failed to build URL classifier")?;
            for url in &urls {
                println!("{}", serde_json::to_string(&classifier.classify(url))?);
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

fn load_labels(path: Option<&Path>) -> Result<Arc<dyn LabelProvider>> {
    let Some(path) = path else {
        return Ok(Arc::new(EnglishLabels));
    };

    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read labels file {}", path.display()))?;
    let entries: HashMap<String, String> = serde_json::from_str(&raw)
        .with_context(|| format!("Labels file {} is not a JSON object of strings", path.display()))?;
    let table = LabelTable::from_json_map(entries)
        .with_context(|| format!("Invalid labels file {}", path.display()))?;
    info!("Loaded {} labels from {}", table.len(), path.display());
    Ok(Arc::new(table))
}

fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut input = String::new();
            io::stdin()
                .read_to_string(&mut input)
                .context("Failed to read stdin")?;
            Ok(input)
        }
    }
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{json}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["vidsift", "classify", "https://youtu.be/a", "-vv"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Commands::Classify { ref urls, .. } if urls.len() == 1));
    }

    #[test]
    fn classify_requires_a_url() {
        assert!(Cli::try_parse_from(["vidsift", "classify"]).is_err());
    }

    #[test]
    fn strict_hosts_flag() {
        let cli =
            Cli::try_parse_from(["vidsift", "classify", "--strict-hosts", "https://x.com/a"]).unwrap();
        assert!(matches!(cli.command, Commands::Classify { strict_hosts: true, .. }));
    }

    #[test]
    fn default_labels_without_file() {
        let labels = load_labels(None).unwrap();
        assert_eq!(
            labels.label(vidsift_core::types::LabelKey::NotAvailable),
            "N/A"
        );
    }
}
