//! Command-line interface definitions.
//!
//! All options are optional: with no arguments the binary runs the built-in
//! crawl configuration and writes the snapshot to its default path. A YAML
//! config file provides the full knob set; the flags here are the handful
//! worth overriding per invocation.

use clap::Parser;

/// Command-line arguments for the offshore digest pipeline.
///
/// # Examples
///
/// ```sh
/// # Built-in configuration, default snapshot path
/// offshore_digest
///
/// # Custom config, snapshot elsewhere, four site workers
/// offshore_digest -c digest.yaml -o /srv/digest/snapshot.csv --workers 4
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Optional path to a YAML config file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Snapshot output path (overrides the config value)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Site worker pool size (overrides the config value)
    #[arg(long)]
    pub workers: Option<usize>,

    /// Summarization service endpoint (overrides the config value)
    #[arg(long, env = "SUMMARIZER_ENDPOINT")]
    pub summarizer_endpoint: Option<String>,
}
