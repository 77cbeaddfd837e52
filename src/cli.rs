//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use crate::models::{CommentOrder, ExportFormat, RunInfo};
use clap::Parser;
use std::path::PathBuf;

/// Comment Insights - YouTube comment fetcher and audience analyzer
///
/// Fetches comments through the YouTube Data API v3, exports them and
/// writes an insights report with topics, engagement and audience level.
///
/// Examples:
///   comment-insights https://www.youtube.com/watch?v=dQw4w9WgXcQ
///   comment-insights dQw4w9WgXcQ --max-comments 100 --format csv
///   comment-insights https://youtu.be/dQw4w9WgXcQ --output reports
///   comment-insights --input tmp/some_video/comments.json
///   comment-insights --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// YouTube video URL or 11-character video ID
    #[arg(
        value_name = "VIDEO",
        required_unless_present_any = ["init_config", "input"]
    )]
    pub video: Option<String>,

    /// Maximum number of comments to retrieve (default: all)
    #[arg(short = 'n', long, value_name = "COUNT")]
    pub max_comments: Option<usize>,

    /// Export format for the raw comments (json, csv, markdown)
    #[arg(short, long, value_name = "FORMAT")]
    pub format: Option<ExportFormat>,

    /// Base directory for the per-video output directory
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Comment ordering (time, relevance)
    #[arg(long, value_name = "ORDER")]
    pub order: Option<CommentOrder>,

    /// YouTube Data API v3 key
    #[arg(long, env = "YOUTUBE_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Analyze a previous JSON export instead of fetching
    #[arg(long, value_name = "FILE", conflicts_with = "video")]
    pub input: Option<PathBuf>,

    /// Pause between page requests in milliseconds
    #[arg(long, value_name = "MS")]
    pub request_delay_ms: Option<u64>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .comment-insights.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Don't export to files, just print the insights
    #[arg(long)]
    pub no_export: bool,

    /// Skip the insights analysis
    #[arg(long)]
    pub no_insights: bool,

    /// Generate a default .comment-insights.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        if let Some(max) = self.max_comments {
            if max == 0 {
                return Err("Max comments must be at least 1".to_string());
            }
        }

        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if self.no_export && self.no_insights {
            return Err("Nothing to do with both --no-export and --no-insights".to_string());
        }

        if let Some(ref input) = self.input {
            if !input.is_file() {
                return Err(format!("Input file does not exist: {}", input.display()));
            }
        } else if let Some(ref key) = self.api_key {
            if key.trim().is_empty() {
                return Err("API key must not be empty".to_string());
            }
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    ///
    /// `config_verbose` comes from the config file; `--quiet` overrides it.
    pub fn log_level(&self, config_verbose: bool) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose || config_verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }

    /// Describe this invocation for export headers.
    pub fn run_info(&self, format: ExportFormat, order: CommentOrder) -> RunInfo {
        RunInfo {
            original_command: std::env::args().collect::<Vec<_>>().join(" "),
            max_comments: self.max_comments,
            format,
            order,
            insights_enabled: !self.no_insights,
            export_enabled: !self.no_export,
        }
    }
}
