//! Comment Insights - YouTube comment fetcher and audience analyzer
//!
//! A CLI tool that pulls comments through the YouTube Data API v3,
//! exports them and writes an insights report for content planning.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Error (missing key, quota, disabled comments, I/O, etc.)

mod analysis;
mod cli;
mod config;
mod models;
mod report;
mod youtube;

use anyhow::{Context, Result};
use chrono::Utc;
use cli::Args;
use config::{Config, CONFIG_FILE_NAME};
use models::{Comment, InsightReport, RunInfo, VideoMetadata};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;
use youtube::{CommentSource, FetchError, FetchOptions, YouTubeClient};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    // Config is loaded before logging so `verbose` in the file applies
    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("\n❌ Error: {:#}", e);
            std::process::exit(1);
        }
    };

    init_logging(&args, &config);

    info!("Comment Insights v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);
    debug!("Configuration: {:?}", config);

    if let Err(e) = run(args, config).await {
        error!("Run failed: {:#}", e);
        eprintln!("\n❌ Error: {:#}", e);
        if let Some(fetch_error) = e.downcast_ref::<FetchError>() {
            eprintln!("   💡 {}", fetch_error.hint());
        }
        std::process::exit(1);
    }

    Ok(())
}

/// Handle --init-config: write a default configuration file.
fn handle_init_config() -> Result<()> {
    let path = Path::new(CONFIG_FILE_NAME);

    if path.exists() {
        eprintln!(
            "⚠️  {} already exists. Remove it first or edit it manually.",
            CONFIG_FILE_NAME
        );
        std::process::exit(1);
    }

    std::fs::write(path, Config::default_toml())
        .with_context(|| format!("Failed to write {}", CONFIG_FILE_NAME))?;

    println!("✅ Created {} with default settings.", CONFIG_FILE_NAME);
    println!("   Edit it to customize the output directory, stopwords and topic catalogs.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
fn init_logging(args: &Args, config: &Config) {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(args.log_level(config.general.verbose))
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

/// Fetch or load comments, export them and write the insights.
async fn run(args: Args, config: Config) -> Result<()> {
    let start_time = Instant::now();

    let (video, comments) = match args.input {
        Some(ref input) => load_input(input)?,
        None => fetch_from_api(&args, &config).await?,
    };

    if !args.quiet {
        print_video_summary(&video, comments.len());
    }

    if comments.is_empty() {
        warn!("No comments to analyze");
    }

    let run_info = args.run_info(config.general.format, config.api.order);
    let report = if args.no_insights {
        None
    } else {
        Some(analysis::analyze(&comments, &video, &config.insights))
    };

    if args.no_export {
        if let Some(ref report) = report {
            println!("\n{}", report::generate_insights_text(report));
        }
    } else {
        let dir = export_all(&config, &video, &comments, &run_info, report.as_ref())?;
        if let Some(ref report) = report {
            if !args.quiet {
                println!("\n{}", report::generate_insights_text(report));
            }
        }
        println!("\n✅ Analysis complete! Files saved to: {}", dir.display());
    }

    debug!("Finished in {:.1}s", start_time.elapsed().as_secs_f64());
    Ok(())
}

/// Load configuration from file or use defaults, then apply CLI overrides.
///
/// Runs before logging is set up, so problems go straight to stderr.
fn load_config(args: &Args) -> Result<Config> {
    let mut config = match args.config {
        Some(ref config_path) => Config::load(config_path)?,
        None => match Config::load_default() {
            Ok(Some(config)) => config,
            Ok(None) => Config::default(),
            Err(e) => {
                eprintln!("⚠️  Ignoring {}: {:#}", CONFIG_FILE_NAME, e);
                Config::default()
            }
        },
    };

    config.merge_with_args(args);
    Ok(config)
}

/// Read a previous JSON export.
fn load_input(input: &Path) -> Result<(VideoMetadata, Vec<Comment>)> {
    info!("Loading comments from: {}", input.display());
    let (comments, exported) = report::load_comments_json(input)?;

    let video = match exported {
        Some(v) => VideoMetadata {
            id: v.id,
            title: v.title,
            channel: v.channel,
            published_at: v.published_at,
            comment_count: comments.len() as u64,
            ..Default::default()
        },
        None => VideoMetadata {
            id: "local".to_string(),
            title: input
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "comments".to_string()),
            comment_count: comments.len() as u64,
            ..Default::default()
        },
    };

    Ok((video, comments))
}

/// Fetch video metadata and comments from the YouTube Data API.
async fn fetch_from_api(args: &Args, config: &Config) -> Result<(VideoMetadata, Vec<Comment>)> {
    let api_key = args
        .api_key
        .clone()
        .filter(|key| !key.trim().is_empty())
        .ok_or(FetchError::MissingApiKey)?;

    let input = args.video.as_deref().unwrap_or_default();
    let video_id = youtube::extract_video_id(input)?;
    info!("Video ID: {}", video_id);

    let client = YouTubeClient::new(&config.api.base_url, api_key, config.api.timeout_seconds)?;

    if !args.quiet {
        println!("📹 Fetching video information...");
    }
    let video = client.video_info(&video_id).await?;

    let options = FetchOptions {
        max_comments: args.max_comments,
        order: config.api.order,
        page_size: config.api.page_size,
        request_delay: Duration::from_millis(config.api.request_delay_ms),
        show_progress: !args.quiet,
    };

    let comments = youtube::fetch_comments(&client, &video_id, &options).await?;
    Ok((video, comments))
}

fn print_video_summary(video: &VideoMetadata, fetched: usize) {
    println!("\n📹 Video: {}", video.title);
    println!("   Channel: {}", video.channel);
    if video.view_count > 0 {
        println!("   Views: {}", report::generator::thousands(video.view_count));
    }
    println!("   Comments: {}", report::generator::thousands(fetched));
}

/// Write comments, README and (optionally) insights into a fresh output directory.
fn export_all(
    config: &Config,
    video: &VideoMetadata,
    comments: &[Comment],
    run_info: &RunInfo,
    report: Option<&InsightReport>,
) -> Result<PathBuf> {
    let now = Utc::now();
    let dir = report::output_directory(Path::new(&config.general.output_dir), video, now);
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create output directory {}", dir.display()))?;
    info!("Output directory: {}", dir.display());

    let format = config.general.format;
    let comments_file = format!("comments.{}", format.extension());
    report::write_export(
        &dir.join(&comments_file),
        format,
        comments,
        Some(video),
        Some(run_info),
    )?;
    println!("💾 Exported {} comments to {}", comments.len(), comments_file);

    if let Some(report) = report {
        let insights_path = dir.join("insights.txt");
        let content = report::generate_insights_file(report, Some(run_info), now);
        std::fs::write(&insights_path, content)
            .with_context(|| format!("Failed to write {}", insights_path.display()))?;
        println!("📊 Insights saved to insights.txt");
    }

    let readme = report::generate_readme(video, run_info, comments.len(), &comments_file, now);
    let readme_path = dir.join("README.md");
    std::fs::write(&readme_path, readme)
        .with_context(|| format!("Failed to write {}", readme_path.display()))?;

    Ok(dir)
}
