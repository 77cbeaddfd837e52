//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.comment-insights.toml` files.

use crate::models::{CommentOrder, ExportFormat};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default configuration file name.
pub const CONFIG_FILE_NAME: &str = ".comment-insights.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// YouTube Data API settings.
    #[serde(default)]
    pub api: ApiConfig,

    /// Insight analysis settings.
    #[serde(default)]
    pub insights: InsightsConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Base directory for per-video output directories.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Export format for raw comments.
    #[serde(default)]
    pub format: ExportFormat,

    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            format: ExportFormat::default(),
            verbose: false,
        }
    }
}

fn default_output_dir() -> String {
    "tmp".to_string()
}

/// YouTube Data API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the Data API.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Pause between page requests in milliseconds.
    #[serde(default = "default_request_delay")]
    pub request_delay_ms: u64,

    /// Comment threads requested per page (API maximum is 100).
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Comment ordering.
    #[serde(default)]
    pub order: CommentOrder,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout(),
            request_delay_ms: default_request_delay(),
            page_size: default_page_size(),
            order: CommentOrder::default(),
        }
    }
}

fn default_base_url() -> String {
    "https://www.googleapis.com/youtube/v3".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_request_delay() -> u64 {
    1000
}

fn default_page_size() -> u32 {
    100
}

/// A catalog keyword and the video titles it suggests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicEntry {
    pub keyword: String,
    pub titles: Vec<String>,
}

/// A technology token that, found in a question, suggests one title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmergingEntry {
    pub keyword: String,
    pub title: String,
}

/// Insight analysis settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightsConfig {
    /// A comment is high-engagement when its likes exceed this multiple
    /// of the average.
    #[serde(default = "default_multiplier")]
    pub high_engagement_multiplier: f64,

    /// Minimum keyword length in characters.
    #[serde(default = "default_min_word_length")]
    pub min_word_length: usize,

    /// Number of keywords to rank.
    #[serde(default = "default_top_keywords")]
    pub top_keywords: usize,

    /// Number of questions to keep.
    #[serde(default = "default_top_questions")]
    pub top_questions: usize,

    /// Number of content requests to keep.
    #[serde(default = "default_top_requests")]
    pub top_requests: usize,

    /// Number of topic suggestions to keep.
    #[serde(default = "default_top_suggestions")]
    pub top_suggestions: usize,

    /// Words never counted as keywords.
    #[serde(default = "default_stopwords")]
    pub stopwords: Vec<String>,

    /// Topic catalog used for suggestions.
    #[serde(default = "default_topics")]
    pub topics: Vec<TopicEntry>,

    /// Technologies that produce emerging suggestions from questions.
    #[serde(default = "default_emerging")]
    pub emerging: Vec<EmergingEntry>,
}

impl Default for InsightsConfig {
    fn default() -> Self {
        Self {
            high_engagement_multiplier: default_multiplier(),
            min_word_length: default_min_word_length(),
            top_keywords: default_top_keywords(),
            top_questions: default_top_questions(),
            top_requests: default_top_requests(),
            top_suggestions: default_top_suggestions(),
            stopwords: default_stopwords(),
            topics: default_topics(),
            emerging: default_emerging(),
        }
    }
}

fn default_multiplier() -> f64 {
    2.0
}

fn default_min_word_length() -> usize {
    5
}

fn default_top_keywords() -> usize {
    15
}

fn default_top_questions() -> usize {
    10
}

fn default_top_requests() -> usize {
    10
}

fn default_top_suggestions() -> usize {
    8
}

fn default_stopwords() -> Vec<String> {
    vec![
        "this", "that", "with", "have", "will", "from", "they", "been", "were", "said", "each",
        "which", "their", "time", "would", "there", "what", "when", "where", "your", "just",
        "like", "dont", "really", "think", "know", "good", "great", "thanks", "thank", "video",
        "youtube", "channel", "subscribe", "comment", "comments",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn topic(keyword: &str, titles: [&str; 4]) -> TopicEntry {
    TopicEntry {
        keyword: keyword.to_string(),
        titles: titles.iter().map(|t| t.to_string()).collect(),
    }
}

fn default_topics() -> Vec<TopicEntry> {
    vec![
        topic(
            "kubernetes",
            [
                "Kubernetes networking deep dive",
                "K8s security best practices",
                "Helm chart optimization",
                "Kubernetes troubleshooting",
            ],
        ),
        topic(
            "docker",
            [
                "Docker vs Podman migration guide",
                "Docker security hardening",
                "Multi-stage Docker builds",
                "Docker networking explained",
            ],
        ),
        topic(
            "podman",
            [
                "Podman rootless containers",
                "Podman pods vs containers",
                "Podman systemd integration",
                "Podman desktop vs CLI",
            ],
        ),
        topic(
            "security",
            [
                "Container security scanning",
                "Runtime security with Falco",
                "Image vulnerability management",
                "Zero-trust containers",
            ],
        ),
        topic(
            "networking",
            [
                "Container networking fundamentals",
                "Service mesh with Istio",
                "Load balancing containers",
                "CNI plugins comparison",
            ],
        ),
        topic(
            "buildah",
            [
                "Buildah vs Docker build",
                "Scriptable container builds",
                "Multi-arch builds with Buildah",
                "OCI image creation",
            ],
        ),
        topic(
            "skopeo",
            [
                "Image registry management",
                "Container image signing",
                "Air-gapped image workflows",
                "Image inspection tools",
            ],
        ),
        topic(
            "production",
            [
                "Production container deployment",
                "Container monitoring setup",
                "Logging best practices",
                "Auto-scaling containers",
            ],
        ),
        topic(
            "performance",
            [
                "Container performance tuning",
                "Resource optimization",
                "Memory management in containers",
                "Container benchmarking",
            ],
        ),
        topic(
            "orchestration",
            [
                "Container orchestration comparison",
                "Docker Swarm vs Kubernetes",
                "Nomad for containers",
                "Container scheduling",
            ],
        ),
        topic(
            "monitoring",
            [
                "Prometheus for containers",
                "Grafana dashboards",
                "Container metrics collection",
                "Alerting strategies",
            ],
        ),
        topic(
            "storage",
            [
                "Container persistent storage",
                "Volume management",
                "Storage drivers comparison",
                "Data backup strategies",
            ],
        ),
        topic(
            "cicd",
            [
                "Container CI/CD pipelines",
                "GitOps workflows",
                "Automated testing",
                "Deployment strategies",
            ],
        ),
        topic(
            "compose",
            [
                "Docker Compose advanced features",
                "Multi-environment setups",
                "Compose vs Kubernetes",
                "Development workflows",
            ],
        ),
    ]
}

fn default_emerging() -> Vec<EmergingEntry> {
    [
        ("ai", "AI and Machine Learning in Containers"),
        ("serverless", "Serverless Containers with Knative"),
        ("wasm", "WebAssembly and Container Runtime"),
        ("edge", "Edge Computing with Containers"),
        ("arm", "ARM/M1 Container Development"),
        ("windows", "Windows Container Development"),
        ("microservices", "Microservices Architecture Patterns"),
        ("observability", "Container Observability Stack"),
        ("gitops", "GitOps Deployment Workflows"),
        ("helm", "Advanced Helm Chart Development"),
    ]
    .into_iter()
    .map(|(keyword, title)| EmergingEntry {
        keyword: keyword.to_string(),
        title: title.to_string(),
    })
    .collect()
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(CONFIG_FILE_NAME);

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings.
    /// This method only overrides config when CLI provides explicit values.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref output) = args.output {
            self.general.output_dir = output.display().to_string();
        }
        if let Some(format) = args.format {
            self.general.format = format;
        }
        if let Some(order) = args.order {
            self.api.order = order;
        }
        if let Some(delay) = args.request_delay_ms {
            self.api.request_delay_ms = delay;
        }

        // Flags always override
        if args.verbose {
            self.general.verbose = true;
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}
