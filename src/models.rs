//! Data models for the comment insights tool.
//!
//! This module contains the records fetched from the video platform and
//! the derived structures that make up an insights report.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single comment or reply on a video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    /// Platform identifier of the comment.
    pub comment_id: String,
    /// Display name of the author.
    pub author: String,
    /// Channel id of the author (empty when unknown).
    #[serde(default)]
    pub author_channel_id: String,
    /// Rendered comment text.
    pub text: String,
    /// Text as originally typed by the author.
    #[serde(default)]
    pub text_original: String,
    /// Number of likes on the comment.
    pub like_count: u64,
    /// RFC 3339 publication timestamp.
    #[serde(default)]
    pub published_at: String,
    /// RFC 3339 last-edit timestamp.
    #[serde(default)]
    pub updated_at: String,
    /// Whether this comment is a reply to another comment.
    #[serde(default)]
    pub is_reply: bool,
    /// Id of the parent comment for replies.
    #[serde(default)]
    pub parent_comment_id: Option<String>,
    /// Whether the viewer can reply to the comment.
    #[serde(default)]
    pub can_reply: bool,
}

impl Comment {
    /// Number of characters (not bytes) in the comment text.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// Basic information about a video. Displayed, never transformed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VideoMetadata {
    pub id: String,
    pub title: String,
    pub channel: String,
    pub published_at: String,
    pub view_count: u64,
    pub like_count: u64,
    pub comment_count: u64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl VideoMetadata {
    /// Canonical watch URL of the video.
    pub fn url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.id)
    }
}

/// Order in which the platform returns comment threads.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum CommentOrder {
    /// Newest first
    #[default]
    Time,
    /// Most relevant first
    Relevance,
}

impl CommentOrder {
    /// Value expected by the `order` query parameter.
    pub fn as_param(&self) -> &'static str {
        match self {
            CommentOrder::Time => "time",
            CommentOrder::Relevance => "relevance",
        }
    }
}

impl fmt::Display for CommentOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_param())
    }
}

/// File format for the raw comment export.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// JSON with a metadata envelope (default)
    #[default]
    Json,
    /// CSV with a commented metadata header
    Csv,
    /// Markdown listing
    Markdown,
}

impl ExportFormat {
    /// File extension (without dot) for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
            ExportFormat::Markdown => "md",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Json => write!(f, "json"),
            ExportFormat::Csv => write!(f, "csv"),
            ExportFormat::Markdown => write!(f, "markdown"),
        }
    }
}

/// Details of the invocation, echoed into export headers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunInfo {
    pub original_command: String,
    pub max_comments: Option<usize>,
    pub format: ExportFormat,
    pub order: CommentOrder,
    pub insights_enabled: bool,
    pub export_enabled: bool,
}

/// Priority attached to a suggested video topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
    Emerging,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::High => write!(f, "High"),
            Priority::Medium => write!(f, "Medium"),
            Priority::Emerging => write!(f, "Emerging"),
        }
    }
}

impl Priority {
    /// Returns an emoji representation of the priority.
    pub fn emoji(&self) -> &'static str {
        match self {
            Priority::High => "🔥",
            Priority::Medium => "⭐",
            Priority::Emerging => "💡",
        }
    }

    /// Sort rank, lower comes first.
    pub fn rank(&self) -> u8 {
        match self {
            Priority::High => 0,
            Priority::Emerging => 1,
            Priority::Medium => 2,
        }
    }
}

/// Apparent technical level of a commenter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudienceLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl fmt::Display for AudienceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AudienceLevel::Beginner => write!(f, "Beginner"),
            AudienceLevel::Intermediate => write!(f, "Intermediate"),
            AudienceLevel::Advanced => write!(f, "Advanced"),
        }
    }
}

impl AudienceLevel {
    /// Content focus recommended for an audience at this level.
    pub fn focus(&self) -> &'static str {
        match self {
            AudienceLevel::Beginner => {
                "Step-by-step tutorials, basic concepts, getting started guides"
            }
            AudienceLevel::Intermediate => {
                "Best practices, real-world examples, practical implementations"
            }
            AudienceLevel::Advanced => {
                "Architecture deep-dives, performance optimization, enterprise use cases"
            }
        }
    }
}

/// Coarse label summarizing average likes per comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngagementHealth {
    Excellent,
    Good,
    NeedsImprovement,
    /// No comments were analyzed.
    NotAvailable,
}

impl fmt::Display for EngagementHealth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngagementHealth::Excellent => write!(f, "Excellent"),
            EngagementHealth::Good => write!(f, "Good"),
            EngagementHealth::NeedsImprovement => write!(f, "Needs Improvement"),
            EngagementHealth::NotAvailable => write!(f, "N/A"),
        }
    }
}

impl EngagementHealth {
    /// Returns an emoji representation of the health label.
    pub fn emoji(&self) -> &'static str {
        match self {
            EngagementHealth::Excellent => "🟢",
            EngagementHealth::Good => "🟡",
            EngagementHealth::NeedsImprovement => "🔴",
            EngagementHealth::NotAvailable => "⚪",
        }
    }
}

/// Number of comments written by one author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorActivity {
    pub author: String,
    pub comments: usize,
}

/// Counts and averages over all analyzed comments.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommentStats {
    pub total_comments: usize,
    pub top_level_comments: usize,
    pub replies: usize,
    /// Percentage of replies, rounded to one decimal place.
    pub reply_percentage: f64,
    pub total_likes: u64,
    pub avg_likes: f64,
    pub high_engagement_count: usize,
    /// Average length in characters.
    pub avg_comment_length: f64,
    pub most_active_authors: Vec<AuthorActivity>,
}

/// A keyword and how often it was mentioned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keyword {
    pub word: String,
    pub mentions: usize,
}

/// A comment that asks a question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub text: String,
    pub author: String,
    pub likes: u64,
    pub is_reply: bool,
}

/// A comment that asks for specific content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentRequest {
    pub text: String,
    pub author: String,
    pub likes: u64,
    pub matched_keywords: Vec<String>,
}

/// Preview of a highly liked comment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopComment {
    pub author: String,
    pub likes: u64,
    pub text_preview: String,
}

/// Comments posted during one hour of the day (UTC).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeakHour {
    pub hour: u32,
    pub comments: usize,
}

/// Like distribution and activity timing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngagementPatterns {
    pub max_likes: u64,
    pub median_likes: u64,
    pub top_comments: Vec<TopComment>,
    pub peak_hours: Vec<PeakHour>,
}

/// A suggested future video topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicSuggestion {
    pub title: String,
    /// Catalog keyword that produced the suggestion.
    pub based_on_topic: String,
    pub mentions: usize,
    pub avg_engagement: f64,
    pub priority: Priority,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_question: Option<String>,
}

/// Percentages over the three audience levels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LevelDistribution {
    pub beginner: f64,
    pub intermediate: f64,
    pub advanced: f64,
}

impl LevelDistribution {
    /// Sum of all three percentages.
    pub fn total(&self) -> f64 {
        self.beginner + self.intermediate + self.advanced
    }
}

/// Audience technical level classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudienceProfile {
    pub dominant_level: AudienceLevel,
    pub distribution: LevelDistribution,
    pub total_classified: usize,
}

/// The complete insights snapshot for one video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightReport {
    pub video: VideoMetadata,
    pub stats: CommentStats,
    pub keywords: Vec<Keyword>,
    pub questions: Vec<Question>,
    pub content_requests: Vec<ContentRequest>,
    pub engagement: EngagementPatterns,
    pub suggestions: Vec<TopicSuggestion>,
    pub audience: AudienceProfile,
    pub health: EngagementHealth,
}

/// Truncate `text` to at most `max` characters, appending `...` when cut.
pub fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
