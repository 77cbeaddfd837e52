//! Insight analysis over fetched comments.
//!
//! Every function here is a pure pass over an in-memory comment list.
//! [`analyze`] runs all of them and assembles the report.

pub mod aggregator;
pub mod audience;
pub mod keywords;
pub mod topics;

pub use aggregator::{analyze_engagement_patterns, basic_stats, engagement_health};
pub use audience::analyze_audience_level;
pub use keywords::extract_keywords;
pub use topics::{find_questions, identify_content_requests, suggest_future_topics};

use crate::config::InsightsConfig;
use crate::models::{Comment, InsightReport, VideoMetadata};
use tracing::debug;

/// Compute the full insights report for a video's comments.
pub fn analyze(
    comments: &[Comment],
    video: &VideoMetadata,
    config: &InsightsConfig,
) -> InsightReport {
    debug!("Analyzing {} comments for video {}", comments.len(), video.id);

    let stats = basic_stats(comments, config.high_engagement_multiplier);
    let health = engagement_health(stats.total_comments, stats.avg_likes);

    InsightReport {
        video: video.clone(),
        keywords: extract_keywords(
            comments,
            &config.stopwords,
            config.min_word_length,
            config.top_keywords,
        ),
        questions: find_questions(comments, config.top_questions),
        content_requests: identify_content_requests(comments, config.top_requests),
        engagement: analyze_engagement_patterns(comments),
        suggestions: suggest_future_topics(
            comments,
            &config.topics,
            &config.emerging,
            config.top_suggestions,
        ),
        audience: analyze_audience_level(comments),
        health,
        stats,
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::models::Comment;

    /// A top-level comment with the given text and likes.
    pub fn comment(text: &str, likes: u64) -> Comment {
        comment_at(text, likes, "2024-05-01T12:00:00Z")
    }

    /// A top-level comment published at `published_at`.
    pub fn comment_at(text: &str, likes: u64, published_at: &str) -> Comment {
        Comment {
            comment_id: format!("c-{}", text.len()),
            author: "viewer".to_string(),
            author_channel_id: String::new(),
            text: text.to_string(),
            text_original: text.to_string(),
            like_count: likes,
            published_at: published_at.to_string(),
            updated_at: published_at.to_string(),
            is_reply: false,
            parent_comment_id: None,
            can_reply: true,
        }
    }

    /// A reply to comment `parent`.
    pub fn reply(text: &str, likes: u64) -> Comment {
        Comment {
            is_reply: true,
            parent_comment_id: Some("parent".to_string()),
            ..comment(text, likes)
        }
    }
}
