//! Comment aggregation and engagement statistics.
//!
//! This module computes the counts, averages and like distribution
//! reported for a video's comments.

use super::keywords::rank_by_count;
use crate::models::{
    truncate_chars, AuthorActivity, Comment, CommentStats, EngagementHealth, EngagementPatterns,
    PeakHour, TopComment,
};
use chrono::{DateTime, Timelike, Utc};

/// Average likes above which engagement is excellent.
pub const EXCELLENT_AVG_LIKES: f64 = 5.0;
/// Average likes from which engagement is good.
pub const GOOD_AVG_LIKES: f64 = 2.0;

/// Round to one decimal place.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Compute basic counts and averages.
///
/// A comment counts as high engagement when its likes exceed
/// `high_engagement_multiplier` times the average.
pub fn basic_stats(comments: &[Comment], high_engagement_multiplier: f64) -> CommentStats {
    let total_comments = comments.len();
    if total_comments == 0 {
        return CommentStats::default();
    }

    let replies = comments.iter().filter(|c| c.is_reply).count();
    let total_likes: u64 = comments.iter().map(|c| c.like_count).sum();
    let avg_likes = total_likes as f64 / total_comments as f64;
    let total_length: usize = comments.iter().map(Comment::char_len).sum();

    let threshold = avg_likes * high_engagement_multiplier;
    let high_engagement_count = comments
        .iter()
        .filter(|c| c.like_count as f64 > threshold)
        .count();

    CommentStats {
        total_comments,
        top_level_comments: total_comments - replies,
        replies,
        reply_percentage: round1(100.0 * replies as f64 / total_comments as f64),
        total_likes,
        avg_likes,
        high_engagement_count,
        avg_comment_length: total_length as f64 / total_comments as f64,
        most_active_authors: most_active_authors(comments, 5),
    }
}

/// Authors with the most comments, ties in first-seen order.
pub fn most_active_authors(comments: &[Comment], n: usize) -> Vec<AuthorActivity> {
    let mut ranked = rank_by_count(comments.iter().map(|c| c.author.clone()));
    ranked.truncate(n);
    ranked
        .into_iter()
        .map(|(author, comments)| AuthorActivity { author, comments })
        .collect()
}

/// Label the average likes per comment.
pub fn engagement_health(total_comments: usize, avg_likes: f64) -> EngagementHealth {
    if total_comments == 0 {
        EngagementHealth::NotAvailable
    } else if avg_likes > EXCELLENT_AVG_LIKES {
        EngagementHealth::Excellent
    } else if avg_likes >= GOOD_AVG_LIKES {
        EngagementHealth::Good
    } else {
        EngagementHealth::NeedsImprovement
    }
}

/// Sort comments by likes, most liked first, keeping input order on ties.
pub fn sort_by_likes(comments: &[Comment]) -> Vec<&Comment> {
    let mut sorted: Vec<&Comment> = comments.iter().collect();
    sorted.sort_by_key(|c| std::cmp::Reverse(c.like_count));
    sorted
}

/// UTC hour of day a comment was published, if the timestamp parses.
fn published_hour(comment: &Comment) -> Option<u32> {
    DateTime::parse_from_rfc3339(&comment.published_at)
        .ok()
        .map(|dt| dt.with_timezone(&Utc).hour())
}

/// Like distribution, top comments and peak activity hours.
pub fn analyze_engagement_patterns(comments: &[Comment]) -> EngagementPatterns {
    if comments.is_empty() {
        return EngagementPatterns::default();
    }

    let mut likes: Vec<u64> = comments.iter().map(|c| c.like_count).collect();
    likes.sort_unstable_by(|a, b| b.cmp(a));

    let top_comments = sort_by_likes(comments)
        .into_iter()
        .take(5)
        .map(|c| TopComment {
            author: c.author.clone(),
            likes: c.like_count,
            text_preview: truncate_chars(&c.text, 100),
        })
        .collect();

    let mut hours = rank_by_count(comments.iter().filter_map(published_hour));
    hours.truncate(3);

    let peak_hours = hours
        .into_iter()
        .map(|(hour, comments)| PeakHour { hour, comments })
        .collect();

    EngagementPatterns {
        max_likes: likes[0],
        median_likes: likes[likes.len() / 2],
        top_comments,
        peak_hours,
    }
}
