//! Insights report generation.
//!
//! This module renders the plain-text insights report and the
//! overview README written next to the exported comments.

use crate::models::{truncate_chars, InsightReport, RunInfo, VideoMetadata};
use chrono::{DateTime, Utc};

const RULE_WIDTH: usize = 50;

/// Group digits with commas, e.g. `1234567` becomes `1,234,567`.
pub fn thousands<T: ToString>(value: T) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Generate the insights text for a report.
pub fn generate_insights_text(report: &InsightReport) -> String {
    let mut output = String::new();

    output.push_str("📊 COMMENT ANALYSIS INSIGHTS\n");
    output.push_str(&"=".repeat(RULE_WIDTH));
    output.push('\n');

    output.push_str(&generate_stats_section(report));
    output.push_str(&generate_topics_section(report));
    output.push_str(&generate_questions_section(report));
    output.push_str(&generate_requests_section(report));
    output.push_str(&generate_authors_section(report));
    output.push_str(&generate_peak_hours_section(report));
    output.push_str(&generate_suggestions_section(report));
    output.push_str(&generate_audience_section(report));

    output.push_str(&format!(
        "\n{} ENGAGEMENT HEALTH: {}\n",
        report.health.emoji(),
        report.health
    ));

    output
}

fn generate_stats_section(report: &InsightReport) -> String {
    let stats = &report.stats;
    let mut section = String::new();

    section.push_str(&format!(
        "💬 Total Comments: {}\n",
        thousands(stats.total_comments)
    ));
    section.push_str(&format!(
        "   ├─ Top-level: {}\n",
        thousands(stats.top_level_comments)
    ));
    section.push_str(&format!(
        "   └─ Replies: {} ({:.1}%)\n",
        thousands(stats.replies),
        stats.reply_percentage
    ));
    section.push_str(&format!(
        "👍 Engagement: {} total likes\n",
        thousands(stats.total_likes)
    ));
    section.push_str(&format!(
        "   ├─ Average: {:.1} likes per comment\n",
        stats.avg_likes
    ));
    section.push_str(&format!(
        "   └─ High engagement: {} comments\n",
        stats.high_engagement_count
    ));
    section.push_str(&format!(
        "📝 Average comment length: {:.0} characters\n",
        stats.avg_comment_length
    ));

    section
}

fn generate_topics_section(report: &InsightReport) -> String {
    if report.keywords.is_empty() {
        return String::new();
    }

    let mut section = String::from("\n🎯 TOP DISCUSSION TOPICS:\n");
    for (i, keyword) in report.keywords.iter().take(8).enumerate() {
        section.push_str(&format!(
            "   {:2}. {} ({} mentions)\n",
            i + 1,
            keyword.word,
            keyword.mentions
        ));
    }
    section
}

fn generate_questions_section(report: &InsightReport) -> String {
    if report.questions.is_empty() {
        return String::new();
    }

    let mut section = String::from("\n❓ MOST ENGAGING QUESTIONS:\n");
    for (i, question) in report.questions.iter().take(3).enumerate() {
        section.push_str(&format!(
            "   {}. {}\n",
            i + 1,
            truncate_chars(&question.text, 80)
        ));
        section.push_str(&format!(
            "      └─ {} ({} likes)\n",
            question.author, question.likes
        ));
    }
    section
}

fn generate_requests_section(report: &InsightReport) -> String {
    if report.content_requests.is_empty() {
        return String::new();
    }

    let mut section = String::from("\n💡 TOP CONTENT REQUESTS:\n");
    for (i, request) in report.content_requests.iter().take(3).enumerate() {
        section.push_str(&format!(
            "   {}. {}\n",
            i + 1,
            truncate_chars(&request.text, 80)
        ));
        section.push_str(&format!(
            "      └─ {} ({} likes)\n",
            request.author, request.likes
        ));
    }
    section
}

fn generate_authors_section(report: &InsightReport) -> String {
    let authors = &report.stats.most_active_authors;
    if authors.is_empty() {
        return String::new();
    }

    let mut section = String::from("\n🏆 MOST ACTIVE COMMENTERS:\n");
    for (i, activity) in authors.iter().take(3).enumerate() {
        section.push_str(&format!(
            "   {}. {} ({} comments)\n",
            i + 1,
            activity.author,
            activity.comments
        ));
    }
    section
}

fn generate_peak_hours_section(report: &InsightReport) -> String {
    if report.engagement.peak_hours.is_empty() {
        return String::new();
    }

    let mut section = String::from("\n⏰ PEAK ACTIVITY HOURS (UTC):\n");
    for peak in &report.engagement.peak_hours {
        section.push_str(&format!(
            "   • {:02}:00 - {} comments\n",
            peak.hour, peak.comments
        ));
    }
    section
}

fn generate_suggestions_section(report: &InsightReport) -> String {
    if report.suggestions.is_empty() {
        return String::new();
    }

    let mut section = String::from("\n🚀 SUGGESTED FUTURE VIDEO TOPICS:\n");
    for (i, suggestion) in report.suggestions.iter().take(6).enumerate() {
        section.push_str(&format!(
            "   {}. {} {} [{}]\n",
            i + 1,
            suggestion.priority.emoji(),
            suggestion.title,
            suggestion.priority
        ));
        match suggestion.source_question {
            Some(ref question) => section.push_str(&format!(
                "      └─ From question: {}\n",
                truncate_chars(question, 60)
            )),
            None => section.push_str(&format!(
                "      └─ Based on {} mentions of '{}'\n",
                suggestion.mentions, suggestion.based_on_topic
            )),
        }
    }
    section
}

fn generate_audience_section(report: &InsightReport) -> String {
    let audience = &report.audience;
    if audience.total_classified == 0 {
        return String::new();
    }

    let dist = &audience.distribution;
    let mut section = String::from("\n👥 AUDIENCE TECHNICAL LEVEL:\n");
    section.push_str(&format!(
        "   Primary audience: {}\n",
        audience.dominant_level
    ));
    section.push_str(&format!(
        "   Distribution: Beginner {:.0}% | Intermediate {:.0}% | Advanced {:.0}%\n",
        dist.beginner, dist.intermediate, dist.advanced
    ));
    section.push_str(&format!(
        "   💡 Focus on: {}\n",
        audience.dominant_level.focus()
    ));
    section
}

/// Generate the content of `insights.txt`: a video header, then the insights.
pub fn generate_insights_file(
    report: &InsightReport,
    run: Option<&RunInfo>,
    analyzed_at: DateTime<Utc>,
) -> String {
    let video = &report.video;
    let mut output = String::new();

    output.push_str("YouTube Comment Analysis Report\n");
    output.push_str(&format!("Video: {}\n", video.title));
    output.push_str(&format!("URL: {}\n", video.url()));
    output.push_str(&format!("Channel: {}\n", video.channel));
    output.push_str(&format!("Analyzed: {}\n", analyzed_at.to_rfc3339()));
    if let Some(run) = run {
        output.push_str(&format!("Command: {}\n", run.original_command));
        output.push_str(&format!("Max Comments: {}\n", max_comments_label(run)));
    }
    output.push('\n');
    output.push_str(&"=".repeat(60));
    output.push_str("\n\n");

    output.push_str(&generate_insights_text(report));
    output
}

/// Generate the `README.md` describing an output directory.
pub fn generate_readme(
    video: &VideoMetadata,
    run: &RunInfo,
    comment_count: usize,
    comments_file: &str,
    analyzed_at: DateTime<Utc>,
) -> String {
    let mut output = String::new();

    output.push_str("# YouTube Comment Analysis\n\n");
    output.push_str(&format!(
        "**🔗 Video:** [Watch on YouTube]({})\n",
        video.url()
    ));
    output.push_str(&format!("**📺 Title:** {}\n", video.title));
    output.push_str(&format!("**🏷️ Channel:** {}\n", video.channel));
    output.push_str(&format!(
        "**📅 Analysis Date:** {}\n\n",
        analyzed_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    output.push_str("## Command Used\n\n");
    output.push_str(&format!("```bash\n{}\n```\n\n", run.original_command));

    output.push_str("## Files in this Analysis\n\n");
    output.push_str(&format!(
        "- `{}` - Raw comment data ({} comments)\n",
        comments_file,
        thousands(comment_count)
    ));
    if run.insights_enabled {
        output.push_str("- `insights.txt` - Detailed analysis and topic suggestions\n");
    }
    output.push_str("- `README.md` - This overview file\n\n");

    output.push_str("## Quick Stats\n\n");
    output.push_str(&format!(
        "- **Comments Analyzed:** {}\n",
        thousands(comment_count)
    ));
    output.push_str(&format!(
        "- **Total Video Comments:** {}\n",
        thousands(video.comment_count)
    ));
    output.push_str(&format!("- **Video Views:** {}\n", thousands(video.view_count)));
    output.push_str(&format!("- **Video Likes:** {}\n\n", thousands(video.like_count)));

    if run.insights_enabled {
        output.push_str(
            "View the `insights.txt` file for detailed analysis and content suggestions.\n",
        );
    }

    output
}

fn max_comments_label(run: &RunInfo) -> String {
    run.max_comments
        .map(thousands)
        .unwrap_or_else(|| "All".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{analyze, test_support::comment};
    use crate::config::InsightsConfig;
    use crate::models::{CommentOrder, ExportFormat};
    use chrono::TimeZone;

    fn video() -> VideoMetadata {
        VideoMetadata {
            id: "abcdefghijk".to_string(),
            title: "Podman in Production".to_string(),
            channel: "ContainerCodes".to_string(),
            published_at: "2024-04-30T12:00:00Z".to_string(),
            view_count: 15234,
            like_count: 820,
            comment_count: 61,
            ..Default::default()
        }
    }

    fn run_info() -> RunInfo {
        RunInfo {
            original_command: "comment-insights abcdefghijk -n 50".to_string(),
            max_comments: Some(50),
            format: ExportFormat::Json,
            order: CommentOrder::Time,
            insights_enabled: true,
            export_enabled: true,
        }
    }

    fn analyzed_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 3, 8, 30, 0).unwrap()
    }

    #[test]
    fn test_thousands() {
        assert_eq!(thousands(0), "0");
        assert_eq!(thousands(999), "999");
        assert_eq!(thousands(1234), "1,234");
        assert_eq!(thousands(1234567u64), "1,234,567");
    }

    #[test]
    fn test_generate_insights_text() {
        let mut comments: Vec<_> = (0..49)
            .map(|_| comment("Kubernetes networking tutorial please?", 24))
            .collect();
        comments.push(comment("Podman in production at scale", 58));

        let report = analyze(&comments, &video(), &InsightsConfig::default());
        let text = generate_insights_text(&report);

        assert!(text.contains("📊 COMMENT ANALYSIS INSIGHTS"));
        assert!(text.contains("💬 Total Comments: 50"));
        assert!(text.contains("└─ Replies: 0 (0.0%)"));
        assert!(text.contains("👍 Engagement: 1,234 total likes"));
        assert!(text.contains("Average: 24.7 likes per comment"));
        assert!(text.contains("🎯 TOP DISCUSSION TOPICS:"));
        assert!(text.contains("kubernetes (49 mentions)"));
        assert!(text.contains("🚀 SUGGESTED FUTURE VIDEO TOPICS:"));
        assert!(text.contains("👥 AUDIENCE TECHNICAL LEVEL:"));
        assert!(text.contains("🟢 ENGAGEMENT HEALTH: Excellent"));
    }

    #[test]
    fn test_generate_insights_text_empty() {
        let report = analyze(&[], &video(), &InsightsConfig::default());
        let text = generate_insights_text(&report);

        assert!(text.contains("💬 Total Comments: 0"));
        assert!(!text.contains("TOP DISCUSSION TOPICS"));
        assert!(text.contains("ENGAGEMENT HEALTH: N/A"));
    }

    #[test]
    fn test_generate_insights_file_header() {
        let report = analyze(&[comment("hello", 1)], &video(), &InsightsConfig::default());
        let text = generate_insights_file(&report, Some(&run_info()), analyzed_at());

        assert!(text.starts_with("YouTube Comment Analysis Report\n"));
        assert!(text.contains("URL: https://www.youtube.com/watch?v=abcdefghijk"));
        assert!(text.contains("Analyzed: 2024-05-03T08:30:00+00:00"));
        assert!(text.contains("Max Comments: 50"));
        assert!(text.contains("ENGAGEMENT HEALTH: Needs Improvement"));
    }

    #[test]
    fn test_generate_readme() {
        let readme = generate_readme(&video(), &run_info(), 50, "comments.json", analyzed_at());

        assert!(readme.contains("# YouTube Comment Analysis"));
        assert!(readme.contains("`comments.json` - Raw comment data (50 comments)"));
        assert!(readme.contains("**Video Views:** 15,234"));
        assert!(readme.contains("2024-05-03 08:30:00 UTC"));
        assert!(readme.contains("insights.txt"));
    }
}
