//! Raw comment export in JSON, CSV and Markdown.

use super::generator::thousands;
use crate::models::{Comment, ExportFormat, RunInfo, VideoMetadata};
use anyhow::{anyhow, bail, Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

/// Video details carried in the JSON export header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportedVideo {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub channel: String,
    #[serde(default)]
    pub published_at: String,
}

/// Header of a JSON export.
#[derive(Debug, Clone, Serialize)]
pub struct ExportMetadata {
    /// RFC 3339 export time. Older exports may omit the offset.
    pub exported_at: String,
    pub total_comments: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video: Option<ExportedVideo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<RunInfo>,
}

/// A JSON export: metadata envelope plus the comments.
#[derive(Debug, Clone, Serialize)]
pub struct CommentExport {
    pub metadata: ExportMetadata,
    pub comments: Vec<Comment>,
}

/// Build the JSON export content.
pub fn generate_json_export(
    comments: &[Comment],
    video: Option<&VideoMetadata>,
    run: Option<&RunInfo>,
    exported_at: DateTime<Utc>,
) -> Result<String> {
    let export = CommentExport {
        metadata: ExportMetadata {
            exported_at: exported_at.to_rfc3339(),
            total_comments: comments.len(),
            video: video.map(|v| ExportedVideo {
                id: v.id.clone(),
                title: v.title.clone(),
                url: v.url(),
                channel: v.channel.clone(),
                published_at: v.published_at.clone(),
            }),
            command: run.cloned(),
        },
        comments: comments.to_vec(),
    };

    serde_json::to_string_pretty(&export).map_err(Into::into)
}

/// Quote a CSV field when it contains a delimiter, quote or line break.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

const CSV_COLUMNS: &[&str] = &[
    "comment_id",
    "author",
    "author_channel_id",
    "text",
    "text_original",
    "like_count",
    "published_at",
    "updated_at",
    "is_reply",
    "parent_comment_id",
    "can_reply",
];

/// Build the CSV export: `#` header lines, then one row per comment.
pub fn generate_csv_export(
    comments: &[Comment],
    video: Option<&VideoMetadata>,
    run: Option<&RunInfo>,
    exported_at: DateTime<Utc>,
) -> String {
    let mut output = String::new();

    output.push_str("# YouTube Comment Export\n");
    output.push_str(&format!("# Exported: {}\n", exported_at.to_rfc3339()));
    output.push_str(&format!("# Total Comments: {}\n", comments.len()));
    if let Some(video) = video {
        output.push_str(&format!("# Video: {}\n", video.title));
        output.push_str(&format!("# URL: {}\n", video.url()));
        output.push_str(&format!("# Channel: {}\n", video.channel));
    }
    if let Some(run) = run {
        output.push_str(&format!("# Command: {}\n", run.original_command));
        output.push_str(&format!(
            "# Max Comments: {}\n",
            run.max_comments
                .map(|m| m.to_string())
                .unwrap_or_else(|| "All".to_string())
        ));
    }
    output.push_str("#\n");

    output.push_str(&CSV_COLUMNS.join(","));
    output.push('\n');

    for c in comments {
        let row = [
            csv_field(&c.comment_id),
            csv_field(&c.author),
            csv_field(&c.author_channel_id),
            csv_field(&c.text),
            csv_field(&c.text_original),
            c.like_count.to_string(),
            csv_field(&c.published_at),
            csv_field(&c.updated_at),
            c.is_reply.to_string(),
            csv_field(c.parent_comment_id.as_deref().unwrap_or("")),
            c.can_reply.to_string(),
        ];
        output.push_str(&row.join(","));
        output.push('\n');
    }

    output
}

/// Build the Markdown export.
pub fn generate_markdown_export(
    comments: &[Comment],
    video: Option<&VideoMetadata>,
    run: Option<&RunInfo>,
    exported_at: DateTime<Utc>,
) -> String {
    let mut output = String::new();

    if let Some(video) = video {
        output.push_str(&format!("# YouTube Comments: {}\n\n", video.title));
        output.push_str(&format!(
            "**🔗 Video URL:** [Watch on YouTube]({})\n",
            video.url()
        ));
        output.push_str(&format!("**📺 Channel:** {}\n", video.channel));
        output.push_str(&format!("**📅 Published:** {}\n", video.published_at));
        output.push_str(&format!(
            "**👁️ View Count:** {}\n",
            thousands(video.view_count)
        ));
        output.push_str(&format!(
            "**💬 Total Comments:** {}\n",
            thousands(video.comment_count)
        ));
        output.push_str(&format!("**🆔 Video ID:** {}\n\n", video.id));

        if let Some(run) = run {
            output.push_str("## Analysis Details\n\n");
            output.push_str(&format!("**📊 Exported:** {}\n", exported_at.to_rfc3339()));
            output.push_str(&format!("**💻 Command:** `{}`\n", run.original_command));
            output.push_str(&format!(
                "**🔢 Comments Analyzed:** {}\n",
                thousands(comments.len())
            ));
            output.push_str(&format!(
                "**⚙️ Max Comments:** {}\n",
                run.max_comments
                    .map(thousands)
                    .unwrap_or_else(|| "All".to_string())
            ));
            output.push_str(&format!("**📋 Format:** {}\n\n", run.format));
        }

        output.push_str("---\n\n");
    }

    output.push_str(&format!(
        "## Comments ({} total)\n\n",
        thousands(comments.len())
    ));

    for (i, comment) in comments.iter().enumerate() {
        let prefix = if comment.is_reply { "  > " } else { "" };
        output.push_str(&format!("### Comment {}\n\n", i + 1));
        output.push_str(&format!("**👤 Author:** {}\n", comment.author));
        output.push_str(&format!("**📅 Posted:** {}\n", comment.published_at));
        output.push_str(&format!("**👍 Likes:** {}\n\n", comment.like_count));
        output.push_str(&format!("{}{}\n\n", prefix, comment.text));
        output.push_str("---\n\n");
    }

    output
}

/// Render comments in `format`.
pub fn generate_export(
    format: ExportFormat,
    comments: &[Comment],
    video: Option<&VideoMetadata>,
    run: Option<&RunInfo>,
    exported_at: DateTime<Utc>,
) -> Result<String> {
    match format {
        ExportFormat::Json => generate_json_export(comments, video, run, exported_at),
        ExportFormat::Csv => Ok(generate_csv_export(comments, video, run, exported_at)),
        ExportFormat::Markdown => Ok(generate_markdown_export(
            comments,
            video,
            run,
            exported_at,
        )),
    }
}

/// Write comments to `path` in `format`.
pub fn write_export(
    path: &Path,
    format: ExportFormat,
    comments: &[Comment],
    video: Option<&VideoMetadata>,
    run: Option<&RunInfo>,
) -> Result<()> {
    let content = generate_export(format, comments, video, run, Utc::now())?;
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write comments to {}", path.display()))
}

/// Read comments from a JSON export, or a bare JSON array of comments.
///
/// Only the comments and the video header are read from an export. Other
/// metadata is ignored so exports from older versions still load.
pub fn load_comments_json(path: &Path) -> Result<(Vec<Comment>, Option<ExportedVideo>)> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read comments file: {}", path.display()))?;

    let value: Value = serde_json::from_str(&content)
        .with_context(|| format!("Invalid JSON in {}", path.display()))?;

    parse_comments_value(value)
        .with_context(|| format!("Unsupported comment file {}", path.display()))
}

fn parse_comments_value(value: Value) -> Result<(Vec<Comment>, Option<ExportedVideo>)> {
    match value {
        Value::Array(items) => Ok((parse_comment_list(items, "")?, None)),
        Value::Object(mut export) => {
            let items = match export.remove("comments") {
                Some(Value::Array(items)) => items,
                Some(_) => bail!("export envelope: `comments` is not an array"),
                None => bail!("export envelope: missing `comments` array"),
            };

            let video = match export
                .get_mut("metadata")
                .and_then(|m| m.get_mut("video"))
                .map(Value::take)
            {
                None | Some(Value::Null) => None,
                Some(video) => Some(
                    serde_json::from_value(video)
                        .context("export envelope: invalid `metadata.video`")?,
                ),
            };

            Ok((parse_comment_list(items, "comments")?, video))
        }
        _ => Err(anyhow!(
            "expected an export envelope object or an array of comments"
        )),
    }
}

fn parse_comment_list(items: Vec<Value>, prefix: &str) -> Result<Vec<Comment>> {
    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| {
            serde_json::from_value(item).with_context(|| format!("{}[{}]", prefix, i))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::test_support::{comment, reply};
    use crate::models::CommentOrder;
    use chrono::TimeZone;

    fn video() -> VideoMetadata {
        VideoMetadata {
            id: "abcdefghijk".to_string(),
            title: "Rootless Podman".to_string(),
            channel: "ContainerCodes".to_string(),
            published_at: "2024-04-30T12:00:00Z".to_string(),
            view_count: 1200,
            ..Default::default()
        }
    }

    fn exported_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 3, 8, 30, 0).unwrap()
    }

    fn run_info() -> RunInfo {
        RunInfo {
            original_command: "comment-insights abcdefghijk".to_string(),
            max_comments: None,
            format: ExportFormat::Markdown,
            order: CommentOrder::Time,
            insights_enabled: true,
            export_enabled: true,
        }
    }

    #[test]
    fn test_csv_field_quoting() {
        assert_eq!(csv_field("plain"), "plain");
        assert_eq!(csv_field("a,b"), "\"a,b\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(csv_field("two\nlines"), "\"two\nlines\"");
    }

    #[test]
    fn test_generate_csv_export() {
        let comments = vec![comment("Hello, world", 3), reply("thanks", 0)];
        let csv = generate_csv_export(&comments, Some(&video()), None, exported_at());

        assert!(csv.starts_with("# YouTube Comment Export\n"));
        assert!(csv.contains("# Total Comments: 2\n"));
        assert!(csv.contains("# Video: Rootless Podman\n"));
        assert!(csv.contains(&CSV_COLUMNS.join(",")));
        assert!(csv.contains("\"Hello, world\""));
        assert!(csv.contains(",true,parent,"));
    }

    #[test]
    fn test_generate_markdown_export() {
        let comments = vec![comment("Top level", 3), reply("A reply", 1)];
        let md =
            generate_markdown_export(&comments, Some(&video()), Some(&run_info()), exported_at());

        assert!(md.contains("# YouTube Comments: Rootless Podman"));
        assert!(md.contains("**👁️ View Count:** 1,200"));
        assert!(md.contains("**⚙️ Max Comments:** All"));
        assert!(md.contains("## Comments (2 total)"));
        assert!(md.contains("### Comment 2"));
        assert!(md.contains("  > A reply"));
    }

    #[test]
    fn test_json_export_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("comments.json");
        let comments = vec![comment("first", 2), reply("second", 1)];

        write_export(
            &path,
            ExportFormat::Json,
            &comments,
            Some(&video()),
            Some(&run_info()),
        )
        .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"total_comments\": 2"));
        assert!(content.contains("\"url\": \"https://www.youtube.com/watch?v=abcdefghijk\""));

        let (loaded, exported_video) = load_comments_json(&path).unwrap();
        assert_eq!(loaded, comments);
        assert_eq!(exported_video.unwrap().title, "Rootless Podman");
    }

    #[test]
    fn test_load_bare_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bare.json");
        std::fs::write(
            &path,
            r#"[{"comment_id": "x", "author": "a", "text": "hi?", "like_count": 4, "is_reply": true}]"#,
        )
        .unwrap();

        let (loaded, video) = load_comments_json(&path).unwrap();
        assert_eq!(loaded.len(), 1);
        assert!(loaded[0].is_reply);
        assert!(video.is_none());
    }

    #[test]
    fn test_load_export_with_naive_timestamp() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("comments.json");
        std::fs::write(
            &path,
            r#"{
  "metadata": {
    "exported_at": "2024-05-03T08:30:00.123456",
    "total_comments": 2,
    "video": {
      "id": "abcdefghijk",
      "title": "Rootless Podman",
      "url": "https://www.youtube.com/watch?v=abcdefghijk",
      "channel": "ContainerCodes",
      "published_at": "2024-04-30T12:00:00Z"
    },
    "command": {
      "original_command": "youtube-content-scraper.py abcdefghijk",
      "max_comments": 100,
      "format": "json",
      "scraper_type": "complete_content"
    }
  },
  "comments": [
    {
      "comment_id": "c1",
      "author": "Alice",
      "author_channel_id": "UC1",
      "text": "Can you cover networking?",
      "text_original": "Can you cover networking?",
      "like_count": 7,
      "published_at": "2024-05-01T14:03:00Z",
      "updated_at": "2024-05-01T14:03:00Z",
      "is_reply": false,
      "parent_comment_id": null,
      "can_reply": true
    },
    {
      "comment_id": "c1.r1",
      "author": "Bob",
      "author_channel_id": "",
      "text": "Seconded",
      "text_original": "Seconded",
      "like_count": 1,
      "published_at": "2024-05-01T15:00:00Z",
      "updated_at": "2024-05-01T15:00:00Z",
      "is_reply": true,
      "parent_comment_id": "c1",
      "can_reply": false
    }
  ]
}"#,
        )
        .unwrap();

        let (loaded, video) = load_comments_json(&path).unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[1].parent_comment_id.as_deref(), Some("c1"));
        assert_eq!(video.unwrap().channel, "ContainerCodes");
    }

    #[test]
    fn test_load_reports_failing_comment() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("comments.json");
        std::fs::write(
            &path,
            r#"{"metadata": {}, "comments": [
                {"comment_id": "a", "author": "x", "text": "ok", "like_count": 1},
                {"comment_id": "b", "author": "y", "text": "no likes"}
            ]}"#,
        )
        .unwrap();

        let err = load_comments_json(&path).unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.contains("comments[1]"), "{}", message);
        assert!(message.contains("like_count"), "{}", message);
    }

    #[test]
    fn test_load_rejects_other_shapes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("comments.json");

        std::fs::write(&path, r#"{"metadata": {}}"#).unwrap();
        let message = format!("{:#}", load_comments_json(&path).unwrap_err());
        assert!(message.contains("missing `comments`"), "{}", message);

        std::fs::write(&path, "42").unwrap();
        let message = format!("{:#}", load_comments_json(&path).unwrap_err());
        assert!(message.contains("array of comments"), "{}", message);
    }

    #[test]
    fn test_load_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(load_comments_json(&path).is_err());
    }
}
