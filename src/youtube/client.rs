//! YouTube Data API v3 client.
//!
//! Talks to the `videos` and `commentThreads` endpoints over reqwest and
//! maps API error bodies onto [`FetchError`].

use super::error::{FetchError, Result};
use super::{CommentPage, CommentSource, PageRequest};
use crate::models::{Comment, VideoMetadata};
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};

/// Client for the parts of the Data API this tool needs.
pub struct YouTubeClient {
    http_client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl YouTubeClient {
    /// Create a client for `base_url` authenticated by `api_key`.
    pub fn new(base_url: &str, api_key: String, timeout_seconds: u64) -> Result<Self> {
        if api_key.trim().is_empty() {
            return Err(FetchError::MissingApiKey);
        }

        info!("Initializing YouTube client for {}", base_url);

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()?;

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    async fn get(&self, endpoint: &str, query: &[(&str, &str)], video_id: &str) -> Result<String> {
        let url = format!("{}/{}", self.base_url, endpoint);
        debug!("GET {} {:?}", url, query);

        let response = self
            .http_client
            .get(&url)
            .query(query)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(classify_error(status, &body, video_id));
        }

        Ok(body)
    }
}

impl CommentSource for YouTubeClient {
    async fn video_info(&self, video_id: &str) -> Result<VideoMetadata> {
        let body = self
            .get(
                "videos",
                &[("part", "snippet,statistics"), ("id", video_id)],
                video_id,
            )
            .await?;

        parse_video_response(&body, video_id)
    }

    async fn comment_page(&self, request: &PageRequest<'_>) -> Result<CommentPage> {
        let max_results = request.max_results.to_string();
        let mut query = vec![
            ("part", "snippet,replies"),
            ("videoId", request.video_id),
            ("order", request.order.as_param()),
            ("maxResults", max_results.as_str()),
            ("textFormat", "plainText"),
        ];
        if let Some(token) = request.page_token {
            query.push(("pageToken", token));
        }

        let body = self.get("commentThreads", &query, request.video_id).await?;
        parse_thread_response(&body)
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    errors: Vec<ApiErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    #[serde(default)]
    reason: String,
}

/// Map a non-success response onto the error taxonomy.
fn classify_error(status: StatusCode, body: &str, video_id: &str) -> FetchError {
    let parsed = serde_json::from_str::<ApiErrorEnvelope>(body).ok();
    let message = parsed
        .as_ref()
        .map(|e| e.error.message.clone())
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| body.trim().to_string());
    let reasons: Vec<&str> = parsed
        .as_ref()
        .map(|e| e.error.errors.iter().map(|d| d.reason.as_str()).collect())
        .unwrap_or_default();

    let has = |reason: &str| reasons.iter().any(|r| *r == reason);

    if has("commentsDisabled") {
        FetchError::CommentsDisabled {
            video_id: video_id.to_string(),
        }
    } else if has("quotaExceeded") || has("dailyLimitExceeded") || has("rateLimitExceeded") {
        FetchError::QuotaExceeded { message }
    } else if has("keyInvalid")
        || has("keyExpired")
        || message.contains("API key not valid")
        || status == StatusCode::UNAUTHORIZED
    {
        FetchError::InvalidApiKey { message }
    } else if has("videoNotFound") || status == StatusCode::NOT_FOUND {
        FetchError::VideoNotFound {
            video_id: video_id.to_string(),
        }
    } else {
        FetchError::Api {
            status: status.as_u16(),
            message,
        }
    }
}

#[derive(Debug, Deserialize)]
struct VideoListResponse {
    #[serde(default)]
    items: Vec<VideoItem>,
}

#[derive(Debug, Deserialize)]
struct VideoItem {
    snippet: VideoSnippet,
    #[serde(default)]
    statistics: VideoStatistics,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoSnippet {
    title: String,
    channel_title: String,
    published_at: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    tags: Vec<String>,
}

// Counts arrive as decimal strings.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoStatistics {
    view_count: Option<String>,
    like_count: Option<String>,
    comment_count: Option<String>,
}

fn parse_count(value: &Option<String>) -> u64 {
    value.as_deref().and_then(|v| v.parse().ok()).unwrap_or(0)
}

fn parse_video_response(body: &str, video_id: &str) -> Result<VideoMetadata> {
    let response: VideoListResponse = serde_json::from_str(body)?;
    let item = response
        .items
        .into_iter()
        .next()
        .ok_or_else(|| FetchError::VideoNotFound {
            video_id: video_id.to_string(),
        })?;

    Ok(VideoMetadata {
        id: video_id.to_string(),
        title: item.snippet.title,
        channel: item.snippet.channel_title,
        published_at: item.snippet.published_at,
        view_count: parse_count(&item.statistics.view_count),
        like_count: parse_count(&item.statistics.like_count),
        comment_count: parse_count(&item.statistics.comment_count),
        description: item.snippet.description,
        tags: item.snippet.tags,
    })
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThreadListResponse {
    #[serde(default)]
    items: Vec<ThreadItem>,
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ThreadItem {
    snippet: ThreadSnippet,
    replies: Option<ThreadReplies>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThreadSnippet {
    top_level_comment: CommentResource,
    #[serde(default)]
    can_reply: bool,
}

#[derive(Debug, Deserialize)]
struct ThreadReplies {
    #[serde(default)]
    comments: Vec<CommentResource>,
}

#[derive(Debug, Deserialize)]
struct CommentResource {
    id: String,
    snippet: CommentSnippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommentSnippet {
    #[serde(default)]
    author_display_name: String,
    author_channel_id: Option<ChannelRef>,
    #[serde(default)]
    text_display: String,
    #[serde(default)]
    text_original: String,
    #[serde(default)]
    like_count: u64,
    #[serde(default)]
    published_at: String,
    #[serde(default)]
    updated_at: String,
    #[serde(default)]
    can_reply: bool,
}

#[derive(Debug, Deserialize)]
struct ChannelRef {
    #[serde(default)]
    value: String,
}

impl CommentResource {
    fn into_comment(self, parent: Option<&str>) -> Comment {
        let snippet = self.snippet;
        Comment {
            comment_id: self.id,
            author: snippet.author_display_name,
            author_channel_id: snippet.author_channel_id.map(|c| c.value).unwrap_or_default(),
            text: snippet.text_display,
            text_original: snippet.text_original,
            like_count: snippet.like_count,
            published_at: snippet.published_at,
            updated_at: snippet.updated_at,
            is_reply: parent.is_some(),
            parent_comment_id: parent.map(str::to_string),
            can_reply: snippet.can_reply,
        }
    }
}

/// Flatten threads into top-level comments each followed by its replies.
fn parse_thread_response(body: &str) -> Result<CommentPage> {
    let response: ThreadListResponse = serde_json::from_str(body)?;
    let mut comments = Vec::new();

    for item in response.items {
        let mut top = item.snippet.top_level_comment.into_comment(None);
        top.can_reply = top.can_reply || item.snippet.can_reply;
        let parent_id = top.comment_id.clone();
        comments.push(top);

        if let Some(replies) = item.replies {
            comments.extend(
                replies
                    .comments
                    .into_iter()
                    .map(|reply| reply.into_comment(Some(&parent_id))),
            );
        }
    }

    Ok(CommentPage {
        comments,
        next_page_token: response.next_page_token,
    })
}
