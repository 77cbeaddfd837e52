//! Comment source for the YouTube Data API.
//!
//! [`CommentSource`] is the fetch capability the rest of the tool depends
//! on. [`YouTubeClient`] implements it over HTTP; tests use in-memory
//! sources.

pub mod client;
pub mod error;
pub mod video_id;

pub use client::YouTubeClient;
pub use error::FetchError;
pub use video_id::extract_video_id;

use crate::models::{Comment, CommentOrder, VideoMetadata};
use error::Result;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Largest page the commentThreads endpoint will return.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Parameters of one commentThreads request.
#[derive(Debug, Clone)]
pub struct PageRequest<'a> {
    pub video_id: &'a str,
    pub order: CommentOrder,
    pub max_results: u32,
    pub page_token: Option<&'a str>,
}

/// One page of comments, threads flattened in order.
#[derive(Debug, Clone, Default)]
pub struct CommentPage {
    pub comments: Vec<Comment>,
    pub next_page_token: Option<String>,
}

/// Something that can supply video metadata and pages of comments.
#[allow(async_fn_in_trait)]
pub trait CommentSource {
    /// Fetch metadata for a single video.
    async fn video_info(&self, video_id: &str) -> Result<VideoMetadata>;

    /// Fetch one page of comment threads.
    async fn comment_page(&self, request: &PageRequest<'_>) -> Result<CommentPage>;
}

/// Options for [`fetch_comments`].
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Stop after this many comments (None for all).
    pub max_comments: Option<usize>,
    pub order: CommentOrder,
    pub page_size: u32,
    /// Pause between page requests.
    pub request_delay: Duration,
    pub show_progress: bool,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            max_comments: None,
            order: CommentOrder::Time,
            page_size: MAX_PAGE_SIZE,
            request_delay: Duration::from_millis(1000),
            show_progress: false,
        }
    }
}

/// Fetch comments page by page until `max_comments` or the last page.
///
/// Replies follow their parent comment. When the quota runs out after at
/// least one page, the comments gathered so far are returned.
pub async fn fetch_comments<S: CommentSource>(
    source: &S,
    video_id: &str,
    options: &FetchOptions,
) -> Result<Vec<Comment>> {
    let mut comments: Vec<Comment> = Vec::new();
    let mut page_token: Option<String> = None;
    let page_size = options.page_size.clamp(1, MAX_PAGE_SIZE);

    let progress = if options.show_progress {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} [{elapsed_precise}] {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.enable_steady_tick(Duration::from_millis(120));
        Some(pb)
    } else {
        None
    };

    loop {
        let max_results = match options.max_comments {
            Some(max) => (max - comments.len()).min(page_size as usize) as u32,
            None => page_size,
        };

        let request = PageRequest {
            video_id,
            order: options.order,
            max_results,
            page_token: page_token.as_deref(),
        };

        debug!(
            "Requesting {} comment threads (page token: {:?})",
            max_results, request.page_token
        );

        let page = match source.comment_page(&request).await {
            Ok(page) => page,
            Err(FetchError::QuotaExceeded { message }) if !comments.is_empty() => {
                warn!(
                    "Quota exceeded after {} comments, keeping partial results: {}",
                    comments.len(),
                    message
                );
                break;
            }
            Err(e) => {
                if let Some(pb) = &progress {
                    pb.abandon_with_message("Fetch failed");
                }
                return Err(e);
            }
        };

        comments.extend(page.comments);

        if let Some(pb) = &progress {
            pb.set_message(format!("Fetched {} comments", comments.len()));
        }

        if let Some(max) = options.max_comments {
            if comments.len() >= max {
                comments.truncate(max);
                break;
            }
        }

        match page.next_page_token {
            Some(token) => page_token = Some(token),
            None => break,
        }

        if !options.request_delay.is_zero() {
            tokio::time::sleep(options.request_delay).await;
        }
    }

    if let Some(pb) = progress {
        pb.finish_with_message(format!("Fetched {} comments", comments.len()));
    }

    info!("Fetched {} comments for video {}", comments.len(), video_id);
    Ok(comments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn comment(id: &str, parent: Option<&str>) -> Comment {
        Comment {
            comment_id: id.to_string(),
            author: "tester".to_string(),
            author_channel_id: String::new(),
            text: format!("comment {id}"),
            text_original: String::new(),
            like_count: 1,
            published_at: "2024-05-01T10:00:00Z".to_string(),
            updated_at: String::new(),
            is_reply: parent.is_some(),
            parent_comment_id: parent.map(str::to_string),
            can_reply: true,
        }
    }

    enum Step {
        Page(CommentPage),
        Quota,
        Disabled,
    }

    /// Serves pre-built pages and records every request.
    struct FakeSource {
        pages: Vec<Step>,
        requests: RefCell<Vec<(u32, Option<String>)>>,
    }

    impl FakeSource {
        fn new(pages: Vec<Step>) -> Self {
            Self {
                pages,
                requests: RefCell::new(Vec::new()),
            }
        }
    }

    impl CommentSource for FakeSource {
        async fn video_info(&self, video_id: &str) -> Result<VideoMetadata> {
            Ok(VideoMetadata {
                id: video_id.to_string(),
                ..Default::default()
            })
        }

        async fn comment_page(&self, request: &PageRequest<'_>) -> Result<CommentPage> {
            let index = self.requests.borrow().len();
            self.requests.borrow_mut().push((
                request.max_results,
                request.page_token.map(str::to_string),
            ));
            match &self.pages[index] {
                Step::Page(page) => Ok(page.clone()),
                Step::Quota => Err(FetchError::QuotaExceeded {
                    message: "daily".to_string(),
                }),
                Step::Disabled => Err(FetchError::CommentsDisabled {
                    video_id: request.video_id.to_string(),
                }),
            }
        }
    }

    fn page(ids: &[(&str, Option<&str>)], next: Option<&str>) -> CommentPage {
        CommentPage {
            comments: ids.iter().map(|(id, parent)| comment(id, *parent)).collect(),
            next_page_token: next.map(str::to_string),
        }
    }

    fn options(max: Option<usize>) -> FetchOptions {
        FetchOptions {
            max_comments: max,
            request_delay: Duration::ZERO,
            ..Default::default()
        }
    }

    #[test]
    fn test_fetch_follows_pages() {
        let source = FakeSource::new(vec![
            Step::Page(page(&[("a", None), ("a.1", Some("a"))], Some("P2"))),
            Step::Page(page(&[("b", None)], None)),
        ]);

        let comments =
            tokio_test::block_on(fetch_comments(&source, "vid", &options(None))).unwrap();

        let ids: Vec<_> = comments.iter().map(|c| c.comment_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "a.1", "b"]);

        let requests = source.requests.borrow();
        assert_eq!(requests[0], (100, None));
        assert_eq!(requests[1], (100, Some("P2".to_string())));
    }

    #[test]
    fn test_fetch_respects_max() {
        let source = FakeSource::new(vec![Step::Page(page(
            &[("a", None), ("a.1", Some("a")), ("a.2", Some("a"))],
            Some("P2"),
        ))]);

        let comments =
            tokio_test::block_on(fetch_comments(&source, "vid", &options(Some(2)))).unwrap();

        assert_eq!(comments.len(), 2);
        assert_eq!(source.requests.borrow()[0].0, 2);
    }

    #[test]
    fn test_fetch_keeps_partial_on_quota() {
        let source = FakeSource::new(vec![
            Step::Page(page(&[("a", None)], Some("P2"))),
            Step::Quota,
        ]);

        let comments =
            tokio_test::block_on(fetch_comments(&source, "vid", &options(None))).unwrap();
        assert_eq!(comments.len(), 1);
    }

    #[test]
    fn test_fetch_propagates_first_page_errors() {
        let source = FakeSource::new(vec![Step::Disabled]);

        let result = tokio_test::block_on(fetch_comments(&source, "vid", &options(None)));
        assert!(matches!(result, Err(FetchError::CommentsDisabled { .. })));
    }
}
