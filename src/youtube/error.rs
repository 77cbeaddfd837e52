//! Errors raised while talking to the YouTube Data API.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Missing API key: pass --api-key or set the YOUTUBE_API_KEY environment variable")]
    MissingApiKey,

    #[error("YouTube rejected the API key: {message}")]
    InvalidApiKey { message: String },

    #[error("YouTube API quota exceeded: {message}")]
    QuotaExceeded { message: String },

    #[error("Comments are disabled for video {video_id}")]
    CommentsDisabled { video_id: String },

    #[error("Video not found: {video_id}")]
    VideoNotFound { video_id: String },

    #[error("Could not extract video ID from: {input}")]
    InvalidVideo { input: String },

    #[error("YouTube API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected API response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl FetchError {
    /// Troubleshooting advice shown to the user alongside the error.
    pub fn hint(&self) -> &'static str {
        match self {
            FetchError::MissingApiKey | FetchError::InvalidApiKey { .. } => {
                "Create a YouTube Data API v3 key in the Google Cloud console and export it as YOUTUBE_API_KEY"
            }
            FetchError::QuotaExceeded { .. } => {
                "Reduce --max-comments or wait for the daily quota reset"
            }
            FetchError::CommentsDisabled { .. } => {
                "Comments are turned off for this video; choose a different one"
            }
            FetchError::VideoNotFound { .. } | FetchError::InvalidVideo { .. } => {
                "Verify the video URL or ID is correct"
            }
            FetchError::Api { .. } | FetchError::Http(_) | FetchError::Decode(_) => {
                "Check your network connection and try again"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, FetchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = FetchError::CommentsDisabled {
            video_id: "abc".to_string(),
        };
        assert_eq!(err.to_string(), "Comments are disabled for video abc");

        let err = FetchError::Api {
            status: 500,
            message: "backend".to_string(),
        };
        assert_eq!(err.to_string(), "YouTube API error 500: backend");
    }

    #[test]
    fn test_hints() {
        assert!(FetchError::MissingApiKey.hint().contains("YOUTUBE_API_KEY"));
        let quota = FetchError::QuotaExceeded {
            message: String::new(),
        };
        assert!(quota.hint().contains("--max-comments"));
    }
}
