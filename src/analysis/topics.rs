//! Questions, content requests and suggested future topics.

use super::keywords::tokenize;
use crate::config::{EmergingEntry, TopicEntry};
use crate::models::{truncate_chars, Comment, ContentRequest, Priority, Question, TopicSuggestion};
use std::collections::HashSet;
use tracing::debug;

/// Phrases that mark a comment as asking for content.
pub const REQUEST_PHRASES: &[&str] = &[
    "tutorial",
    "explain",
    "show how",
    "guide",
    "demo",
    "example",
    "walkthrough",
    "deep dive",
    "comparison",
    "please",
    "would love",
    "can you do",
    "next video",
    "cover",
    "topic",
    "about",
];

/// Interest score above which a catalog topic is high priority.
pub const HIGH_PRIORITY_SCORE: f64 = 10.0;

/// Number of questions scanned for emerging technologies.
const EMERGING_QUESTION_POOL: usize = 20;

/// Comments containing a question mark, most liked first.
pub fn find_questions(comments: &[Comment], top_n: usize) -> Vec<Question> {
    let mut questions: Vec<Question> = comments
        .iter()
        .filter(|c| c.text.trim().contains('?'))
        .map(|c| Question {
            text: truncate_chars(c.text.trim(), 200),
            author: c.author.clone(),
            likes: c.like_count,
            is_reply: c.is_reply,
        })
        .collect();

    questions.sort_by_key(|q| std::cmp::Reverse(q.likes));
    questions.truncate(top_n);
    questions
}

/// Comments that ask for specific content, most liked first.
pub fn identify_content_requests(comments: &[Comment], top_n: usize) -> Vec<ContentRequest> {
    let mut requests: Vec<ContentRequest> = comments
        .iter()
        .filter_map(|c| {
            let lower = c.text.to_lowercase();
            let matched: Vec<String> = REQUEST_PHRASES
                .iter()
                .filter(|p| lower.contains(*p))
                .map(|p| p.to_string())
                .collect();

            if matched.is_empty() {
                return None;
            }

            Some(ContentRequest {
                text: truncate_chars(&c.text, 150),
                author: c.author.clone(),
                likes: c.like_count,
                matched_keywords: matched,
            })
        })
        .collect();

    requests.sort_by_key(|r| std::cmp::Reverse(r.likes));
    requests.truncate(top_n);
    requests
}

/// How much the audience talks about one catalog topic.
#[derive(Debug, Clone, PartialEq)]
pub struct TopicInterest<'a> {
    pub entry: &'a TopicEntry,
    /// Whole-token mentions across all comments.
    pub mentions: usize,
    /// Mean likes of the comments that mention the topic.
    pub avg_engagement: f64,
}

impl TopicInterest<'_> {
    /// `mentions x (1 + avg_engagement)`.
    pub fn interest_score(&self) -> f64 {
        self.mentions as f64 * (1.0 + self.avg_engagement)
    }
}

/// Measure interest in each catalog topic, highest score first.
///
/// Topics nobody mentions are left out.
pub fn rank_topic_interest<'a>(
    comments: &[Comment],
    catalog: &'a [TopicEntry],
) -> Vec<TopicInterest<'a>> {
    let tokenized: Vec<(Vec<String>, u64)> = comments
        .iter()
        .map(|c| (tokenize(&c.text), c.like_count))
        .collect();

    let mut interests: Vec<TopicInterest<'a>> = catalog
        .iter()
        .filter_map(|entry| {
            let keyword = entry.keyword.to_lowercase();
            let mut mentions = 0;
            let mut relevant = 0usize;
            let mut relevant_likes = 0u64;

            for (tokens, likes) in &tokenized {
                let count = tokens.iter().filter(|t| **t == keyword).count();
                if count > 0 {
                    mentions += count;
                    relevant += 1;
                    relevant_likes += likes;
                }
            }

            (mentions > 0).then(|| TopicInterest {
                entry,
                mentions,
                avg_engagement: relevant_likes as f64 / relevant as f64,
            })
        })
        .collect();

    interests.sort_by(|a, b| {
        b.interest_score()
            .partial_cmp(&a.interest_score())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    interests
}

/// Suggest future video topics from catalog mentions and questions.
///
/// The best `top_n / 2` catalog topics contribute two titles each. Questions
/// naming an emerging technology add one emerging title each. The result is
/// ordered high, emerging, then medium, by engagement within a priority.
pub fn suggest_future_topics(
    comments: &[Comment],
    catalog: &[TopicEntry],
    emerging: &[EmergingEntry],
    top_n: usize,
) -> Vec<TopicSuggestion> {
    let mut suggestions: Vec<TopicSuggestion> = Vec::new();

    for interest in rank_topic_interest(comments, catalog)
        .into_iter()
        .take(top_n / 2)
    {
        let priority = if interest.interest_score() > HIGH_PRIORITY_SCORE {
            Priority::High
        } else {
            Priority::Medium
        };

        for title in interest.entry.titles.iter().take(2) {
            suggestions.push(TopicSuggestion {
                title: title.clone(),
                based_on_topic: interest.entry.keyword.clone(),
                mentions: interest.mentions,
                avg_engagement: interest.avg_engagement,
                priority,
                source_question: None,
            });
        }
    }

    let mut seen: HashSet<String> = suggestions.iter().map(|s| s.title.clone()).collect();

    for question in find_questions(comments, EMERGING_QUESTION_POOL) {
        let tokens: HashSet<String> = tokenize(&question.text).into_iter().collect();

        for tech in emerging {
            if !tokens.contains(&tech.keyword.to_lowercase()) || seen.contains(&tech.title) {
                continue;
            }

            debug!("Emerging topic '{}' from a question", tech.keyword);
            seen.insert(tech.title.clone());
            suggestions.push(TopicSuggestion {
                title: tech.title.clone(),
                based_on_topic: tech.keyword.clone(),
                mentions: 1,
                avg_engagement: question.likes as f64,
                priority: Priority::Emerging,
                source_question: Some(truncate_chars(&question.text, 100)),
            });
        }
    }

    suggestions.sort_by(|a, b| {
        a.priority.rank().cmp(&b.priority.rank()).then_with(|| {
            b.avg_engagement
                .partial_cmp(&a.avg_engagement)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
    });
    suggestions.truncate(top_n);
    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::test_support::{comment, reply};
    use crate::config::InsightsConfig;

    fn catalog() -> Vec<TopicEntry> {
        vec![
            TopicEntry {
                keyword: "docker".to_string(),
                titles: vec!["Docker A".into(), "Docker B".into(), "Docker C".into()],
            },
            TopicEntry {
                keyword: "podman".to_string(),
                titles: vec!["Podman A".into(), "Podman B".into()],
            },
            TopicEntry {
                keyword: "helm".to_string(),
                titles: vec!["Helm A".into(), "Helm B".into()],
            },
        ]
    }

    fn emerging() -> Vec<EmergingEntry> {
        vec![
            EmergingEntry {
                keyword: "wasm".to_string(),
                title: "Wasm Runtimes".to_string(),
            },
            EmergingEntry {
                keyword: "ai".to_string(),
                title: "AI Workloads".to_string(),
            },
        ]
    }

    #[test]
    fn test_find_questions() {
        let comments = vec![
            comment("Nice video", 50),
            comment("How do I set up rootless mode?", 3),
            reply("  Why not podman?  ", 7),
        ];

        let questions = find_questions(&comments, 10);

        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].text, "Why not podman?");
        assert!(questions[0].is_reply);
        assert_eq!(questions[1].likes, 3);
    }

    #[test]
    fn test_identify_content_requests() {
        let comments = vec![
            comment("Please do a Deep Dive on networking", 4),
            comment("Loved it", 9),
            comment("A tutorial would help", 6),
        ];

        let requests = identify_content_requests(&comments, 10);

        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].likes, 6);
        assert_eq!(requests[0].matched_keywords, vec!["tutorial"]);
        assert_eq!(requests[1].matched_keywords, vec!["deep dive", "please"]);
    }

    #[test]
    fn test_rank_topic_interest() {
        let catalog = catalog();
        let comments = vec![
            comment("docker docker everywhere", 1),
            comment("Podman is great", 20),
            comment("dockerfile tips", 100),
        ];

        let interests = rank_topic_interest(&comments, &catalog);

        assert_eq!(interests.len(), 2);
        // podman: 1 x (1 + 20) = 21, docker: 2 x (1 + 1) = 4
        assert_eq!(interests[0].entry.keyword, "podman");
        assert_eq!(interests[0].interest_score(), 21.0);
        assert_eq!(interests[1].entry.keyword, "docker");
        assert_eq!(interests[1].mentions, 2);
        assert_eq!(interests[1].avg_engagement, 1.0);
    }

    #[test]
    fn test_suggest_future_topics_priorities() {
        let catalog = catalog();
        let emerging = emerging();
        let comments = vec![
            comment("Podman rocks", 20),
            comment("docker for local dev", 1),
            comment("Can wasm replace containers?", 5),
            comment("What about wasm on the edge?", 2),
            comment("Will AI replace us? Explain", 0),
        ];

        let suggestions = suggest_future_topics(&comments, &catalog, &emerging, 8);
        let titles: Vec<_> = suggestions.iter().map(|s| s.title.as_str()).collect();

        assert_eq!(
            titles,
            vec![
                "Podman A",
                "Podman B",
                "Wasm Runtimes",
                "AI Workloads",
                "Docker A",
                "Docker B",
            ]
        );
        assert_eq!(suggestions[0].priority, Priority::High);
        assert_eq!(suggestions[2].priority, Priority::Emerging);
        assert_eq!(suggestions[2].avg_engagement, 5.0);
        assert!(suggestions[2].source_question.is_some());
        assert_eq!(suggestions[4].priority, Priority::Medium);
    }

    #[test]
    fn test_emerging_requires_whole_token() {
        // "explain" contains "ai" but is not the token "ai"
        let comments = vec![comment("Can you explain this?", 3)];
        let suggestions = suggest_future_topics(&comments, &catalog(), &emerging(), 8);
        assert!(suggestions.is_empty());
    }

    #[test]
    fn test_suggestions_truncated() {
        let config = InsightsConfig::default();
        let comments = vec![
            comment("kubernetes docker podman security networking", 30),
            comment("buildah skopeo production performance?", 30),
        ];

        let suggestions =
            suggest_future_topics(&comments, &config.topics, &config.emerging, 4);
        assert_eq!(suggestions.len(), 4);
        assert!(suggestions.iter().all(|s| s.priority == Priority::High));
    }

    #[test]
    fn test_no_comments_no_suggestions() {
        let config = InsightsConfig::default();
        assert!(suggest_future_topics(&[], &config.topics, &config.emerging, 8).is_empty());
    }
}
