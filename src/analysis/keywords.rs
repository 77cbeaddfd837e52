//! Tokenizing and keyword ranking.

use crate::models::{Comment, Keyword};
use std::collections::{HashMap, HashSet};
use std::hash::Hash;

/// Split text into lowercase word tokens.
///
/// A token is a maximal run of alphanumeric characters or underscores.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Count occurrences and rank them by count, ties in first-seen order.
pub fn rank_by_count<T, I>(items: I) -> Vec<(T, usize)>
where
    T: Eq + Hash + Clone,
    I: IntoIterator<Item = T>,
{
    let mut index: HashMap<T, usize> = HashMap::new();
    let mut counts: Vec<(T, usize)> = Vec::new();

    for item in items {
        match index.get(&item) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(item.clone(), counts.len());
                counts.push((item, 1));
            }
        }
    }

    // Stable sort keeps first-seen order among equal counts
    counts.sort_by_key(|(_, count)| std::cmp::Reverse(*count));
    counts
}

/// Extract the `top_n` most mentioned keywords across all comments.
pub fn extract_keywords(
    comments: &[Comment],
    stopwords: &[String],
    min_word_length: usize,
    top_n: usize,
) -> Vec<Keyword> {
    let stopwords: HashSet<&str> = stopwords.iter().map(String::as_str).collect();

    let words = comments
        .iter()
        .flat_map(|c| tokenize(&c.text))
        .filter(|w| w.chars().count() >= min_word_length)
        .filter(|w| !stopwords.contains(w.as_str()));

    let mut ranked = rank_by_count(words);
    ranked.truncate(top_n);

    ranked
        .into_iter()
        .map(|(word, mentions)| Keyword { word, mentions })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::test_support::comment;

    #[test]
    fn test_tokenize() {
        assert_eq!(
            tokenize("Podman's rootless-mode, K8s & docker_compose!"),
            vec!["podman", "s", "rootless", "mode", "k8s", "docker_compose"]
        );
        assert!(tokenize("  ?! ").is_empty());
    }

    #[test]
    fn test_rank_by_count_non_string_keys() {
        let ranked = rank_by_count([14u32, 9, 14, 0, 9, 14]);
        assert_eq!(ranked, vec![(14, 3), (9, 2), (0, 1)]);
    }

    #[test]
    fn test_rank_by_count_ties_first_seen() {
        let words = ["beta", "alpha", "gamma", "alpha", "beta", "delta"]
            .into_iter()
            .map(String::from);
        let ranked = rank_by_count(words);

        assert_eq!(
            ranked,
            vec![
                ("beta".to_string(), 2),
                ("alpha".to_string(), 2),
                ("gamma".to_string(), 1),
                ("delta".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_extract_keywords() {
        let comments = vec![
            comment("Kubernetes networking is hard", 1),
            comment("Please cover kubernetes storage. Thanks for the video", 2),
            comment("Networking with podman? Kubernetes!", 0),
        ];
        let stopwords = vec!["thanks".to_string(), "video".to_string()];

        let keywords = extract_keywords(&comments, &stopwords, 5, 3);

        assert_eq!(keywords.len(), 3);
        assert_eq!(keywords[0].word, "kubernetes");
        assert_eq!(keywords[0].mentions, 3);
        assert_eq!(keywords[1].word, "networking");
        assert_eq!(keywords[1].mentions, 2);
        // "please" is the first single mention of sufficient length
        assert_eq!(keywords[2].word, "please");
        assert!(keywords.iter().all(|k| k.word != "thanks"));
    }

    #[test]
    fn test_extract_keywords_is_stable() {
        let comments = vec![
            comment("alpha bravo charlie delta", 0),
            comment("echo foxtrot golf hotel", 0),
        ];
        let first = extract_keywords(&comments, &[], 4, 10);
        let second = extract_keywords(&comments, &[], 4, 10);
        assert_eq!(first, second);
        assert_eq!(first[0].word, "alpha");
    }

    #[test]
    fn test_extract_keywords_empty() {
        assert!(extract_keywords(&[], &[], 5, 15).is_empty());
    }
}
