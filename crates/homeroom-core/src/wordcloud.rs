use homeroom_model::results::WordFrequency;
use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

pub const DEFAULT_MAX_WORDS: usize = 200;

static TOKEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\w[\w']+").expect("word token regex is invalid"));

static STOPWORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "a", "about", "above", "after", "again", "against", "all", "also", "am", "an", "and", "any", "are", "aren't",
        "as", "at", "be", "because", "been", "before", "being", "below", "between", "both", "but", "by", "can",
        "can't", "cannot", "com", "could", "couldn't", "did", "didn't", "do", "does", "doesn't", "doing", "don't",
        "down", "during", "each", "else", "ever", "few", "for", "from", "further", "get", "had", "hadn't", "has",
        "hasn't", "have", "haven't", "having", "he", "he'd", "he'll", "he's", "hence", "her", "here", "here's",
        "hers", "herself", "him", "himself", "his", "how", "how's", "however", "http", "i", "i'd", "i'll", "i'm",
        "i've", "if", "in", "into", "is", "isn't", "it", "it's", "its", "itself", "just", "k", "let's", "like", "me",
        "more", "most", "mustn't", "my", "myself", "no", "nor", "not", "of", "off", "on", "once", "only", "or",
        "other", "otherwise", "ought", "our", "ours", "ourselves", "out", "over", "own", "r", "same", "shall",
        "shan't", "she", "she'd", "she'll", "she's", "should", "shouldn't", "since", "so", "some", "such", "than",
        "that", "that's", "the", "their", "theirs", "them", "themselves", "then", "there", "there's", "therefore",
        "these", "they", "they'd", "they'll", "they're", "they've", "this", "those", "through", "to", "too",
        "under", "until", "up", "very", "was", "wasn't", "we", "we'd", "we'll", "we're", "we've", "were",
        "weren't", "what", "what's", "when", "when's", "where", "where's", "which", "while", "who", "who's",
        "whom", "why", "why's", "with", "won't", "would", "wouldn't", "www", "you", "you'd", "you'll", "you're",
        "you've", "your", "yours", "yourself", "yourselves",
    ]
    .into_iter()
    .collect()
});

fn tokens(text: &str) -> impl Iterator<Item = String> + '_ {
    TOKEN
        .find_iter(text)
        .map(|token| {
            let token = token.as_str();
            token.strip_suffix("'s").unwrap_or(token).to_owned()
        })
        .filter(|token| !token.is_empty() && !token.chars().all(char::is_numeric))
        .filter(|token| !STOPWORDS.contains(token.as_str()))
}

/// Merges `word + "s"` into `word` when both were seen.
fn fold_plurals(counts: &mut HashMap<String, u64>) {
    let plurals: Vec<String> = counts
        .keys()
        .filter(|word| word.ends_with('s') && !word.ends_with("ss"))
        .filter(|word| counts.contains_key(&word[..word.len() - 1]))
        .cloned()
        .collect();
    for plural in plurals {
        if let Some(count) = counts.remove(&plural) {
            *counts.entry(plural[..plural.len() - 1].to_owned()).or_default() += count;
        }
    }
}

/// Word frequency table of free-text responses, most frequent first.
#[must_use]
pub fn word_frequencies<I, S>(texts: I, max_words: usize) -> Vec<WordFrequency>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut counts: HashMap<String, u64> = HashMap::new();
    for text in texts {
        for token in tokens(&text.as_ref().to_lowercase()) {
            *counts.entry(token).or_default() += 1;
        }
    }
    fold_plurals(&mut counts);

    let mut words: Vec<(String, u64)> = counts.into_iter().collect();
    words.sort_by(|(a_word, a_count), (b_word, b_count)| b_count.cmp(a_count).then_with(|| a_word.cmp(b_word)));
    words.truncate(max_words);

    let Some(max_count) = words.first().map(|(_, count)| *count) else {
        return vec![];
    };
    words
        .into_iter()
        .map(|(word, count)| WordFrequency {
            weight: weight(count, max_count),
            word,
            count,
        })
        .collect()
}

#[allow(clippy::cast_precision_loss)]
fn weight(count: u64, max_count: u64) -> f64 {
    count as f64 / max_count as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(frequencies: &[WordFrequency]) -> Vec<(&str, u64)> {
        frequencies.iter().map(|entry| (entry.word.as_str(), entry.count)).collect()
    }

    #[test]
    fn test_word_frequencies() {
        let frequencies = word_frequencies(
            ["The teacher's lessons were great", "Great lesson, great TEACHER!", "I liked the lab in 2024"],
            DEFAULT_MAX_WORDS,
        );
        assert_eq!(
            words(&frequencies),
            [("great", 3), ("lesson", 2), ("teacher", 2), ("lab", 1), ("liked", 1)]
        );
        assert!((frequencies[0].weight - 1.0).abs() < f64::EPSILON);
        assert!((frequencies[1].weight - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_plural_needs_singular() {
        let frequencies = word_frequencies(["classes class glasses dogs dogs"], DEFAULT_MAX_WORDS);
        assert_eq!(words(&frequencies), [("dogs", 2), ("class", 1), ("classes", 1), ("glasses", 1)]);

        let folded = word_frequencies(["dogs dog", "dog"], DEFAULT_MAX_WORDS);
        assert_eq!(words(&folded), [("dog", 3)]);
    }

    #[test]
    fn test_single_characters_and_numbers_dropped() {
        let frequencies = word_frequencies(["a b 42 7th x1 it's"], DEFAULT_MAX_WORDS);
        assert_eq!(words(&frequencies), [("7th", 1), ("x1", 1)]);
    }

    #[test]
    fn test_truncate() {
        let frequencies = word_frequencies(["alpha beta gamma delta beta"], 2);
        assert_eq!(words(&frequencies), [("beta", 2), ("alpha", 1)]);
        assert!(word_frequencies(Vec::<String>::new(), 10).is_empty());
        assert!(word_frequencies(["the and of"], 10).is_empty());
        assert!(word_frequencies(["hello"], 0).is_empty());
    }
}
