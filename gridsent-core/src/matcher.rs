//! MaxMatch sentiment scoring
//!
//! Text is lower-cased and split on whitespace. Starting at each cursor
//! position the scorer tries the longest window of tokens first (bounded by
//! the lexicon's longest phrase) and shrinks it until a phrase matches. A
//! match consumes its whole window; an unmatched token is skipped. The cursor
//! never moves backwards.

use crate::lexicon::Lexicon;

/// Characters removed, one at a time, from the end of a candidate phrase
pub const TRAILING_PUNCTUATION: [char; 6] = [',', '.', '!', '?', '\'', '"'];

/// Longest-match-first scorer over a borrowed lexicon
#[derive(Debug, Clone, Copy)]
pub struct SentimentMatcher<'a> {
    lexicon: &'a Lexicon,
}

impl<'a> SentimentMatcher<'a> {
    /// Create a scorer for the given lexicon
    pub fn new(lexicon: &'a Lexicon) -> Self {
        Self { lexicon }
    }

    /// Score free text
    pub fn score(&self, text: &str) -> i64 {
        let lowered = text.to_lowercase();
        let tokens: Vec<&str> = lowered.split_whitespace().collect();
        self.score_tokens(&tokens)
    }

    /// Score a pre-tokenized, already lower-cased token sequence
    pub fn score_tokens(&self, tokens: &[&str]) -> i64 {
        let window = self.lexicon.max_phrase_len();
        let mut total = 0i64;
        let mut cursor = 0;

        while cursor < tokens.len() {
            match self.longest_match(tokens, cursor, window) {
                Some((end, weight)) => {
                    total += i64::from(weight);
                    cursor = end;
                }
                None => cursor += 1,
            }
        }

        total
    }

    /// Longest phrase starting at `start`, as `(end, weight)`
    fn longest_match(&self, tokens: &[&str], start: usize, window: usize) -> Option<(usize, i32)> {
        let upper = tokens.len().min(start + window);

        (start + 1..=upper).rev().find_map(|end| {
            let candidate = tokens[start..end].join(" ");
            self.lookup(&candidate).map(|weight| (end, weight))
        })
    }

    /// Exact lookup of the candidate with its trailing punctuation removed
    fn lookup(&self, candidate: &str) -> Option<i32> {
        self.lexicon.get(strip_trailing_punctuation(candidate))
    }
}

/// Drop trailing punctuation one character at a time, never emptying the text
pub fn strip_trailing_punctuation(candidate: &str) -> &str {
    let mut current = candidate;

    while current.len() > 1 {
        let mut chars = current.chars();
        match chars.next_back() {
            Some(last) if TRAILING_PUNCTUATION.contains(&last) => current = chars.as_str(),
            _ => break,
        }
    }

    current
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lexicon() -> Lexicon {
        Lexicon::from_entries([
            ("good", 3),
            ("not good", -2),
            ("does not work", -3),
            ("can't stand", -3),
            ("well-being", 2),
            ("bad", -3),
        ])
    }

    #[test]
    fn test_prefers_longest_phrase() {
        let lexicon = lexicon();
        let matcher = SentimentMatcher::new(&lexicon);
        assert_eq!(matcher.score("this is not good!"), -2);
    }

    #[test]
    fn test_single_words_accumulate() {
        let lexicon = lexicon();
        let matcher = SentimentMatcher::new(&lexicon);
        assert_eq!(matcher.score("good good bad"), 3);
    }

    #[test]
    fn test_strips_trailing_punctuation_only() {
        let lexicon = lexicon();
        let matcher = SentimentMatcher::new(&lexicon);

        assert_eq!(matcher.score("good!!!"), 3);
        assert_eq!(matcher.score("\"good\""), 0);
        assert_eq!(matcher.score("good\"?"), 3);
        assert_eq!(matcher.score("i can't stand it"), -3);
        assert_eq!(matcher.score("for your well-being."), 2);
    }

    #[test]
    fn test_punctuation_stripped_before_lookup() {
        let lexicon = Lexicon::from_entries([("wow!", 5), ("wow", 1)]);
        let matcher = SentimentMatcher::new(&lexicon);

        assert_eq!(matcher.score("wow!"), 1);
        assert_eq!(matcher.score("wow"), 1);
    }

    #[test]
    fn test_strip_keeps_last_character() {
        assert_eq!(strip_trailing_punctuation("good!?,"), "good");
        assert_eq!(strip_trailing_punctuation("!!!"), "!");
        assert_eq!(strip_trailing_punctuation("can't"), "can't");
        assert_eq!(strip_trailing_punctuation("\"good\""), "\"good");
    }

    #[test]
    fn test_internal_punctuation_blocks_phrase() {
        let lexicon = lexicon();
        let matcher = SentimentMatcher::new(&lexicon);
        // "not, good" is not the phrase "not good"; "good" still scores alone
        assert_eq!(matcher.score("not, good"), 3);
    }

    #[test]
    fn test_case_insensitive() {
        let lexicon = lexicon();
        let matcher = SentimentMatcher::new(&lexicon);
        assert_eq!(matcher.score("It Does NOT Work"), -3);
    }

    #[test]
    fn test_no_backtracking_after_match() {
        let lexicon = Lexicon::from_entries([("a b", 1), ("b c", 10), ("c", 100)]);
        let matcher = SentimentMatcher::new(&lexicon);
        // "a b" consumes "b", so "b c" is never considered
        assert_eq!(matcher.score("a b c"), 101);
    }

    #[test]
    fn test_window_is_bounded_by_longest_phrase() {
        let lexicon = Lexicon::from_entries([("x y", 5)]);
        let matcher = SentimentMatcher::new(&lexicon);
        assert_eq!(matcher.score("x y z x y"), 10);
    }

    #[test]
    fn test_lone_punctuation_and_empty_text() {
        let lexicon = lexicon();
        let matcher = SentimentMatcher::new(&lexicon);
        assert_eq!(matcher.score(""), 0);
        assert_eq!(matcher.score("!!! ... ?"), 0);
    }

    #[test]
    fn test_empty_lexicon_scores_zero() {
        let lexicon = Lexicon::default();
        let matcher = SentimentMatcher::new(&lexicon);
        assert_eq!(matcher.score("good not good"), 0);
    }
}
