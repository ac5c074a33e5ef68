//! Content Heuristic Classifier
//!
//! Scores free text (mostly the "message" field) for spam indicators.
//!
//! Two modes share one set of signals:
//! - [`ContentMode::Binary`]: too many URLs or any denylisted keyword
//!   rejects outright. Used by the contact and wholesale forms.
//! - [`ContentMode::Scoring`]: every signal adds weight and the verdict
//!   trips at a threshold. Used where a single keyword hit is too blunt.
//!
//! A rejection is final for the attempt; there is no appeal path.

use crate::domain::value_objects::{ContentMode, SpamReason, SpamVerdict};

/// Terms that reject a message on sight (matched case-insensitively as substrings)
pub const SPAM_KEYWORDS: &[&str] = &[
    "viagra",
    "cialis",
    "casino",
    "lottery",
    "bitcoin",
    "crypto",
    "forex",
    "loan",
    "payday",
    "weight loss",
    "seo services",
    "backlinks",
    "replica watches",
];

/// Commercial terms that only add weight in scoring mode
pub const PROMOTIONAL_TERMS: &[&str] = &[
    "free",
    "discount",
    "earn",
    "income",
    "cheap",
    "offer",
    "guarantee",
    "winner",
    "prize",
    "click here",
];

/// More URLs than this rejects in binary mode
pub const MAX_URLS: usize = 2;

/// Score at which scoring mode rejects
pub const DEFAULT_SCORE_THRESHOLD: u32 = 5;

const URL_SCORE_CAP: usize = 3;
const KEYWORD_WEIGHT: u32 = 3;
const SHOUTING_WEIGHT: u32 = 2;
const REPETITION_WEIGHT: u32 = 2;
const PROMOTIONAL_WEIGHT: u32 = 1;

const SHOUTING_MIN_LEN: usize = 20;
const SHOUTING_RATIO: f64 = 0.5;
const REPEAT_RUN: usize = 5;

/// Raw signals extracted from a message
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ContentSignals {
    pub url_count: usize,
    pub keyword_hits: Vec<&'static str>,
    pub shouting: bool,
    pub repeated_run: bool,
    pub promotional_hits: Vec<&'static str>,
}

impl ContentSignals {
    pub fn score(&self) -> u32 {
        let mut score = self.url_count.min(URL_SCORE_CAP) as u32;
        if !self.keyword_hits.is_empty() {
            score += KEYWORD_WEIGHT;
        }
        if self.shouting {
            score += SHOUTING_WEIGHT;
        }
        if self.repeated_run {
            score += REPETITION_WEIGHT;
        }
        score + self.promotional_hits.len() as u32 * PROMOTIONAL_WEIGHT
    }
}

/// Extract every signal from `text`.
pub fn analyze(text: &str) -> ContentSignals {
    let folded = text.to_lowercase();

    ContentSignals {
        url_count: count_urls(&folded),
        keyword_hits: matches_in(&folded, SPAM_KEYWORDS),
        shouting: is_shouting(text),
        repeated_run: has_repeated_run(text, REPEAT_RUN),
        promotional_hits: matches_in(&folded, PROMOTIONAL_TERMS),
    }
}

/// Classify `text` under `mode`.
pub fn classify(text: &str, mode: ContentMode) -> SpamVerdict {
    let signals = analyze(text);

    match mode {
        ContentMode::Binary => {
            let mut reasons = Vec::new();
            if signals.url_count > MAX_URLS {
                reasons.push(SpamReason::ExcessiveUrls);
            }
            if !signals.keyword_hits.is_empty() {
                reasons.push(SpamReason::SpamContent);
            }
            SpamVerdict {
                is_spam: !reasons.is_empty(),
                reasons,
                score: 0,
            }
        }
        ContentMode::Scoring { threshold } => {
            let score = signals.score();
            let is_spam = score >= threshold;
            SpamVerdict {
                is_spam,
                reasons: if is_spam {
                    vec![SpamReason::HighSpamScore]
                } else {
                    Vec::new()
                },
                score,
            }
        }
    }
}

/// Occurrences of `http://` and `https://` in already case-folded text.
pub fn count_urls(folded: &str) -> usize {
    folded.matches("http://").count() + folded.matches("https://").count()
}

fn matches_in(folded: &str, terms: &[&'static str]) -> Vec<&'static str> {
    terms
        .iter()
        .copied()
        .filter(|term| folded.contains(term))
        .collect()
}

/// Uppercase letters make up more than half of a message longer than 20 chars.
fn is_shouting(text: &str) -> bool {
    let total = text.chars().count();
    if total <= SHOUTING_MIN_LEN {
        return false;
    }
    let upper = text.chars().filter(|c| c.is_uppercase()).count();
    upper as f64 / total as f64 > SHOUTING_RATIO
}

/// Some character appears `run` or more times in a row.
fn has_repeated_run(text: &str, run: usize) -> bool {
    let mut previous = None;
    let mut length = 0;

    for c in text.chars() {
        if Some(c) == previous {
            length += 1;
        } else {
            previous = Some(c);
            length = 1;
        }
        if length >= run {
            return true;
        }
    }
    false
}
