//! Domain Value Objects
//!
//! Immutable value types for the screening domain.

use std::fmt;

/// Why a submission was judged to be spam or automated
///
/// Codes are internal: they are logged but never sent to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpamReason {
    BotDetected,
    SubmittedTooQuickly,
    InsufficientInteraction,
    ExcessiveUrls,
    SpamContent,
    InvalidToken,
    HighSpamScore,
}

impl SpamReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpamReason::BotDetected => "bot-detected",
            SpamReason::SubmittedTooQuickly => "submitted-too-quickly",
            SpamReason::InsufficientInteraction => "insufficient-interaction",
            SpamReason::ExcessiveUrls => "excessive-urls",
            SpamReason::SpamContent => "spam-content",
            SpamReason::InvalidToken => "invalid-token",
            SpamReason::HighSpamScore => "high-spam-score",
        }
    }
}

impl fmt::Display for SpamReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one heuristic check
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpamVerdict {
    pub is_spam: bool,
    /// Tripped reasons in evaluation order; the first is the primary one
    pub reasons: Vec<SpamReason>,
    /// Weighted score (scoring mode only, 0 otherwise)
    pub score: u32,
}

impl SpamVerdict {
    pub fn clean() -> Self {
        Self::default()
    }

    pub fn spam(reason: SpamReason) -> Self {
        Self {
            is_spam: true,
            reasons: vec![reason],
            score: 0,
        }
    }

    /// Primary reason, if the verdict is spam
    pub fn reason(&self) -> Option<SpamReason> {
        if self.is_spam {
            self.reasons.first().copied()
        } else {
            None
        }
    }
}

/// How the content classifier turns signals into a verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentMode {
    /// Any single URL or denylist rule rejects
    Binary,
    /// Weighted sum of all signals; rejects at `threshold`
    Scoring { threshold: u32 },
}
