//! Honeypot, timing and interaction checks
//!
//! These catch submissions that do not behave like a person filling in a
//! visible form. All inputs are client-supplied and trivially spoofable,
//! so a pass here proves nothing; a trip is only a strong hint.

use std::time::Duration;

use crate::domain::entities::{FormFields, HONEYPOT_FIELDS};
use crate::domain::value_objects::{SpamReason, SpamVerdict};

/// Any non-blank decoy field marks the submission as automated.
pub fn check_honeypot(fields: &FormFields) -> SpamVerdict {
    let tripped = HONEYPOT_FIELDS.iter().any(|name| {
        fields
            .get(*name)
            .is_some_and(|value| !value.trim().is_empty())
    });

    if tripped {
        SpamVerdict::spam(SpamReason::BotDetected)
    } else {
        SpamVerdict::clean()
    }
}

/// Reject forms submitted faster than `min_fill_time` after render.
///
/// A missing load timestamp skips the check. A timestamp in the future
/// yields a negative elapsed time and trips it.
pub fn check_timing(loaded_at_ms: Option<i64>, now_ms: i64, min_fill_time: Duration) -> SpamVerdict {
    let Some(loaded_at_ms) = loaded_at_ms else {
        return SpamVerdict::clean();
    };

    let elapsed_ms = now_ms.saturating_sub(loaded_at_ms);
    if elapsed_ms < min_fill_time.as_millis() as i64 {
        SpamVerdict::spam(SpamReason::SubmittedTooQuickly)
    } else {
        SpamVerdict::clean()
    }
}

/// Reject when fewer than `min_interactions` were reported (missing = 0).
pub fn check_interaction(interaction_count: Option<u32>, min_interactions: u32) -> SpamVerdict {
    if interaction_count.unwrap_or(0) < min_interactions {
        SpamVerdict::spam(SpamReason::InsufficientInteraction)
    } else {
        SpamVerdict::clean()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: i64 = 1_700_000_000_000;

    fn fields(pairs: &[(&str, &str)]) -> FormFields {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_honeypot_empty_passes() {
        let f = fields(&[("bot_check_name", ""), ("bot_check_email", "  "), ("name", "Jane")]);
        assert!(!check_honeypot(&f).is_spam);
        assert!(!check_honeypot(&FormFields::new()).is_spam);
    }

    #[test]
    fn test_honeypot_either_field_trips() {
        for name in HONEYPOT_FIELDS {
            let verdict = check_honeypot(&fields(&[(name, "x")]));
            assert_eq!(verdict.reason(), Some(SpamReason::BotDetected));
        }
    }

    #[test]
    fn test_timing_below_floor() {
        let verdict = check_timing(Some(NOW - 1_999), NOW, Duration::from_secs(2));
        assert_eq!(verdict.reason(), Some(SpamReason::SubmittedTooQuickly));
    }

    #[test]
    fn test_timing_at_floor_passes() {
        assert!(!check_timing(Some(NOW - 2_000), NOW, Duration::from_secs(2)).is_spam);
        assert!(!check_timing(Some(NOW - 4_000), NOW, Duration::from_secs(2)).is_spam);
    }

    #[test]
    fn test_timing_wholesale_floor() {
        let floor = Duration::from_secs(5);
        assert!(check_timing(Some(NOW - 4_000), NOW, floor).is_spam);
        assert!(!check_timing(Some(NOW - 5_000), NOW, floor).is_spam);
    }

    #[test]
    fn test_timing_missing_timestamp_skips() {
        assert!(!check_timing(None, NOW, Duration::from_secs(5)).is_spam);
    }

    #[test]
    fn test_timing_future_timestamp_trips() {
        assert!(check_timing(Some(NOW + 60_000), NOW, Duration::from_secs(2)).is_spam);
    }

    #[test]
    fn test_interaction_floor() {
        assert_eq!(
            check_interaction(Some(1), 3).reason(),
            Some(SpamReason::InsufficientInteraction)
        );
        assert!(check_interaction(None, 3).is_spam);
        assert!(!check_interaction(Some(3), 3).is_spam);
    }
}
