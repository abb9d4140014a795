//! Journal streak and achievement bookkeeping.
//!
//! Every journal append recomputes the goal's streak synchronously, then
//! evaluates achievement unlocks. Streaks count consecutive qualifying
//! calendar days: the comparison is between calendar dates, so an entry at
//! 23:50 followed by one at 00:10 the next day still extends the streak.

use chrono::{DateTime, Utc};

use crate::goal::{Goal, JournalNote};

/// Unlocked when the streak first reaches seven days.
pub const SEVEN_DAY_STREAK: &str = "7-day streak";
/// Unlocked on the first journal session.
pub const FIRST_SESSION: &str = "First session";

/// Result of applying a journal entry to a goal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalOutcome {
    pub streak_before: u32,
    pub streak_after: u32,
    /// Achievement labels newly added by this entry.
    pub unlocked: Vec<String>,
}

/// Append a journal entry to `goal` and update streak/achievement state.
///
/// Streak rule, against the calendar date of the entry immediately
/// preceding this append:
/// - previous entry dated exactly one day earlier: streak += 1
/// - previous entry dated the same day: streak unchanged
/// - anything else (no previous entry, gap of 2+ days): streak = 1
///
/// Achievements are evaluated after the streak update and never duplicate.
pub fn apply_journal_entry(
    goal: &mut Goal,
    text: &str,
    audio: Option<String>,
    now: DateTime<Utc>,
) -> JournalOutcome {
    let streak_before = goal.streak;
    let today = now.date_naive();
    let last_date = goal
        .journal_notes
        .last()
        .map(|note| note.timestamp.date_naive());

    goal.journal_notes.push(JournalNote {
        text: text.to_string(),
        timestamp: now,
        audio,
    });

    match last_date {
        Some(last) if today.signed_duration_since(last).num_days() == 1 => {
            goal.streak += 1;
        }
        Some(last) if last == today => {} // same-day repeat entry
        _ => goal.streak = 1,
    }

    let mut unlocked = Vec::new();
    if goal.streak == 7 {
        unlock(goal, SEVEN_DAY_STREAK, &mut unlocked);
    }
    if goal.streak == 1 {
        unlock(goal, FIRST_SESSION, &mut unlocked);
    }

    JournalOutcome {
        streak_before,
        streak_after: goal.streak,
        unlocked,
    }
}

fn unlock(goal: &mut Goal, label: &str, unlocked: &mut Vec<String>) {
    if !goal.achievements.iter().any(|a| a == label) {
        goal.achievements.push(label.to_string());
        unlocked.push(label.to_string());
    }
}
