use anchor_lang::prelude::*;

use crate::constants::*;

/// ─── Deadline Kind ────────────────────────────────────────────────
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum DeadlineKind {
    /// Market trading deadline.
    EndTime,
    DisputeWindowEnd,
    VotingEnd,
    /// Juror stake unlock.
    UnlockTime,
}

/// Expiry classification of a single deadline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DeadlineStatus {
    pub kind: DeadlineKind,
    pub at: i64,
    /// `now >= at`.
    pub has_passed: bool,
    /// Seconds until `at`, 0 once passed.
    pub remaining: u64,
}

impl DeadlineStatus {
    pub fn evaluate(kind: DeadlineKind, at: i64, now: i64) -> Self {
        Self {
            kind,
            at,
            has_passed: has_passed(at, now),
            remaining: remaining_seconds(at, now),
        }
    }

    /// Live countdown: `0 < remaining <= 30 min`.
    pub fn is_countdown(&self) -> bool {
        self.remaining > 0 && self.remaining <= COUNTDOWN_THRESHOLD_SECONDS
    }

    pub fn breakdown(&self) -> Countdown {
        Countdown::from_seconds(self.remaining)
    }
}

/// Classify every supplied deadline against `now`.
pub fn evaluate_all(deadlines: &[(DeadlineKind, i64)], now: i64) -> Vec<DeadlineStatus> {
    deadlines
        .iter()
        .map(|&(kind, at)| DeadlineStatus::evaluate(kind, at, now))
        .collect()
}

pub fn has_passed(at: i64, now: i64) -> bool {
    now >= at
}

pub fn remaining_seconds(at: i64, now: i64) -> u64 {
    u64::try_from(at.saturating_sub(now)).unwrap_or(0)
}

/// Whether the jury-draw seed is gone.
///
/// The seed comes from the block hash at dispute time, which stops being
/// retrievable after [`BLOCKHASH_WINDOW`] blocks. Exactly 256 is still valid.
/// Monotonic in `blocks_elapsed`: once true it stays true.
pub fn is_jury_selection_expired(blocks_elapsed: u64) -> bool {
    is_jury_selection_expired_with(blocks_elapsed, BLOCKHASH_WINDOW)
}

pub fn is_jury_selection_expired_with(blocks_elapsed: u64, window: u64) -> bool {
    blocks_elapsed > window
}

/// Whether a ledger rejection of the jury draw means the seed has expired.
pub fn is_blockhash_expiry_rejection(message: &str) -> bool {
    BLOCKHASH_EXPIRY_MARKERS
        .iter()
        .any(|marker| message.contains(marker))
}

/// Human-scale bucketing of a remaining duration. Display only.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Countdown {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl Countdown {
    pub fn from_seconds(total: u64) -> Self {
        Self {
            days: total / 86_400,
            hours: (total % 86_400) / 3_600,
            minutes: (total % 3_600) / 60,
            seconds: total % 60,
        }
    }
}

/// `MM:SS`, minutes unbounded.
pub fn format_clock(remaining: u64) -> String {
    format!("{:02}:{:02}", remaining / 60, remaining % 60)
}

/// `"4m 10s"`, `"10s"`, or `expired_label` once nothing remains.
pub fn format_compact(remaining: u64, expired_label: &str) -> String {
    if remaining == 0 {
        return expired_label.to_string();
    }
    let minutes = remaining / 60;
    let seconds = remaining % 60;
    if minutes > 0 {
        format!("{}m {}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}
