use anchor_lang::prelude::*;

use crate::constants::JURY_SIZE;
use crate::errors::OracleMarketsError;
use crate::state::*;

/// Side of a dispute a juror can back.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum DisputeSide {
    Proposer,
    Disputer,
}

/// Result of counting jury votes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tally {
    pub votes_for_proposer: u64,
    pub votes_for_disputer: u64,

    /// Side with the strictly greater count; `None` on a tie.
    pub majority: Option<DisputeSide>,

    /// Outcome the market finalizes to, tie-break applied.
    pub outcome: Outcome,
}

impl Tally {
    pub fn votes_cast(&self) -> u64 {
        self.votes_for_proposer.saturating_add(self.votes_for_disputer)
    }

    /// Jurors who have not voted yet.
    pub fn votes_outstanding(&self) -> u64 {
        (JURY_SIZE as u64).saturating_sub(self.votes_cast())
    }

    pub fn is_tie(&self) -> bool {
        self.majority.is_none()
    }
}

/// Count votes on a disputed resolution.
///
/// The strictly larger side wins and its outcome becomes final. Equal counts
/// fall to `tie_break`. Counts summing above the jury size are rejected.
pub fn tally(resolution: &ResolutionRecord, tie_break: TieBreak) -> Result<Tally> {
    let for_proposer = resolution.votes_for_proposer;
    let for_disputer = resolution.votes_for_disputer;

    let cast = for_proposer
        .checked_add(for_disputer)
        .ok_or(OracleMarketsError::Overflow)?;
    if cast > JURY_SIZE as u64 {
        msg!(
            "Inconsistent tally: {} + {} votes for a jury of {}",
            for_proposer,
            for_disputer,
            JURY_SIZE,
        );
        return err!(OracleMarketsError::InconsistentTally);
    }

    let majority = match for_proposer.cmp(&for_disputer) {
        std::cmp::Ordering::Greater => Some(DisputeSide::Proposer),
        std::cmp::Ordering::Less => Some(DisputeSide::Disputer),
        std::cmp::Ordering::Equal => None,
    };

    let outcome = match (majority, tie_break) {
        (Some(DisputeSide::Proposer), _) | (None, TieBreak::Proposer) => resolution.proposed_outcome,
        (Some(DisputeSide::Disputer), _) | (None, TieBreak::Disputer) => resolution.disputed_outcome,
        (None, TieBreak::Invalid) => Outcome::Invalid,
    };

    Ok(Tally {
        votes_for_proposer: for_proposer,
        votes_for_disputer: for_disputer,
        majority,
        outcome,
    })
}

/// How one juror's vote relates to the tally.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JurorVerdict {
    /// Voted with the majority.
    Majority,
    /// Voted against the majority.
    Minority,
    /// Did not vote. No penalty is computed for this.
    Abstained,
    /// Voted, but counts are tied.
    NoMajority,
}

/// Classify a juror against the tally.
///
/// Individual ballots are not kept by the ledger, so `vote` must be supplied
/// by the caller (e.g. from its own record of what this juror submitted).
pub fn classify_juror(tally: &Tally, vote: Option<DisputeSide>) -> JurorVerdict {
    match (vote, tally.majority) {
        (None, _) => JurorVerdict::Abstained,
        (Some(_), None) => JurorVerdict::NoMajority,
        (Some(side), Some(majority)) if side == majority => JurorVerdict::Majority,
        (Some(_), Some(_)) => JurorVerdict::Minority,
    }
}

/// Map a voted outcome to the side it backs.
pub fn side_for_outcome(resolution: &ResolutionRecord, outcome: Outcome) -> Option<DisputeSide> {
    if outcome == resolution.proposed_outcome {
        Some(DisputeSide::Proposer)
    } else if outcome == resolution.disputed_outcome {
        Some(DisputeSide::Disputer)
    } else {
        None
    }
}
