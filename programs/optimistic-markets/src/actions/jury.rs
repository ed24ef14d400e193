use anchor_lang::prelude::*;

use super::{require_phase, GateContext};
use crate::errors::OracleMarketsError;
use crate::phase::Phase;
use crate::state::Outcome;

/// Trigger the jury draw for a disputed market.
///
/// An expired draw gets its own reason so callers can hide the market
/// instead of offering a retry.
pub fn fetch_available(ctx: &GateContext) -> Result<()> {
    require!(ctx.phase != Phase::Expired, OracleMarketsError::JurySelectionExpired);
    require_phase(ctx, Phase::AwaitingJury)?;
    require!(!ctx.jury_expired, OracleMarketsError::JurySelectionExpired);
    Ok(())
}

pub fn vote_available(ctx: &GateContext) -> Result<()> {
    require_phase(ctx, Phase::JuryVoting)?;
    require!(ctx.roles.juror, OracleMarketsError::NotJuror);
    require!(!ctx.account.flags.has_voted, OracleMarketsError::AlreadyVoted);

    let resolution = ctx.resolution.ok_or(OracleMarketsError::WrongPhase)?;
    require!(ctx.now < resolution.voting_end, OracleMarketsError::DeadlinePassed);

    Ok(())
}

/// A vote must back one of the two contested outcomes.
pub fn validate_vote(ctx: &GateContext, outcome: Outcome) -> Result<()> {
    vote_available(ctx)?;

    let resolution = ctx.resolution.ok_or(OracleMarketsError::WrongPhase)?;
    require!(
        outcome.is_proposable()
            && (outcome == resolution.proposed_outcome || outcome == resolution.disputed_outcome),
        OracleMarketsError::InvalidOutcome
    );

    Ok(())
}
