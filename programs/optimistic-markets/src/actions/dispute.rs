use anchor_lang::prelude::*;

use super::{require_phase, GateContext};
use crate::errors::OracleMarketsError;
use crate::phase::Phase;
use crate::state::Outcome;

pub fn available(ctx: &GateContext) -> Result<()> {
    require_phase(ctx, Phase::DisputeWindow)?;
    require!(!ctx.roles.outcome_proposer, OracleMarketsError::OwnProposal);

    let resolution = ctx.resolution.ok_or(OracleMarketsError::WrongPhase)?;
    require!(
        ctx.now < resolution.dispute_window_end,
        OracleMarketsError::DeadlinePassed
    );
    require!(
        ctx.account.token_balance >= ctx.config.proposal_bond_amount,
        OracleMarketsError::InsufficientBalance
    );

    Ok(())
}

pub fn validate(ctx: &GateContext, counter_outcome: Outcome) -> Result<()> {
    available(ctx)?;

    let resolution = ctx.resolution.ok_or(OracleMarketsError::WrongPhase)?;
    require!(counter_outcome.is_proposable(), OracleMarketsError::InvalidOutcome);
    require!(
        counter_outcome != resolution.proposed_outcome,
        OracleMarketsError::SameOutcome
    );

    Ok(())
}
