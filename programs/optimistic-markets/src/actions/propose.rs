use anchor_lang::prelude::*;

use super::{require_phase, GateContext};
use crate::errors::OracleMarketsError;
use crate::phase::Phase;
use crate::state::Outcome;

pub fn available(ctx: &GateContext) -> Result<()> {
    require_phase(ctx, Phase::AwaitingProposal)?;
    require!(
        ctx.account.token_balance >= ctx.config.proposal_bond_amount,
        OracleMarketsError::InsufficientBalance
    );
    Ok(())
}

/// Any final outcome may be proposed, INVALID included.
pub fn validate(ctx: &GateContext, outcome: Outcome) -> Result<()> {
    available(ctx)?;
    require!(outcome.is_proposable(), OracleMarketsError::InvalidOutcome);
    Ok(())
}
