use anchor_lang::prelude::*;

use super::{require_phase, GateContext};
use crate::errors::OracleMarketsError;
use crate::phase::Phase;

/// Anyone may finalize once the dispute window lapses undisputed.
pub fn undisputed_available(ctx: &GateContext) -> Result<()> {
    require_phase(ctx, Phase::ReadyToFinalizeUndisputed)?;

    let resolution = ctx.resolution.ok_or(OracleMarketsError::WrongPhase)?;
    require!(
        ctx.now >= resolution.dispute_window_end,
        OracleMarketsError::DeadlineNotReached
    );

    Ok(())
}

/// Anyone may finalize once jury voting has ended.
pub fn dispute_available(ctx: &GateContext) -> Result<()> {
    require_phase(ctx, Phase::ReadyToFinalizeDispute)?;

    let resolution = ctx.resolution.ok_or(OracleMarketsError::WrongPhase)?;
    require!(
        ctx.now >= resolution.voting_end,
        OracleMarketsError::DeadlineNotReached
    );

    Ok(())
}
