use anchor_lang::prelude::*;

use super::{require_phase, GateContext};
use crate::errors::OracleMarketsError;
use crate::phase::Phase;
use crate::state::{Market, Outcome};

fn finalized_market<'a>(ctx: &GateContext<'a>) -> Result<&'a Market> {
    require_phase(ctx, Phase::Finalized)?;
    let market = ctx.market.ok_or(OracleMarketsError::MarketNotFinalized)?;
    require!(market.outcome.is_final(), OracleMarketsError::MarketNotFinalized);
    Ok(market)
}

/// INVALID markets refund every holder in full.
pub fn refund_available(ctx: &GateContext) -> Result<()> {
    let market = finalized_market(ctx)?;
    require!(market.outcome == Outcome::Invalid, OracleMarketsError::WrongPhase);
    require!(!ctx.account.shares.is_empty(), OracleMarketsError::NoShares);
    Ok(())
}

pub fn winnings_available(ctx: &GateContext) -> Result<()> {
    let market = finalized_market(ctx)?;
    let winner = market
        .outcome
        .winning_option()
        .ok_or(OracleMarketsError::WrongPhase)?;
    require!(
        ctx.account.shares.shares(winner) > 0,
        OracleMarketsError::NoWinningShares
    );
    Ok(())
}

/// Market proposer's stake and fees, or acceptance of the slash on INVALID.
///
/// Independent of any share claim the same account may also hold.
pub fn proposer_available(ctx: &GateContext) -> Result<()> {
    finalized_market(ctx)?;
    require!(ctx.roles.market_proposer, OracleMarketsError::RoleMismatch);
    require!(
        !ctx.account.flags.proposer_claimed,
        OracleMarketsError::AlreadyClaimed
    );
    Ok(())
}
