use anchor_lang::prelude::*;

use super::{require_phase, GateContext};
use crate::errors::OracleMarketsError;
use crate::phase::Phase;
use crate::state::BetOption;

pub fn available(ctx: &GateContext) -> Result<()> {
    require_phase(ctx, Phase::TradingOpen)?;

    let market = ctx.market.ok_or(OracleMarketsError::WrongPhase)?;
    require!(ctx.now < market.end_time, OracleMarketsError::DeadlinePassed);

    Ok(())
}

pub fn validate(ctx: &GateContext, _option: BetOption, amount: u64) -> Result<()> {
    available(ctx)?;

    require!(amount > 0, OracleMarketsError::ZeroAmount);
    require!(
        ctx.account.token_balance >= amount,
        OracleMarketsError::InsufficientBalance
    );

    Ok(())
}
