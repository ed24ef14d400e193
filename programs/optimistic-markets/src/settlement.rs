use anchor_lang::prelude::*;

use crate::constants::PAYOUT_SCALE;
use crate::errors::OracleMarketsError;
use crate::state::*;

// ────────────────────────────────────────────────────────────────────
// Settlement math
// ────────────────────────────────────────────────────────────────────
//
// All amounts are token base units. Integer arithmetic only, with u128
// intermediates and checked operations; nothing here touches floats.
//
//   proportion = winning_shares × SCALE / winner_pool
//   bonus      = loser_pool × proportion / SCALE
//   payout     = winning_shares + bonus
//
// Truncation can only lose value, so the sum of all payouts never exceeds
// winner_pool + loser_pool, and the shortfall is below one unit per holder
// plus the loss from scaling.
// ────────────────────────────────────────────────────────────────────

/// Payout for a holder of `winning_shares` on the winning side.
///
/// Returns 0 when the winning pool is empty.
pub fn calculate_winnings(winning_shares: u64, winner_pool: u64, loser_pool: u64) -> Result<u64> {
    if winner_pool == 0 {
        return Ok(0);
    }

    let proportion = (winning_shares as u128)
        .checked_mul(PAYOUT_SCALE)
        .ok_or(OracleMarketsError::Overflow)?
        / winner_pool as u128;

    let bonus = (loser_pool as u128)
        .checked_mul(proportion)
        .ok_or(OracleMarketsError::Overflow)?
        / PAYOUT_SCALE;

    let payout = (winning_shares as u128)
        .checked_add(bonus)
        .ok_or(OracleMarketsError::Overflow)?;

    u64::try_from(payout).map_err(|_| error!(OracleMarketsError::Overflow))
}

/// Full principal back on an INVALID market.
pub fn calculate_refund(shares: &SharesBalance) -> Result<u64> {
    shares.total().ok_or_else(|| error!(OracleMarketsError::Overflow))
}

/// What a share holder is owed once the market is final.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BettorPayout {
    /// Holds winning shares.
    Winnings(u64),
    /// Market settled INVALID; principal returned.
    Refund(u64),
    /// Holds only losing shares.
    Lost,
    /// Holds no shares.
    NotParticipating,
}

impl BettorPayout {
    pub fn amount(&self) -> u64 {
        match self {
            BettorPayout::Winnings(amount) | BettorPayout::Refund(amount) => *amount,
            BettorPayout::Lost | BettorPayout::NotParticipating => 0,
        }
    }
}

/// Settle one holder against a finalized market.
pub fn bettor_payout(market: &Market, shares: &SharesBalance) -> Result<BettorPayout> {
    match market.outcome {
        Outcome::Unresolved => err!(OracleMarketsError::MarketNotFinalized),
        Outcome::Invalid => {
            if shares.is_empty() {
                return Ok(BettorPayout::NotParticipating);
            }
            Ok(BettorPayout::Refund(calculate_refund(shares)?))
        }
        Outcome::OptionA | Outcome::OptionB => {
            let (winner_pool, loser_pool) = market
                .winner_and_loser_pools()
                .ok_or(OracleMarketsError::MarketNotFinalized)?;
            let winner = market
                .outcome
                .winning_option()
                .ok_or(OracleMarketsError::MarketNotFinalized)?;
            let winning_shares = shares.shares(winner);

            if winning_shares > 0 {
                let payout = calculate_winnings(winning_shares, winner_pool, loser_pool)?;
                Ok(BettorPayout::Winnings(payout))
            } else if shares.shares(winner.other()) > 0 {
                Ok(BettorPayout::Lost)
            } else {
                Ok(BettorPayout::NotParticipating)
            }
        }
    }
}

/// Payout each option would bring if it won, given current pools.
///
/// Informational before resolution.
pub fn projected_winnings(market: &Market, shares: &SharesBalance) -> Result<(u64, u64)> {
    let if_a = calculate_winnings(
        shares.option_a_shares,
        market.total_option_a_shares,
        market.total_option_b_shares,
    )?;
    let if_b = calculate_winnings(
        shares.option_b_shares,
        market.total_option_b_shares,
        market.total_option_a_shares,
    )?;
    Ok((if_a, if_b))
}

/// Settlement of the market proposer's creation stake and creator fees.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProposerSettlement {
    /// INVALID outcome: the stake is forfeited.
    Slashed,
    /// Valid outcome: stake plus accumulated fees.
    Recovered { stake: u64, fees: u64, total: u64 },
}

impl ProposerSettlement {
    pub fn amount(&self) -> u64 {
        match self {
            ProposerSettlement::Slashed => 0,
            ProposerSettlement::Recovered { total, .. } => *total,
        }
    }
}

pub fn proposer_settlement(market: &Market, stake: u64) -> Result<ProposerSettlement> {
    match market.outcome {
        Outcome::Unresolved => err!(OracleMarketsError::MarketNotFinalized),
        Outcome::Invalid => Ok(ProposerSettlement::Slashed),
        Outcome::OptionA | Outcome::OptionB => {
            let total = stake
                .checked_add(market.fees_for_creator)
                .ok_or(OracleMarketsError::Overflow)?;
            Ok(ProposerSettlement::Recovered {
                stake,
                fees: market.fees_for_creator,
                total,
            })
        }
    }
}

/// Stake a juror may withdraw now, if any.
pub fn juror_unlock(stake: &JurorStake, now: i64) -> Option<u64> {
    stake.is_unlocked(now).then_some(stake.stake)
}

/// Aggregate of settling every holder of a finalized market.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct SettlementSummary {
    pub holders: u64,
    pub total_paid: u64,
    /// `winner_pool + loser_pool − total_paid` (INVALID: pools − refunds).
    pub dust: u64,
}

/// Settle all holders. Fails if payouts would exceed the pools.
pub fn settle_all(market: &Market, holders: &[SharesBalance]) -> Result<SettlementSummary> {
    let mut total_paid: u64 = 0;
    for shares in holders {
        let payout = bettor_payout(market, shares)?.amount();
        total_paid = total_paid
            .checked_add(payout)
            .ok_or(OracleMarketsError::Overflow)?;
    }

    let pools = market
        .total_option_a_shares
        .checked_add(market.total_option_b_shares)
        .ok_or(OracleMarketsError::Overflow)?;
    let dust = pools
        .checked_sub(total_paid)
        .ok_or(OracleMarketsError::PayoutExceedsPools)?;

    Ok(SettlementSummary {
        holders: holders.len() as u64,
        total_paid,
        dust,
    })
}
