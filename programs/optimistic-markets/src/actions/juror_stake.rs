use anchor_lang::prelude::*;

use super::AccountState;
use crate::errors::OracleMarketsError;
use crate::state::ProtocolConfig;

// Juror staking is account-level: it carries no market id and is never
// offered through a market's action set.

/// Join the juror pool.
pub fn stake_available(account: &AccountState, config: &ProtocolConfig) -> Result<()> {
    require!(
        !account.juror_stake.is_staked(),
        OracleMarketsError::AlreadyStaked
    );
    require!(
        account.token_balance >= config.min_juror_stake,
        OracleMarketsError::InsufficientBalance
    );
    Ok(())
}

/// Withdraw juror stake once `unlock_time` is reached.
pub fn unstake_available(account: &AccountState, now: i64) -> Result<()> {
    let stake = &account.juror_stake;
    require!(stake.is_staked(), OracleMarketsError::NoStake);
    require!(now >= stake.unlock_time, OracleMarketsError::StakeLocked);
    Ok(())
}
