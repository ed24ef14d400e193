use anchor_lang::prelude::*;

use crate::constants::*;
use crate::errors::OracleMarketsError;
use crate::state::ProtocolConfig;

/// Parameters for proposing a new market.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct CreateMarketParams {
    /// Prediction question (max 256 bytes).
    pub question: String,

    pub option_a: String,

    pub option_b: String,

    /// Trading deadline (Unix timestamp).
    pub end_time: i64,
}

/// Check a market proposal before the creation stake is committed.
///
/// The market must run between ten minutes and one year, and the creator
/// must hold `market_creation_stake_amount`.
pub fn validate_create_market(
    params: &CreateMarketParams,
    token_balance: u64,
    config: &ProtocolConfig,
    now: i64,
) -> Result<()> {
    require!(
        !params.question.trim().is_empty()
            && !params.option_a.trim().is_empty()
            && !params.option_b.trim().is_empty(),
        OracleMarketsError::MissingMarketText
    );
    require!(
        params.question.len() <= MAX_QUESTION_LEN,
        OracleMarketsError::QuestionTooLong
    );

    require!(params.end_time > now, OracleMarketsError::EndTimeInPast);
    let duration = params.end_time.saturating_sub(now);
    require!(
        duration >= MIN_MARKET_DURATION_SECONDS,
        OracleMarketsError::DurationTooShort
    );
    require!(
        duration <= MAX_MARKET_DURATION_SECONDS,
        OracleMarketsError::DurationTooLong
    );

    require!(
        token_balance >= config.market_creation_stake_amount,
        OracleMarketsError::InsufficientBalance
    );

    Ok(())
}
