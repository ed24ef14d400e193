use anchor_lang::prelude::*;

/// Named rejection reasons for the optimistic-markets core.
///
/// Error codes are offset from 6000 (Anchor convention) so they line up with
/// the codes a ledger program built the same way would report.
#[error_code]
pub enum OracleMarketsError {
    /// The market is not in the phase this action belongs to.
    #[msg("Action is not available in the current phase")]
    WrongPhase,

    /// The viewer does not hold the role this action requires.
    #[msg("Viewer does not hold the required role")]
    RoleMismatch,

    /// The deadline governing this action has already passed.
    #[msg("Deadline has passed")]
    DeadlinePassed,

    /// The deadline governing this action has not been reached yet.
    #[msg("Deadline has not been reached")]
    DeadlineNotReached,

    /// The juror already submitted a vote on this market.
    #[msg("Juror has already voted")]
    AlreadyVoted,

    /// The viewer is not one of the ten drawn jurors.
    #[msg("Viewer is not a juror for this market")]
    NotJuror,

    /// The recorded proposer cannot dispute their own proposal.
    #[msg("Proposer cannot dispute their own proposal")]
    OwnProposal,

    /// Token balance does not cover the bond, stake or purchase.
    #[msg("Insufficient balance")]
    InsufficientBalance,

    /// Outcome parameter is not acceptable for this action.
    #[msg("Invalid outcome")]
    InvalidOutcome,

    /// Counter-outcome equals the proposed outcome.
    #[msg("Counter-outcome must differ from the proposed outcome")]
    SameOutcome,

    /// Amount must be greater than zero.
    #[msg("Amount must be > 0")]
    ZeroAmount,

    /// The viewer has no shares in this market.
    #[msg("No shares held")]
    NoShares,

    /// The viewer holds no shares on the winning side.
    #[msg("No shares on the winning side")]
    NoWinningShares,

    /// Proposer stake and fees were already claimed.
    #[msg("Already claimed")]
    AlreadyClaimed,

    /// Randomness for the jury draw is no longer obtainable.
    #[msg("Jury selection expired (more than 256 blocks elapsed)")]
    JurySelectionExpired,

    /// Account has no juror stake.
    #[msg("No juror stake")]
    NoStake,

    /// Juror stake is still locked.
    #[msg("Juror stake is locked")]
    StakeLocked,

    /// Account is already staked as a juror.
    #[msg("Already staked as juror")]
    AlreadyStaked,

    /// Juror staking is account-level and has no market context.
    #[msg("Action is not tied to a market")]
    NotMarketAction,

    /// The market has no final outcome yet.
    #[msg("Market is not finalized")]
    MarketNotFinalized,

    /// Vote counts exceed the jury size.
    #[msg("Vote counts exceed jury size")]
    InconsistentTally,

    /// Question or option text is empty.
    #[msg("Question and both options are required")]
    MissingMarketText,

    /// Question exceeds maximum length (256 bytes).
    #[msg("Question too long (max 256 bytes)")]
    QuestionTooLong,

    /// End time must be in the future.
    #[msg("End time must be in the future")]
    EndTimeInPast,

    /// Market must run for at least ten minutes.
    #[msg("Market must run for at least 10 minutes")]
    DurationTooShort,

    /// Market cannot run for more than a year.
    #[msg("Market cannot run for more than 365 days")]
    DurationTooLong,

    /// Computed payouts exceed the pools (snapshot inconsistent).
    #[msg("Payouts exceed pool totals")]
    PayoutExceedsPools,

    /// Persisted client state could not be encoded or decoded.
    #[msg("Stored state is corrupt")]
    StoreEncoding,

    /// Overflow in arithmetic operation.
    #[msg("Arithmetic overflow")]
    Overflow,
}
