use anchor_lang::prelude::*;

use crate::constants::*;

/// ─── Market ───────────────────────────────────────────────────────
///
/// Read-only snapshot of a market as reported by the ledger.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq, Default)]
pub struct Market {
    /// Human-readable question.
    pub question: String,

    /// Display label of the first option.
    pub option_a: String,

    /// Display label of the second option.
    pub option_b: String,

    /// Trading deadline (Unix timestamp).
    pub end_time: i64,

    /// Final outcome (only meaningful once resolution is FINALIZED).
    pub outcome: Outcome,

    // ─── Pool accounting ───
    /// Total shares bought on option A.
    pub total_option_a_shares: u64,

    /// Total shares bought on option B.
    pub total_option_b_shares: u64,

    /// Set by the ledger at finalization.
    pub resolved: bool,

    /// Creator fee pool, paid to the market proposer on a valid outcome.
    pub fees_for_creator: u64,
}

impl Market {
    /// Total shares on the given option.
    pub fn pool(&self, option: BetOption) -> u64 {
        match option {
            BetOption::A => self.total_option_a_shares,
            BetOption::B => self.total_option_b_shares,
        }
    }

    /// `(winner_pool, loser_pool)` for the final outcome.
    ///
    /// `None` while unresolved or when the market settled INVALID.
    pub fn winner_and_loser_pools(&self) -> Option<(u64, u64)> {
        let winner = self.outcome.winning_option()?;
        Some((self.pool(winner), self.pool(winner.other())))
    }

    /// Combined volume of both pools, saturating.
    pub fn total_volume(&self) -> u64 {
        self.total_option_a_shares
            .saturating_add(self.total_option_b_shares)
    }
}

/// ─── Outcome ──────────────────────────────────────────────────────
///
/// Discriminants match the ledger encoding.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Outcome {
    #[default]
    Unresolved = 0,
    OptionA = 1,
    OptionB = 2,
    Invalid = 3,
}

impl Outcome {
    /// The option whose holders are paid, if any.
    pub fn winning_option(self) -> Option<BetOption> {
        match self {
            Outcome::OptionA => Some(BetOption::A),
            Outcome::OptionB => Some(BetOption::B),
            Outcome::Unresolved | Outcome::Invalid => None,
        }
    }

    /// Outcomes a proposer or disputer may put forward.
    pub fn is_proposable(self) -> bool {
        self != Outcome::Unresolved
    }

    pub fn is_final(self) -> bool {
        self != Outcome::Unresolved
    }
}

impl TryFrom<u8> for Outcome {
    type Error = u8;

    fn try_from(raw: u8) -> std::result::Result<Self, Self::Error> {
        match raw {
            0 => Ok(Outcome::Unresolved),
            1 => Ok(Outcome::OptionA),
            2 => Ok(Outcome::OptionB),
            3 => Ok(Outcome::Invalid),
            other => Err(other),
        }
    }
}

/// ─── Bet Option ───────────────────────────────────────────────────
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BetOption {
    A,
    B,
}

impl BetOption {
    pub fn other(self) -> BetOption {
        match self {
            BetOption::A => BetOption::B,
            BetOption::B => BetOption::A,
        }
    }

    pub fn outcome(self) -> Outcome {
        match self {
            BetOption::A => Outcome::OptionA,
            BetOption::B => Outcome::OptionB,
        }
    }
}

/// ─── Resolution Status ────────────────────────────────────────────
///
/// Raw status as stored by the ledger. Consumers should not branch on it
/// directly; see [`crate::phase::resolve`].
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ResolutionStatus {
    /// Trading, or trading ended with no proposal recorded yet.
    #[default]
    Pending = 0,

    /// Waiting for anyone to propose an outcome.
    AwaitingProposal = 1,

    /// Outcome proposed; open to disputes until `dispute_window_end`.
    DisputeWindow = 2,

    /// Disputed; waiting for the jury draw.
    InDispute = 3,

    /// Jury drawn; votes accepted until `voting_end`.
    JuryVoting = 4,

    /// Outcome committed; claims are open.
    Finalized = 5,
}

impl ResolutionStatus {
    pub const ALL: [ResolutionStatus; 6] = [
        ResolutionStatus::Pending,
        ResolutionStatus::AwaitingProposal,
        ResolutionStatus::DisputeWindow,
        ResolutionStatus::InDispute,
        ResolutionStatus::JuryVoting,
        ResolutionStatus::Finalized,
    ];
}

impl TryFrom<u8> for ResolutionStatus {
    type Error = u8;

    fn try_from(raw: u8) -> std::result::Result<Self, Self::Error> {
        match raw {
            0 => Ok(ResolutionStatus::Pending),
            1 => Ok(ResolutionStatus::AwaitingProposal),
            2 => Ok(ResolutionStatus::DisputeWindow),
            3 => Ok(ResolutionStatus::InDispute),
            4 => Ok(ResolutionStatus::JuryVoting),
            5 => Ok(ResolutionStatus::Finalized),
            other => Err(other),
        }
    }
}

/// ─── Resolution Record ────────────────────────────────────────────
///
/// Optimistic-oracle state for one market.
///
/// `dispute_window_end` is fixed at proposal time + [`DISPUTE_PERIOD_SECONDS`];
/// `voting_end` is fixed at jury draw + [`VOTING_PERIOD_SECONDS`]. Unset
/// timestamps are reported as 0.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq, Default)]
pub struct ResolutionRecord {
    pub status: ResolutionStatus,

    /// Account that proposed the outcome.
    pub proposer: Pubkey,

    pub proposed_outcome: Outcome,

    /// Account that disputed the proposal (default key if undisputed).
    pub disputer: Pubkey,

    pub disputed_outcome: Outcome,

    pub dispute_window_end: i64,

    pub voting_end: i64,

    pub votes_for_proposer: u64,

    pub votes_for_disputer: u64,
}

impl ResolutionRecord {
    pub fn has_proposal(&self) -> bool {
        self.proposer != Pubkey::default() && self.proposed_outcome.is_proposable()
    }

    pub fn has_dispute(&self) -> bool {
        self.disputer != Pubkey::default() && self.disputed_outcome.is_proposable()
    }
}

/// ─── Shares Balance ───────────────────────────────────────────────
///
/// One account's holdings in one market.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct SharesBalance {
    pub option_a_shares: u64,
    pub option_b_shares: u64,
}

impl SharesBalance {
    pub fn shares(&self, option: BetOption) -> u64 {
        match option {
            BetOption::A => self.option_a_shares,
            BetOption::B => self.option_b_shares,
        }
    }

    /// Sum of both sides; `None` on overflow.
    pub fn total(&self) -> Option<u64> {
        self.option_a_shares.checked_add(self.option_b_shares)
    }

    pub fn is_empty(&self) -> bool {
        self.option_a_shares == 0 && self.option_b_shares == 0
    }
}

/// ─── Juror Stake ──────────────────────────────────────────────────
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct JurorStake {
    /// Staked amount.
    pub stake: u64,

    /// Unlock timestamp. Meaningless when `stake == 0`.
    pub unlock_time: i64,
}

impl JurorStake {
    pub fn is_staked(&self) -> bool {
        self.stake > 0
    }

    /// `stake > 0 && now >= unlock_time`.
    pub fn is_unlocked(&self, now: i64) -> bool {
        self.is_staked() && now >= self.unlock_time
    }
}

/// ─── Jury ─────────────────────────────────────────────────────────
///
/// The ten jurors drawn for a disputed market. Immutable once drawn.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct Jury {
    pub members: [Pubkey; JURY_SIZE],
}

impl Jury {
    pub fn new(members: [Pubkey; JURY_SIZE]) -> Self {
        Self { members }
    }

    /// The ledger reports an undrawn jury as all-default keys.
    pub fn is_drawn(&self) -> bool {
        self.members.iter().any(|m| *m != Pubkey::default())
    }

    pub fn contains(&self, account: &Pubkey) -> bool {
        *account != Pubkey::default() && self.members.contains(account)
    }
}

/// ─── Tie Break ────────────────────────────────────────────────────
///
/// Outcome applied when jury counts are exactly equal.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TieBreak {
    /// No majority: the market settles INVALID and everyone is refunded.
    #[default]
    Invalid,

    /// The standing proposal survives.
    Proposer,

    /// The dispute's counter-outcome wins.
    Disputer,
}

/// ─── Protocol Config ──────────────────────────────────────────────
///
/// Ledger-wide constants the core needs. Defaults match the deployed ledger.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct ProtocolConfig {
    /// Bond required to propose or dispute an outcome.
    pub proposal_bond_amount: u64,

    /// Stake required to create a market.
    pub market_creation_stake_amount: u64,

    /// Minimum stake to join the juror pool.
    pub min_juror_stake: u64,

    /// Length of the dispute window in seconds.
    pub dispute_period: i64,

    /// Length of jury voting in seconds.
    pub voting_period: i64,

    /// Blocks after which the jury draw seed is unobtainable.
    pub blockhash_window: u64,

    /// Rule applied on an exact vote tie.
    pub tie_break: TieBreak,
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        Self {
            proposal_bond_amount: DEFAULT_PROPOSAL_BOND,
            market_creation_stake_amount: DEFAULT_MARKET_CREATION_STAKE,
            min_juror_stake: DEFAULT_MIN_JUROR_STAKE,
            dispute_period: DISPUTE_PERIOD_SECONDS,
            voting_period: VOTING_PERIOD_SECONDS,
            blockhash_window: BLOCKHASH_WINDOW,
            tie_break: TieBreak::default(),
        }
    }
}

/// ─── Market Snapshot ──────────────────────────────────────────────
///
/// Everything the poller has read for one market. Parts load independently
/// and may be missing or mutually stale.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq, Default)]
pub struct MarketSnapshot {
    pub market_id: u64,
    pub market: Option<Market>,
    pub resolution: Option<ResolutionRecord>,
    pub jury: Option<Jury>,

    /// Account that created the market and staked the creation amount.
    pub market_proposer: Option<Pubkey>,

    /// Blocks elapsed since the dispute was raised, when known.
    pub blocks_since_dispute: Option<u64>,
}

/// ─── Account Snapshot ─────────────────────────────────────────────
///
/// What the poller has read for the connected viewer.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq, Default)]
pub struct AccountSnapshot {
    pub account: Pubkey,
    pub shares: Option<SharesBalance>,
    pub juror_stake: Option<JurorStake>,

    /// Settlement-token balance available for bonds, stakes and purchases.
    pub token_balance: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_from_ledger_encoding() {
        assert_eq!(Outcome::try_from(0), Ok(Outcome::Unresolved));
        assert_eq!(Outcome::try_from(3), Ok(Outcome::Invalid));
        assert_eq!(Outcome::try_from(4), Err(4));
        assert_eq!(ResolutionStatus::try_from(5), Ok(ResolutionStatus::Finalized));
        assert_eq!(ResolutionStatus::try_from(6), Err(6));
    }

    #[test]
    fn test_winner_and_loser_pools() {
        let mut market = Market {
            total_option_a_shares: 700,
            total_option_b_shares: 300,
            ..Default::default()
        };
        assert_eq!(market.winner_and_loser_pools(), None);

        market.outcome = Outcome::OptionB;
        assert_eq!(market.winner_and_loser_pools(), Some((300, 700)));

        market.outcome = Outcome::Invalid;
        assert_eq!(market.winner_and_loser_pools(), None);
    }

    #[test]
    fn test_jury_membership_ignores_default_key() {
        let juror = Pubkey::new_unique();
        let mut members = [Pubkey::default(); JURY_SIZE];
        members[3] = juror;
        let jury = Jury::new(members);

        assert!(jury.is_drawn());
        assert!(jury.contains(&juror));
        assert!(!jury.contains(&Pubkey::default()));
        assert!(!Jury::new([Pubkey::default(); JURY_SIZE]).is_drawn());
    }

    #[test]
    fn test_snapshot_borsh_roundtrip() {
        let snapshot = MarketSnapshot {
            market_id: 7,
            market: Some(Market {
                question: "Will it rain?".to_string(),
                end_time: 1_700_000_000,
                ..Default::default()
            }),
            blocks_since_dispute: Some(12),
            ..Default::default()
        };
        let bytes = snapshot.try_to_vec().unwrap();
        let decoded = MarketSnapshot::try_from_slice(&bytes).unwrap();
        assert_eq!(decoded, snapshot);
    }
}
