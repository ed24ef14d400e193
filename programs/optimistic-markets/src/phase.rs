use anchor_lang::prelude::*;

use crate::state::*;

/// ─── Phase ────────────────────────────────────────────────────────
///
/// Classification of a market derived jointly from the ledger status and the
/// wall clock. Every consumer branches on this, never on the raw status.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Shares can be bought.
    TradingOpen,

    /// Trading ended; nobody has proposed an outcome yet.
    AwaitingProposal,

    /// Proposal standing; disputes accepted.
    DisputeWindow,

    /// Dispute window elapsed without a dispute.
    ReadyToFinalizeUndisputed,

    /// Disputed; the jury has not been drawn.
    AwaitingJury,

    /// Jury drawn; votes accepted.
    JuryVoting,

    /// Voting elapsed.
    ReadyToFinalizeDispute,

    /// Outcome committed.
    Finalized,

    /// The jury can never be drawn. Terminal; the market is hidden.
    Expired,

    /// Snapshot incomplete. Render nothing yet.
    Indeterminate,
}

impl Phase {
    pub fn is_resolving(self) -> bool {
        matches!(
            self,
            Phase::AwaitingProposal
                | Phase::DisputeWindow
                | Phase::ReadyToFinalizeUndisputed
                | Phase::AwaitingJury
                | Phase::JuryVoting
                | Phase::ReadyToFinalizeDispute
        )
    }
}

/// Project a snapshot onto a [`Phase`].
///
/// Total over all inputs. Missing parts, or a required deadline still at the
/// ledger's unset value of 0, yield [`Phase::Indeterminate`].
pub fn resolve(
    market: Option<&Market>,
    resolution: Option<&ResolutionRecord>,
    now: i64,
    jury_expired: bool,
) -> Phase {
    let Some(resolution) = resolution else {
        return Phase::Indeterminate;
    };

    match resolution.status {
        ResolutionStatus::Pending => match market {
            Some(market) if market.end_time != 0 => {
                if now < market.end_time {
                    Phase::TradingOpen
                } else {
                    Phase::AwaitingProposal
                }
            }
            _ => Phase::Indeterminate,
        },
        ResolutionStatus::AwaitingProposal => Phase::AwaitingProposal,
        ResolutionStatus::DisputeWindow => match resolution.dispute_window_end {
            0 => Phase::Indeterminate,
            end if now < end => Phase::DisputeWindow,
            _ => Phase::ReadyToFinalizeUndisputed,
        },
        ResolutionStatus::InDispute => {
            if jury_expired {
                Phase::Expired
            } else {
                Phase::AwaitingJury
            }
        }
        ResolutionStatus::JuryVoting => match resolution.voting_end {
            0 => Phase::Indeterminate,
            end if now < end => Phase::JuryVoting,
            _ => Phase::ReadyToFinalizeDispute,
        },
        ResolutionStatus::Finalized => Phase::Finalized,
    }
}

/// ─── Market Filter ────────────────────────────────────────────────
///
/// Market-list tabs.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarketFilter {
    Active,
    Pending,
    Resolved,
}

impl MarketFilter {
    /// Whether a market in `phase` belongs under this tab.
    ///
    /// Expired and indeterminate markets appear under none.
    pub fn shows(self, phase: Phase) -> bool {
        match self {
            MarketFilter::Active => phase == Phase::TradingOpen,
            MarketFilter::Pending => phase.is_resolving(),
            MarketFilter::Resolved => phase == Phase::Finalized,
        }
    }
}
