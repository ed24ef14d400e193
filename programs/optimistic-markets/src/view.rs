use std::collections::BTreeSet;

use anchor_lang::prelude::*;

use crate::actions::{legal_actions, AccountState, Action, ActionRequest, GateContext, Intent, ViewerRoles};
use crate::phase::{resolve, MarketFilter, Phase};
use crate::settlement::{self, BettorPayout, ProposerSettlement};
use crate::state::*;
use crate::store::AccountStateStore;
use crate::tally::{self, Tally};
use crate::timing::{self, DeadlineKind, DeadlineStatus};

/// ─── Market View ──────────────────────────────────────────────────
///
/// Everything the client renders for one market and one viewer, derived from
/// a single poll. Recompute on every poll; nothing here is cached.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MarketView {
    pub market_id: u64,
    pub phase: Phase,

    /// Jury can never be drawn; the market must not be listed.
    pub hidden: bool,

    pub roles: ViewerRoles,
    pub actions: BTreeSet<Action>,
    pub deadlines: Vec<DeadlineStatus>,

    /// Present once jurors have been drawn and the counts are consistent.
    pub tally: Option<Tally>,

    /// Viewer's share claim, once FINALIZED.
    pub bettor_payout: Option<BettorPayout>,

    /// Viewer's proposer claim, once FINALIZED and only for the market proposer.
    pub proposer_settlement: Option<ProposerSettlement>,

    /// Juror stake the viewer can withdraw right now.
    pub juror_unlock: Option<u64>,
}

impl MarketView {
    /// Classify a snapshot for `viewer`.
    ///
    /// Latches the expiry flag in `store` when the dispute block hash has
    /// aged out; that is the only write.
    pub fn evaluate<S: AccountStateStore>(
        snapshot: &MarketSnapshot,
        viewer: &AccountSnapshot,
        store: &mut S,
        config: &ProtocolConfig,
        now: i64,
    ) -> Result<Self> {
        let market_id = snapshot.market_id;
        let market = snapshot.market.as_ref();
        let resolution = snapshot.resolution.as_ref();

        let in_dispute = resolution.map_or(false, |r| r.status == ResolutionStatus::InDispute);
        if let (true, Some(blocks)) = (in_dispute, snapshot.blocks_since_dispute) {
            if timing::is_jury_selection_expired_with(blocks, config.blockhash_window) {
                store.mark_market_expired(market_id);
            }
        }
        let jury_expired = store.is_market_expired(market_id);

        let phase = resolve(market, resolution, now, jury_expired);
        if phase == Phase::Indeterminate {
            msg!("Market #{} snapshot incomplete; deferring", market_id);
        }

        let roles = ViewerRoles::derive(&viewer.account, snapshot);
        let account = AccountState {
            shares: viewer.shares.unwrap_or_default(),
            juror_stake: viewer.juror_stake.unwrap_or_default(),
            token_balance: viewer.token_balance,
            flags: store.flags(market_id, &viewer.account),
        };
        let ctx = GateContext {
            market_id,
            phase,
            market,
            resolution,
            roles,
            account: &account,
            config,
            now,
            jury_expired,
        };
        let actions = legal_actions(&ctx);

        let tally = match (phase, resolution) {
            (Phase::JuryVoting | Phase::ReadyToFinalizeDispute, Some(r)) => {
                tally::tally(r, config.tie_break).ok()
            }
            (Phase::Finalized, Some(r)) if r.has_dispute() => tally::tally(r, config.tie_break).ok(),
            _ => None,
        };

        let (bettor_payout, proposer_settlement) = match (phase, market) {
            (Phase::Finalized, Some(m)) if m.outcome.is_final() => {
                let bettor = viewer
                    .shares
                    .map(|shares| settlement::bettor_payout(m, &shares))
                    .transpose()?;
                let proposer = if roles.market_proposer {
                    Some(settlement::proposer_settlement(
                        m,
                        config.market_creation_stake_amount,
                    )?)
                } else {
                    None
                };
                (bettor, proposer)
            }
            _ => (None, None),
        };

        Ok(Self {
            market_id,
            phase,
            hidden: jury_expired || phase == Phase::Expired,
            roles,
            actions,
            deadlines: deadlines(snapshot, viewer, now),
            tally,
            bettor_payout,
            proposer_settlement,
            juror_unlock: viewer
                .juror_stake
                .and_then(|stake| settlement::juror_unlock(&stake, now)),
        })
    }

    /// Whether the market is listed under `filter`.
    pub fn listed_under(&self, filter: MarketFilter) -> bool {
        !self.hidden && filter.shows(self.phase)
    }
}

fn deadlines(snapshot: &MarketSnapshot, viewer: &AccountSnapshot, now: i64) -> Vec<DeadlineStatus> {
    let mut set = Vec::with_capacity(4);
    if let Some(market) = &snapshot.market {
        set.push((DeadlineKind::EndTime, market.end_time));
    }
    if let Some(resolution) = &snapshot.resolution {
        if resolution.dispute_window_end != 0 {
            set.push((DeadlineKind::DisputeWindowEnd, resolution.dispute_window_end));
        }
        if resolution.voting_end != 0 {
            set.push((DeadlineKind::VotingEnd, resolution.voting_end));
        }
    }
    if let Some(stake) = viewer.juror_stake.filter(JurorStake::is_staked) {
        set.push((DeadlineKind::UnlockTime, stake.unlock_time));
    }
    timing::evaluate_all(&set, now)
}

/// Record a confirmed submission in the client-local store.
///
/// Only votes and proposer claims leave a trace; every other intent is
/// visible on the ledger itself.
pub fn record_confirmation<S: AccountStateStore>(store: &mut S, intent: &Intent, account: &Pubkey) {
    match intent.request {
        ActionRequest::SubmitVote { .. } => store.record_vote(intent.market_id, account),
        ActionRequest::ClaimProposerStake => store.record_proposer_claim(intent.market_id, account),
        _ => {}
    }
}

/// Handle a ledger rejection of the jury draw.
///
/// Returns true when the rejection means the block hash has expired, in which
/// case the market is latched as expired.
pub fn record_jury_draw_rejection<S: AccountStateStore>(
    store: &mut S,
    market_id: u64,
    message: &str,
) -> bool {
    if !timing::is_blockhash_expiry_rejection(message) {
        return false;
    }
    store.mark_market_expired(market_id);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn disputed_snapshot(blocks: u64) -> MarketSnapshot {
        MarketSnapshot {
            market_id: 11,
            market: Some(Market {
                end_time: 100,
                ..Default::default()
            }),
            resolution: Some(ResolutionRecord {
                status: ResolutionStatus::InDispute,
                proposer: Pubkey::new_unique(),
                proposed_outcome: Outcome::OptionA,
                disputer: Pubkey::new_unique(),
                disputed_outcome: Outcome::OptionB,
                dispute_window_end: 400,
                ..Default::default()
            }),
            blocks_since_dispute: Some(blocks),
            ..Default::default()
        }
    }

    #[test]
    fn test_expiry_latches_and_hides() {
        let mut store = MemoryStore::new();
        let config = ProtocolConfig::default();
        let viewer = AccountSnapshot {
            token_balance: 10_000_000,
            ..Default::default()
        };

        let view = MarketView::evaluate(&disputed_snapshot(256), &viewer, &mut store, &config, 500).unwrap();
        assert_eq!(view.phase, Phase::AwaitingJury);
        assert!(view.actions.contains(&Action::FetchJury));
        assert!(!view.hidden);

        let view = MarketView::evaluate(&disputed_snapshot(257), &viewer, &mut store, &config, 500).unwrap();
        assert_eq!(view.phase, Phase::Expired);
        assert!(view.hidden);
        assert!(view.actions.is_empty());

        // A later poll with a smaller (stale) block count does not revive it.
        let view = MarketView::evaluate(&disputed_snapshot(10), &viewer, &mut store, &config, 500).unwrap();
        assert_eq!(view.phase, Phase::Expired);
        assert!(!view.listed_under(MarketFilter::Pending));
    }

    #[test]
    fn test_latched_market_is_unusable_in_any_status() {
        let mut store = MemoryStore::new();
        let config = ProtocolConfig::default();
        let juror = Pubkey::new_unique();
        let mut snapshot = disputed_snapshot(0);
        snapshot.jury = Some(Jury::new([juror; crate::constants::JURY_SIZE]));
        if let Some(resolution) = snapshot.resolution.as_mut() {
            resolution.status = ResolutionStatus::JuryVoting;
            resolution.voting_end = 1_000;
        }
        let viewer = AccountSnapshot {
            account: juror,
            token_balance: 10_000_000,
            ..Default::default()
        };

        let view = MarketView::evaluate(&snapshot, &viewer, &mut store, &config, 500).unwrap();
        assert!(view.actions.contains(&Action::SubmitVote));

        assert!(record_jury_draw_rejection(&mut store, 11, "Blockhash not available"));
        let view = MarketView::evaluate(&snapshot, &viewer, &mut store, &config, 500).unwrap();
        assert!(view.hidden);
        assert!(view.actions.is_empty());
    }

    #[test]
    fn test_rejection_message_latches_expiry() {
        let mut store = MemoryStore::new();
        assert!(!record_jury_draw_rejection(&mut store, 3, "user rejected the request"));
        assert!(!store.is_market_expired(3));
        assert!(record_jury_draw_rejection(&mut store, 3, "Blockhash not available"));
        assert!(store.is_market_expired(3));
    }

    #[test]
    fn test_confirmed_vote_is_remembered() {
        let mut store = MemoryStore::new();
        let juror = Pubkey::new_unique();
        let intent = Intent {
            market_id: 8,
            request: ActionRequest::SubmitVote { outcome: Outcome::OptionA },
        };
        record_confirmation(&mut store, &intent, &juror);
        assert!(store.flags(8, &juror).has_voted);
        assert!(!store.flags(8, &juror).proposer_claimed);
    }

    #[test]
    fn test_incomplete_snapshot_renders_nothing() {
        let mut store = MemoryStore::new();
        let config = ProtocolConfig::default();
        let snapshot = MarketSnapshot {
            market_id: 2,
            ..Default::default()
        };
        let funded = AccountSnapshot {
            token_balance: 10_000_000,
            ..Default::default()
        };
        let view = MarketView::evaluate(&snapshot, &funded, &mut store, &config, 0).unwrap();
        assert_eq!(view.phase, Phase::Indeterminate);
        assert!(view.actions.is_empty());
        assert!(view.deadlines.is_empty());
        for filter in [MarketFilter::Active, MarketFilter::Pending, MarketFilter::Resolved] {
            assert!(!view.listed_under(filter));
        }
    }
}
