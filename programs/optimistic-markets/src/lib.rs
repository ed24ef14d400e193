//! Client-side decision core for optimistic-oracle binary markets.
//!
//! Every poll hands the crate a ledger snapshot and the wall clock; the crate
//! answers what phase the market is in, what the viewer may do, who wins a
//! disputed vote, and what each participant is owed. Submitting anything to
//! the ledger is the caller's job.
//!
//! Lifecycle:
//!
//!   TradingOpen → AwaitingProposal → DisputeWindow ─┬→ ReadyToFinalizeUndisputed ─┐
//!                                                   └→ AwaitingJury → JuryVoting   │
//!                                                        │   → ReadyToFinalizeDispute
//!                                                        └→ Expired                 ↓
//!                                                                              Finalized

use anchor_lang::prelude::*;

pub mod actions;
pub mod constants;
pub mod display;
pub mod errors;
pub mod phase;
pub mod settlement;
pub mod state;
pub mod store;
pub mod tally;
pub mod timing;
pub mod view;

pub use actions::{
    account_actions, authorize, authorize_account, legal_actions, Action, ActionRequest, GateContext,
    Intent, ViewerRoles,
};
pub use errors::OracleMarketsError;
pub use phase::{resolve, MarketFilter, Phase};
pub use state::*;
pub use store::{AccountFlags, AccountStateStore, MemoryStore};
pub use view::MarketView;

/// Evaluate a batch of polled markets for one viewer.
///
/// A market whose settlement math fails is logged and skipped; the others
/// still render.
pub fn evaluate_markets<S: AccountStateStore>(
    snapshots: &[MarketSnapshot],
    viewer: &AccountSnapshot,
    store: &mut S,
    config: &ProtocolConfig,
    now: i64,
) -> Vec<MarketView> {
    snapshots
        .iter()
        .filter_map(|snapshot| {
            match MarketView::evaluate(snapshot, viewer, store, config, now) {
                Ok(view) => Some(view),
                Err(e) => {
                    msg!("Market #{} skipped: {}", snapshot.market_id, e);
                    None
                }
            }
        })
        .collect()
}
