use std::collections::{BTreeMap, BTreeSet};

use anchor_lang::prelude::*;

use crate::errors::OracleMarketsError;

/// Client-local facts about one account on one market.
///
/// The ledger does not expose these, so the client records them after a
/// successful submission and feeds them back into the gate.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct AccountFlags {
    /// A jury vote from this account was confirmed.
    pub has_voted: bool,

    /// Proposer stake/fees were claimed (or the slash accepted).
    pub proposer_claimed: bool,
}

/// Read/write contract for client-local market state.
///
/// Writes are idempotent. The expired latch can be set but never cleared.
pub trait AccountStateStore {
    fn flags(&self, market_id: u64, account: &Pubkey) -> AccountFlags;

    fn record_vote(&mut self, market_id: u64, account: &Pubkey);

    fn record_proposer_claim(&mut self, market_id: u64, account: &Pubkey);

    fn is_market_expired(&self, market_id: u64) -> bool;

    /// Latch `market_id` as permanently expired. Returns true on first latch.
    fn mark_market_expired(&mut self, market_id: u64) -> bool;
}

/// ─── Memory Store ─────────────────────────────────────────────────
///
/// In-process store. Persist it with [`MemoryStore::to_bytes`] and reload
/// with [`MemoryStore::from_bytes`].
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq, Default)]
pub struct MemoryStore {
    accounts: BTreeMap<(u64, Pubkey), AccountFlags>,
    expired_markets: BTreeSet<u64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        self.try_to_vec()
            .map_err(|_| error!(OracleMarketsError::StoreEncoding))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::try_from_slice(bytes).map_err(|_| error!(OracleMarketsError::StoreEncoding))
    }

    fn entry(&mut self, market_id: u64, account: &Pubkey) -> &mut AccountFlags {
        self.accounts.entry((market_id, *account)).or_default()
    }
}

impl AccountStateStore for MemoryStore {
    fn flags(&self, market_id: u64, account: &Pubkey) -> AccountFlags {
        self.accounts
            .get(&(market_id, *account))
            .copied()
            .unwrap_or_default()
    }

    fn record_vote(&mut self, market_id: u64, account: &Pubkey) {
        self.entry(market_id, account).has_voted = true;
    }

    fn record_proposer_claim(&mut self, market_id: u64, account: &Pubkey) {
        self.entry(market_id, account).proposer_claimed = true;
    }

    fn is_market_expired(&self, market_id: u64) -> bool {
        self.expired_markets.contains(&market_id)
    }

    fn mark_market_expired(&mut self, market_id: u64) -> bool {
        let first = self.expired_markets.insert(market_id);
        if first {
            msg!("Market #{} latched as expired: jury can no longer be drawn", market_id);
        }
        first
    }
}
