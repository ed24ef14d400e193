pub mod buy_shares;
pub mod claim;
pub mod create_market;
pub mod dispute;
pub mod finalize;
pub mod jury;
pub mod juror_stake;
pub mod propose;

pub use create_market::*;

use std::collections::BTreeSet;

use anchor_lang::prelude::*;

use crate::errors::OracleMarketsError;
use crate::phase::Phase;
use crate::state::*;
use crate::store::AccountFlags;

/// ─── Action ───────────────────────────────────────────────────────
///
/// Write intents the ledger accepts for a market.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Action {
    BuyShares,
    ProposeOutcome,
    DisputeOutcome,
    FinalizeUndisputed,
    FetchJury,
    SubmitVote,
    FinalizeDispute,
    ClaimRefund,
    ClaimWinnings,
    ClaimProposerStake,
    StakeForJury,
    Unstake,
}

impl Action {
    pub const ALL: [Action; 12] = [
        Action::BuyShares,
        Action::ProposeOutcome,
        Action::DisputeOutcome,
        Action::FinalizeUndisputed,
        Action::FetchJury,
        Action::SubmitVote,
        Action::FinalizeDispute,
        Action::ClaimRefund,
        Action::ClaimWinnings,
        Action::ClaimProposerStake,
        Action::StakeForJury,
        Action::Unstake,
    ];
}

/// A concrete request with its parameters.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionRequest {
    BuyShares { option: BetOption, amount: u64 },
    ProposeOutcome { outcome: Outcome },
    DisputeOutcome { counter_outcome: Outcome },
    FinalizeUndisputed,
    FetchJury,
    SubmitVote { outcome: Outcome },
    FinalizeDispute,
    ClaimRefund,
    ClaimWinnings,
    ClaimProposerStake,
    StakeForJury,
    Unstake,
}

impl ActionRequest {
    pub fn action(&self) -> Action {
        match self {
            ActionRequest::BuyShares { .. } => Action::BuyShares,
            ActionRequest::ProposeOutcome { .. } => Action::ProposeOutcome,
            ActionRequest::DisputeOutcome { .. } => Action::DisputeOutcome,
            ActionRequest::FinalizeUndisputed => Action::FinalizeUndisputed,
            ActionRequest::FetchJury => Action::FetchJury,
            ActionRequest::SubmitVote { .. } => Action::SubmitVote,
            ActionRequest::FinalizeDispute => Action::FinalizeDispute,
            ActionRequest::ClaimRefund => Action::ClaimRefund,
            ActionRequest::ClaimWinnings => Action::ClaimWinnings,
            ActionRequest::ClaimProposerStake => Action::ClaimProposerStake,
            ActionRequest::StakeForJury => Action::StakeForJury,
            ActionRequest::Unstake => Action::Unstake,
        }
    }
}

/// An authorized request, ready to hand to the transaction collaborator.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Intent {
    pub market_id: u64,
    pub request: ActionRequest,
}

/// ─── Viewer Roles ─────────────────────────────────────────────────
///
/// What the viewer is with respect to one market. Derived by the caller;
/// the gate never looks these up itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct ViewerRoles {
    /// Recorded proposer of the current outcome proposal.
    pub outcome_proposer: bool,

    /// Recorded disputer.
    pub disputer: bool,

    /// One of the drawn jurors.
    pub juror: bool,

    /// Created the market and staked the creation amount.
    pub market_proposer: bool,
}

impl ViewerRoles {
    /// Convenience derivation from a snapshot. Missing parts grant no role.
    pub fn derive(account: &Pubkey, snapshot: &MarketSnapshot) -> Self {
        let is = |key: &Pubkey| *key != Pubkey::default() && key == account;
        let resolution = snapshot.resolution.as_ref();

        Self {
            outcome_proposer: resolution.map_or(false, |r| is(&r.proposer)),
            disputer: resolution.map_or(false, |r| is(&r.disputer)),
            juror: snapshot
                .jury
                .as_ref()
                .map_or(false, |jury| jury.contains(account)),
            market_proposer: snapshot.market_proposer.as_ref().map_or(false, is),
        }
    }
}

/// Per-account inputs to the gate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct AccountState {
    pub shares: SharesBalance,
    pub juror_stake: JurorStake,
    pub token_balance: u64,
    pub flags: AccountFlags,
}

/// ─── Gate Context ─────────────────────────────────────────────────
///
/// Everything a precondition may consult.
#[derive(Clone, Copy, Debug)]
pub struct GateContext<'a> {
    pub market_id: u64,
    pub phase: Phase,
    pub market: Option<&'a Market>,
    pub resolution: Option<&'a ResolutionRecord>,
    pub roles: ViewerRoles,
    pub account: &'a AccountState,
    pub config: &'a ProtocolConfig,
    pub now: i64,
    pub jury_expired: bool,
}

pub(crate) fn require_phase(ctx: &GateContext, expected: Phase) -> Result<()> {
    require!(ctx.phase == expected, OracleMarketsError::WrongPhase);
    Ok(())
}

fn available(ctx: &GateContext, action: Action) -> Result<()> {
    match action {
        Action::BuyShares => buy_shares::available(ctx),
        Action::ProposeOutcome => propose::available(ctx),
        Action::DisputeOutcome => dispute::available(ctx),
        Action::FinalizeUndisputed => finalize::undisputed_available(ctx),
        Action::FetchJury => jury::fetch_available(ctx),
        Action::SubmitVote => jury::vote_available(ctx),
        Action::FinalizeDispute => finalize::dispute_available(ctx),
        Action::ClaimRefund => claim::refund_available(ctx),
        Action::ClaimWinnings => claim::winnings_available(ctx),
        Action::ClaimProposerStake => claim::proposer_available(ctx),
        Action::StakeForJury | Action::Unstake => err!(OracleMarketsError::NotMarketAction),
    }
}

/// Every action the viewer may currently take on this market.
///
/// Empty once the jury draw has expired, whatever the ledger status says.
pub fn legal_actions(ctx: &GateContext) -> BTreeSet<Action> {
    if ctx.jury_expired {
        return BTreeSet::new();
    }
    Action::ALL
        .into_iter()
        .filter(|&action| available(ctx, action).is_ok())
        .collect()
}

/// Juror-pool actions open to the account, independent of any market.
pub fn account_actions(account: &AccountState, config: &ProtocolConfig, now: i64) -> BTreeSet<Action> {
    let mut actions = BTreeSet::new();
    if juror_stake::stake_available(account, config).is_ok() {
        actions.insert(Action::StakeForJury);
    }
    if juror_stake::unstake_available(account, now).is_ok() {
        actions.insert(Action::Unstake);
    }
    actions
}

/// Check an account-level request (stake or unstake).
pub fn authorize_account(
    account: &AccountState,
    config: &ProtocolConfig,
    now: i64,
    request: ActionRequest,
) -> Result<ActionRequest> {
    let checked = match request {
        ActionRequest::StakeForJury => juror_stake::stake_available(account, config),
        ActionRequest::Unstake => juror_stake::unstake_available(account, now),
        _ => err!(OracleMarketsError::WrongPhase),
    };
    if let Err(rejection) = checked {
        msg!("Rejected {:?}: {}", request.action(), rejection);
        return Err(rejection);
    }
    Ok(request)
}

/// Check a concrete request, returning the intent to forward on success.
///
/// The ledger may still reject an authorized intent if its state moved on
/// after this snapshot was read.
pub fn authorize(ctx: &GateContext, request: ActionRequest) -> Result<Intent> {
    let checked = match request {
        _ if ctx.jury_expired => err!(OracleMarketsError::JurySelectionExpired),
        ActionRequest::BuyShares { option, amount } => buy_shares::validate(ctx, option, amount),
        ActionRequest::ProposeOutcome { outcome } => propose::validate(ctx, outcome),
        ActionRequest::DisputeOutcome { counter_outcome } => dispute::validate(ctx, counter_outcome),
        ActionRequest::SubmitVote { outcome } => jury::validate_vote(ctx, outcome),
        other => available(ctx, other.action()),
    };

    if let Err(rejection) = checked {
        msg!(
            "Rejected {:?} on market #{} in {:?}: {}",
            request.action(),
            ctx.market_id,
            ctx.phase,
            rejection,
        );
        return Err(rejection);
    }

    Ok(Intent {
        market_id: ctx.market_id,
        request,
    })
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub const END: i64 = 10_000;
    pub const WINDOW_END: i64 = 20_000;
    pub const VOTING_END: i64 = 30_000;

    pub fn market(outcome: Outcome) -> Market {
        Market {
            question: "Will the bridge open by June?".to_string(),
            option_a: "Yes".to_string(),
            option_b: "No".to_string(),
            end_time: END,
            outcome,
            total_option_a_shares: 1_000,
            total_option_b_shares: 500,
            resolved: outcome.is_final(),
            fees_for_creator: 40,
        }
    }

    pub fn resolution(status: ResolutionStatus) -> ResolutionRecord {
        ResolutionRecord {
            status,
            proposer: Pubkey::new_unique(),
            proposed_outcome: Outcome::OptionA,
            disputer: Pubkey::new_unique(),
            disputed_outcome: Outcome::OptionB,
            dispute_window_end: WINDOW_END,
            voting_end: VOTING_END,
            votes_for_proposer: 0,
            votes_for_disputer: 0,
        }
    }

    pub fn funded() -> AccountState {
        AccountState {
            token_balance: 10_000_000,
            ..Default::default()
        }
    }

    pub fn ctx<'a>(
        phase: Phase,
        market: &'a Market,
        resolution: &'a ResolutionRecord,
        roles: ViewerRoles,
        account: &'a AccountState,
        config: &'a ProtocolConfig,
        now: i64,
    ) -> GateContext<'a> {
        GateContext {
            market_id: 1,
            phase,
            market: Some(market),
            resolution: Some(resolution),
            roles,
            account,
            config,
            now,
            jury_expired: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;
    use crate::phase::resolve;

    const PHASES: [Phase; 10] = [
        Phase::TradingOpen,
        Phase::AwaitingProposal,
        Phase::DisputeWindow,
        Phase::ReadyToFinalizeUndisputed,
        Phase::AwaitingJury,
        Phase::JuryVoting,
        Phase::ReadyToFinalizeDispute,
        Phase::Finalized,
        Phase::Expired,
        Phase::Indeterminate,
    ];

    #[test]
    fn test_non_juror_never_offered_vote() {
        let config = ProtocolConfig::default();
        let account = funded();
        let market = market(Outcome::Unresolved);
        let record = resolution(ResolutionStatus::JuryVoting);
        let roles = ViewerRoles {
            outcome_proposer: true,
            disputer: true,
            market_proposer: true,
            juror: false,
        };
        for phase in PHASES {
            for now in [0, END, WINDOW_END, VOTING_END - 1, VOTING_END] {
                let c = ctx(phase, &market, &record, roles, &account, &config, now);
                assert!(!legal_actions(&c).contains(&Action::SubmitVote));
            }
        }
    }

    #[test]
    fn test_proposer_never_offered_dispute() {
        let config = ProtocolConfig::default();
        let account = funded();
        let market = market(Outcome::Unresolved);
        let record = resolution(ResolutionStatus::DisputeWindow);
        let roles = ViewerRoles {
            outcome_proposer: true,
            ..Default::default()
        };
        for phase in PHASES {
            for now in [0, END, WINDOW_END - 1, WINDOW_END] {
                let c = ctx(phase, &market, &record, roles, &account, &config, now);
                assert!(!legal_actions(&c).contains(&Action::DisputeOutcome));
            }
        }
    }

    #[test]
    fn test_finalized_invalid_without_shares_is_empty() {
        let config = ProtocolConfig::default();
        let account = funded();
        let market = market(Outcome::Invalid);
        let record = resolution(ResolutionStatus::Finalized);
        let c = ctx(Phase::Finalized, &market, &record, ViewerRoles::default(), &account, &config, VOTING_END);
        assert!(legal_actions(&c).is_empty());

        let c = ctx(Phase::Indeterminate, &market, &record, ViewerRoles::default(), &account, &config, VOTING_END);
        assert!(legal_actions(&c).is_empty());
    }

    #[test]
    fn test_juror_staking_stays_off_market_actions() {
        let config = ProtocolConfig::default();
        let mut account = funded();
        let market = market(Outcome::Unresolved);
        let record = resolution(ResolutionStatus::Pending);
        let c = ctx(Phase::TradingOpen, &market, &record, ViewerRoles::default(), &account, &config, 0);

        assert!(!legal_actions(&c).contains(&Action::StakeForJury));
        assert_eq!(
            authorize(&c, ActionRequest::StakeForJury).unwrap_err(),
            OracleMarketsError::NotMarketAction.into()
        );
        assert_eq!(
            account_actions(&account, &config, 0).into_iter().collect::<Vec<_>>(),
            vec![Action::StakeForJury]
        );
        assert_eq!(
            authorize_account(&account, &config, 0, ActionRequest::StakeForJury).unwrap(),
            ActionRequest::StakeForJury
        );

        account.juror_stake = JurorStake { stake: 500_000, unlock_time: 100 };
        assert!(account_actions(&account, &config, 99).is_empty());
        assert_eq!(
            account_actions(&account, &config, 100).into_iter().collect::<Vec<_>>(),
            vec![Action::Unstake]
        );
        assert_eq!(
            authorize_account(&account, &config, 0, ActionRequest::ClaimRefund).unwrap_err(),
            OracleMarketsError::WrongPhase.into()
        );
    }

    #[test]
    fn test_latched_market_offers_nothing() {
        let config = ProtocolConfig::default();
        let account = funded();
        let market = market(Outcome::Unresolved);
        let record = resolution(ResolutionStatus::JuryVoting);
        let roles = ViewerRoles {
            juror: true,
            ..Default::default()
        };
        let mut c = ctx(Phase::JuryVoting, &market, &record, roles, &account, &config, VOTING_END - 1);
        assert!(legal_actions(&c).contains(&Action::SubmitVote));

        c.jury_expired = true;
        assert!(legal_actions(&c).is_empty());
        assert_eq!(
            authorize(&c, ActionRequest::SubmitVote { outcome: Outcome::OptionA }).unwrap_err(),
            OracleMarketsError::JurySelectionExpired.into()
        );
    }

    #[test]
    fn test_actions_follow_resolved_phase() {
        let config = ProtocolConfig::default();
        let account = funded();
        let market = market(Outcome::Unresolved);
        let expectations = [
            (ResolutionStatus::Pending, END - 1, Action::BuyShares),
            (ResolutionStatus::Pending, END, Action::ProposeOutcome),
            (ResolutionStatus::DisputeWindow, WINDOW_END - 1, Action::DisputeOutcome),
            (ResolutionStatus::DisputeWindow, WINDOW_END, Action::FinalizeUndisputed),
            (ResolutionStatus::InDispute, WINDOW_END, Action::FetchJury),
            (ResolutionStatus::JuryVoting, VOTING_END, Action::FinalizeDispute),
        ];
        for (status, now, expected) in expectations {
            let record = resolution(status);
            let phase = resolve(Some(&market), Some(&record), now, false);
            let c = ctx(phase, &market, &record, ViewerRoles::default(), &account, &config, now);
            let actions = legal_actions(&c);
            assert!(actions.contains(&expected), "{:?} missing in {:?}", expected, phase);
            assert_eq!(actions.len(), 1, "{:?}: {:?}", phase, actions);
        }
    }

    #[test]
    fn test_dual_claim_is_two_independent_actions() {
        let config = ProtocolConfig::default();
        let account = AccountState {
            shares: SharesBalance { option_a_shares: 100, option_b_shares: 0 },
            ..Default::default()
        };
        let market = market(Outcome::OptionA);
        let record = resolution(ResolutionStatus::Finalized);
        let roles = ViewerRoles {
            market_proposer: true,
            ..Default::default()
        };
        let c = ctx(Phase::Finalized, &market, &record, roles, &account, &config, VOTING_END);
        let actions = legal_actions(&c);
        assert_eq!(
            actions.into_iter().collect::<Vec<_>>(),
            vec![Action::ClaimWinnings, Action::ClaimProposerStake]
        );
    }

    #[test]
    fn test_authorize_returns_intent_or_named_reason() {
        let config = ProtocolConfig::default();
        let account = funded();
        let market = market(Outcome::Unresolved);
        let record = resolution(ResolutionStatus::Pending);
        let c = ctx(Phase::TradingOpen, &market, &record, ViewerRoles::default(), &account, &config, 0);

        let request = ActionRequest::BuyShares { option: BetOption::B, amount: 250 };
        assert_eq!(authorize(&c, request).unwrap(), Intent { market_id: 1, request });

        let err = authorize(&c, ActionRequest::FinalizeDispute).unwrap_err();
        assert_eq!(err, OracleMarketsError::WrongPhase.into());
    }

    #[test]
    fn test_roles_derived_from_snapshot() {
        let viewer = Pubkey::new_unique();
        let mut record = resolution(ResolutionStatus::JuryVoting);
        record.proposer = viewer;
        let mut members = [Pubkey::new_unique(); crate::constants::JURY_SIZE];
        members[9] = viewer;

        let snapshot = MarketSnapshot {
            market_id: 3,
            resolution: Some(record),
            jury: Some(Jury::new(members)),
            market_proposer: Some(Pubkey::new_unique()),
            ..Default::default()
        };
        let roles = ViewerRoles::derive(&viewer, &snapshot);
        assert!(roles.outcome_proposer);
        assert!(roles.juror);
        assert!(!roles.disputer);
        assert!(!roles.market_proposer);

        let nobody = ViewerRoles::derive(&Pubkey::default(), &MarketSnapshot::default());
        assert_eq!(nobody, ViewerRoles::default());
    }
}
