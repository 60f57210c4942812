// contracts/research_funding/src/types.rs
//
// A campaign is stored as two entries:
//   - CampaignConfig: written once by `create_campaign`, never rewritten.
//   - CampaignState:  the small mutable part (total, status, withdrawn flag).
// `Campaign` is the joined view returned to callers.

use soroban_sdk::{contracttype, Address, String};

/// Lifecycle state of a campaign.
///
/// `Active` is the only non-terminal state. The transition out of it is
/// committed by `finalize_campaign` once the deadline has passed.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CampaignStatus {
    /// Accepting contributions until the deadline.
    Active,
    /// Finalized with `total_raised >= goal`; the creator may withdraw.
    Successful,
    /// Finalized with `total_raised < goal`; contributors may claim refunds.
    Failed,
}

impl CampaignStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, CampaignStatus::Active)
    }
}

/// Immutable part of a campaign.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CampaignConfig {
    pub id: u64,
    pub title: String,
    /// Target amount in the payment token's smallest unit.
    pub goal: i128,
    /// Ledger timestamp (seconds) at which contributions close.
    pub deadline: u64,
    pub creator: Address,
}

/// Mutable part of a campaign.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CampaignState {
    /// Sum of every accepted contribution. Refunds do not lower it.
    pub total_raised: i128,
    pub status: CampaignStatus,
    pub funds_withdrawn: bool,
}

impl CampaignState {
    pub fn new() -> Self {
        Self {
            total_raised: 0,
            status: CampaignStatus::Active,
            funds_withdrawn: false,
        }
    }
}

/// Full campaign record, as returned by `get_campaign`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Campaign {
    pub id: u64,
    pub title: String,
    pub goal: i128,
    pub deadline: u64,
    pub total_raised: i128,
    pub creator: Address,
    /// Committed status. See `effective_status` for the projected one.
    pub status: CampaignStatus,
    pub funds_withdrawn: bool,
}

impl Campaign {
    pub fn from_parts(config: CampaignConfig, state: CampaignState) -> Self {
        Self {
            id: config.id,
            title: config.title,
            goal: config.goal,
            deadline: config.deadline,
            total_raised: state.total_raised,
            creator: config.creator,
            status: state.status,
            funds_withdrawn: state.funds_withdrawn,
        }
    }
}

/// Contract-wide settings written once by `init`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    /// Asset contributions are paid in and payouts are made in.
    pub payment_token: Address,
    /// Asset minted to contributors. This contract must be its admin.
    pub reward_token: Address,
    /// Reward units credited per unit of payment token.
    pub reward_rate: i128,
}

/// Read-only view used by front ends to render a campaign card.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CampaignSummary {
    pub campaign: Campaign,
    pub effective_status: CampaignStatus,
    /// `total_raised / goal` in basis points, capped at 10_000.
    pub progress_bps: u32,
}

/// Which mutating calls `account` could make on a campaign right now.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Eligibility {
    pub can_contribute: bool,
    pub can_finalize: bool,
    pub can_withdraw: bool,
    pub can_refund: bool,
}
