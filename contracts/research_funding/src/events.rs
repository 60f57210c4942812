use soroban_sdk::{contracttype, symbol_short, Address, Env, String};

use crate::types::CampaignStatus;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CampaignCreated {
    pub campaign_id: u64,
    pub creator: Address,
    pub title: String,
    pub goal: i128,
    pub deadline: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ContributionReceived {
    pub campaign_id: u64,
    pub contributor: Address,
    pub amount: i128,
    pub total_raised: i128,
    pub reward: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CampaignFinalized {
    pub campaign_id: u64,
    pub status: CampaignStatus,
    pub total_raised: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FundsWithdrawn {
    pub campaign_id: u64,
    pub creator: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RefundIssued {
    pub campaign_id: u64,
    pub contributor: Address,
    pub amount: i128,
}

pub fn emit_campaign_created(
    env: &Env,
    campaign_id: u64,
    creator: Address,
    title: String,
    goal: i128,
    deadline: u64,
) {
    let topics = (symbol_short!("created"), campaign_id);
    let data = CampaignCreated {
        campaign_id,
        creator,
        title,
        goal,
        deadline,
    };
    env.events().publish(topics, data);
}

pub fn emit_contribution_received(
    env: &Env,
    campaign_id: u64,
    contributor: Address,
    amount: i128,
    total_raised: i128,
    reward: i128,
) {
    let topics = (symbol_short!("contrib"), campaign_id);
    let data = ContributionReceived {
        campaign_id,
        contributor,
        amount,
        total_raised,
        reward,
    };
    env.events().publish(topics, data);
}

pub fn emit_campaign_finalized(
    env: &Env,
    campaign_id: u64,
    status: CampaignStatus,
    total_raised: i128,
) {
    let topics = (symbol_short!("finalized"), campaign_id);
    let data = CampaignFinalized {
        campaign_id,
        status,
        total_raised,
    };
    env.events().publish(topics, data);
}

pub fn emit_funds_withdrawn(env: &Env, campaign_id: u64, creator: Address, amount: i128) {
    let topics = (symbol_short!("withdrawn"), campaign_id);
    let data = FundsWithdrawn {
        campaign_id,
        creator,
        amount,
    };
    env.events().publish(topics, data);
}

pub fn emit_refund_issued(env: &Env, campaign_id: u64, contributor: Address, amount: i128) {
    let topics = (symbol_short!("refunded"), campaign_id);
    let data = RefundIssued {
        campaign_id,
        contributor,
        amount,
    };
    env.events().publish(topics, data);
}
