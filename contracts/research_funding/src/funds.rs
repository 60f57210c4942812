// contracts/research_funding/src/funds.rs
//
// Funds accounting.
//
// Outbound value only leaves the contract through `Payout::settle`, and a
// `Payout` can only be obtained from `release_to_creator` / `release_refund`
// after the bookkeeping that authorises it (withdrawn flag, zeroed ledger
// entry) has been written. A nested call arriving during the transfer sees the
// post-payout state and fails its own preconditions.

use soroban_sdk::{token, Address, Env};

use crate::{
    lifecycle,
    storage::{
        clear_contribution, get_contribution, load_campaign_pair, save_campaign_state,
        set_contribution,
    },
    types::Config,
    Error,
};

/// Reward units credited per unit of payment token contributed.
pub const REWARD_RATE: i128 = 100;

/// Reward owed for a contribution of `amount`.
pub fn reward_for(amount: i128, rate: i128) -> Result<i128, Error> {
    amount.checked_mul(rate).ok_or(Error::Overflow)
}

/// Result of a recorded contribution.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Receipt {
    pub total_raised: i128,
    pub reward: i128,
}

/// Accept `amount` from `contributor` into campaign `id`.
///
/// All preconditions and arithmetic are checked before the first write, so a
/// rejected contribution leaves the ledger untouched. The host rolls back the
/// ledger writes if the token pull or the reward mint fails afterwards.
pub fn contribute(
    env: &Env,
    config: &Config,
    id: u64,
    contributor: &Address,
    amount: i128,
) -> Result<Receipt, Error> {
    if amount <= 0 {
        return Err(Error::InvalidAmount);
    }

    let (campaign, mut state) = load_campaign_pair(env, id)?;
    lifecycle::ensure_accepting(&campaign, &state, env.ledger().timestamp())?;

    let total_raised = state
        .total_raised
        .checked_add(amount)
        .ok_or(Error::Overflow)?;
    let contributed = get_contribution(env, id, contributor)
        .checked_add(amount)
        .ok_or(Error::Overflow)?;
    let reward = reward_for(amount, config.reward_rate)?;

    state.total_raised = total_raised;
    save_campaign_state(env, id, &state);
    set_contribution(env, id, contributor, contributed);

    let contract = env.current_contract_address();
    token::Client::new(env, &config.payment_token).transfer(contributor, &contract, &amount);
    token::StellarAssetClient::new(env, &config.reward_token).mint(contributor, &reward);

    Ok(Receipt {
        total_raised,
        reward,
    })
}

/// A transfer of payment token owed by this contract.
#[must_use]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Payout {
    pub recipient: Address,
    pub amount: i128,
}

impl Payout {
    /// Move the funds. Bookkeeping has already been committed by whoever
    /// produced this payout.
    pub fn settle(self, env: &Env, payment_token: &Address) -> Self {
        if self.amount > 0 {
            token::Client::new(env, payment_token).transfer(
                &env.current_contract_address(),
                &self.recipient,
                &self.amount,
            );
        }
        self
    }
}

/// Mark campaign `id` withdrawn and return the payout owed to its creator.
pub fn release_to_creator(env: &Env, id: u64, caller: &Address) -> Result<Payout, Error> {
    let (campaign, mut state) = load_campaign_pair(env, id)?;
    lifecycle::ensure_withdrawable(&campaign, &state, caller)?;

    state.funds_withdrawn = true;
    save_campaign_state(env, id, &state);

    Ok(Payout {
        recipient: campaign.creator,
        amount: state.total_raised,
    })
}

/// Zero `caller`'s ledger entry on failed campaign `id` and return the refund.
pub fn release_refund(env: &Env, id: u64, caller: &Address) -> Result<Payout, Error> {
    let (_, state) = load_campaign_pair(env, id)?;
    let amount = get_contribution(env, id, caller);
    lifecycle::ensure_refundable(&state, amount)?;

    clear_contribution(env, id, caller);

    Ok(Payout {
        recipient: caller.clone(),
        amount,
    })
}
