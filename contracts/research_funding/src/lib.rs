#![no_std]

#[cfg(test)]
#[macro_use]
extern crate std;

use soroban_sdk::{
    contract, contracterror, contractimpl, token, Address, Env, String, Vec,
};

pub mod events;
mod funds;
mod lifecycle;
mod storage;
mod types;

#[cfg(test)]
mod test_events;

pub use funds::REWARD_RATE;
use storage::{
    campaign_count, extend_instance, has_config, load_campaign, load_campaign_config,
    load_campaign_pair, load_config, next_campaign_id, save_campaign_config,
    save_campaign_state, save_config,
};
pub use types::{
    Campaign, CampaignConfig, CampaignState, CampaignStatus, CampaignSummary, Config,
    Eligibility,
};

/// Upper bound on the page size of `list_campaigns`.
pub const MAX_PAGE_SIZE: u32 = 50;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    RewardTokenNotDelegated = 3,
    EmptyTitle = 4,
    InvalidGoal = 5,
    InvalidDuration = 6,
    InvalidAmount = 7,
    Overflow = 8,
    CampaignNotFound = 9,
    NoContribution = 10,
    CampaignNotActive = 11,
    DeadlineNotReached = 12,
    AlreadyFinalized = 13,
    CampaignNotSuccessful = 14,
    FundsAlreadyWithdrawn = 15,
    CampaignNotFailed = 16,
    NotCreator = 17,
}

/// Coarse classification of an [`Error`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// Malformed input: non-positive amounts or durations, empty title.
    InvalidArgument,
    /// Unknown campaign, or no contribution on record.
    NotFound,
    /// Call not valid for the campaign's current status or timing.
    InvalidState,
    /// Caller lacks the required role.
    Unauthorized,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::RewardTokenNotDelegated
            | Error::EmptyTitle
            | Error::InvalidGoal
            | Error::InvalidDuration
            | Error::InvalidAmount
            | Error::Overflow => ErrorKind::InvalidArgument,
            Error::CampaignNotFound | Error::NoContribution => ErrorKind::NotFound,
            Error::AlreadyInitialized
            | Error::NotInitialized
            | Error::CampaignNotActive
            | Error::DeadlineNotReached
            | Error::AlreadyFinalized
            | Error::CampaignNotSuccessful
            | Error::FundsAlreadyWithdrawn
            | Error::CampaignNotFailed => ErrorKind::InvalidState,
            Error::NotCreator => ErrorKind::Unauthorized,
        }
    }
}

#[contract]
pub struct ResearchFunding;

#[contractimpl]
impl ResearchFunding {
    /// Configure the payment and reward assets.
    ///
    /// - Callable once; later calls fail with `AlreadyInitialized`.
    /// - `reward_token` must be a Stellar Asset Contract whose admin is already
    ///   this contract, otherwise `RewardTokenNotDelegated`.
    pub fn init(env: Env, payment_token: Address, reward_token: Address) -> Result<(), Error> {
        if has_config(&env) {
            return Err(Error::AlreadyInitialized);
        }

        let reward_admin = token::StellarAssetClient::new(&env, &reward_token).admin();
        if reward_admin != env.current_contract_address() {
            return Err(Error::RewardTokenNotDelegated);
        }

        save_config(
            &env,
            &Config {
                payment_token,
                reward_token,
                reward_rate: REWARD_RATE,
            },
        );
        extend_instance(&env);
        Ok(())
    }

    /// Open a new campaign and return its id.
    ///
    /// - `creator` must authorize the call and becomes the only account able to withdraw.
    /// - `goal` is in the payment token's smallest unit (must be > 0).
    /// - `duration` is in seconds (must be > 0); `deadline = now + duration`.
    ///
    /// Ids are assigned sequentially from 1.
    pub fn create_campaign(
        env: Env,
        creator: Address,
        title: String,
        goal: i128,
        duration: u64,
    ) -> Result<u64, Error> {
        creator.require_auth();
        load_config(&env)?;

        if title.len() == 0 {
            return Err(Error::EmptyTitle);
        }
        if goal <= 0 {
            return Err(Error::InvalidGoal);
        }
        if duration == 0 {
            return Err(Error::InvalidDuration);
        }
        let deadline = env
            .ledger()
            .timestamp()
            .checked_add(duration)
            .ok_or(Error::Overflow)?;

        let id = next_campaign_id(&env)?;
        let campaign = CampaignConfig {
            id,
            title: title.clone(),
            goal,
            deadline,
            creator: creator.clone(),
        };
        save_campaign_config(&env, &campaign);
        save_campaign_state(&env, id, &CampaignState::new());
        extend_instance(&env);

        events::emit_campaign_created(&env, id, creator, title, goal, deadline);
        Ok(id)
    }

    /// Contribute `amount` of the payment token to campaign `campaign_id`.
    ///
    /// Only accepted while the campaign is active and its deadline has not
    /// passed. The contributor is credited `amount * reward_rate` reward units
    /// in the same invocation.
    pub fn contribute(
        env: Env,
        campaign_id: u64,
        contributor: Address,
        amount: i128,
    ) -> Result<(), Error> {
        contributor.require_auth();
        let config = load_config(&env)?;

        let receipt = funds::contribute(&env, &config, campaign_id, &contributor, amount)?;
        extend_instance(&env);

        events::emit_contribution_received(
            &env,
            campaign_id,
            contributor,
            amount,
            receipt.total_raised,
            receipt.reward,
        );
        Ok(())
    }

    /// Commit the terminal status of a campaign whose deadline has passed.
    ///
    /// Anyone may call this. It succeeds exactly once per campaign.
    pub fn finalize_campaign(env: Env, campaign_id: u64) -> Result<CampaignStatus, Error> {
        let (campaign, mut state) = load_campaign_pair(&env, campaign_id)?;

        let status = lifecycle::finalize(&campaign, &mut state, env.ledger().timestamp())?;
        save_campaign_state(&env, campaign_id, &state);
        extend_instance(&env);

        events::emit_campaign_finalized(&env, campaign_id, status, state.total_raised);
        Ok(status)
    }

    /// Pay the total raised by a successful campaign out to its creator.
    ///
    /// Returns the amount transferred. Succeeds at most once per campaign.
    pub fn withdraw(env: Env, campaign_id: u64, caller: Address) -> Result<i128, Error> {
        caller.require_auth();
        let config = load_config(&env)?;

        let payout = funds::release_to_creator(&env, campaign_id, &caller)?
            .settle(&env, &config.payment_token);
        extend_instance(&env);

        events::emit_funds_withdrawn(&env, campaign_id, payout.recipient, payout.amount);
        Ok(payout.amount)
    }

    /// Return `caller`'s recorded contribution to a failed campaign.
    ///
    /// Returns the amount refunded. The ledger entry is zeroed, so a second
    /// call fails with `NoContribution`.
    pub fn refund(env: Env, campaign_id: u64, caller: Address) -> Result<i128, Error> {
        caller.require_auth();
        let config = load_config(&env)?;

        let payout = funds::release_refund(&env, campaign_id, &caller)?
            .settle(&env, &config.payment_token);
        extend_instance(&env);

        events::emit_refund_issued(&env, campaign_id, payout.recipient, payout.amount);
        Ok(payout.amount)
    }

    // ─────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────

    /// Payment and reward assets recorded by `init`.
    pub fn config(env: Env) -> Result<Config, Error> {
        load_config(&env)
    }

    /// Reward units credited per unit contributed.
    pub fn reward_rate(env: Env) -> i128 {
        load_config(&env)
            .map(|config| config.reward_rate)
            .unwrap_or(REWARD_RATE)
    }

    /// Number of campaigns ever created.
    pub fn campaign_count(env: Env) -> u64 {
        campaign_count(&env)
    }

    /// Retrieve a campaign with its committed status.
    pub fn get_campaign(env: Env, campaign_id: u64) -> Result<Campaign, Error> {
        load_campaign(&env, campaign_id)
    }

    /// Amount `contributor` has on record for the campaign. 0 if none.
    ///
    /// Also bumps the entry's TTL, so backers waiting on a refund keep it live.
    pub fn get_contribution(env: Env, campaign_id: u64, contributor: Address) -> Result<i128, Error> {
        load_campaign_config(&env, campaign_id)?;
        storage::touch_contribution(&env, campaign_id, &contributor);
        Ok(storage::get_contribution(&env, campaign_id, &contributor))
    }

    /// Status projected at the current ledger time. Never persisted.
    pub fn effective_status(env: Env, campaign_id: u64) -> Result<CampaignStatus, Error> {
        let (campaign, state) = load_campaign_pair(&env, campaign_id)?;
        Ok(lifecycle::project_status(&campaign, &state, env.ledger().timestamp()))
    }

    /// Campaign record with its projected status and funding progress.
    pub fn campaign_summary(env: Env, campaign_id: u64) -> Result<CampaignSummary, Error> {
        let (campaign, state) = load_campaign_pair(&env, campaign_id)?;
        let effective_status =
            lifecycle::project_status(&campaign, &state, env.ledger().timestamp());
        let progress_bps = lifecycle::progress_bps(state.total_raised, campaign.goal);

        Ok(CampaignSummary {
            campaign: Campaign::from_parts(campaign, state),
            effective_status,
            progress_bps,
        })
    }

    /// Which of contribute / finalize / withdraw / refund `account` could call now.
    pub fn eligibility(env: Env, campaign_id: u64, account: Address) -> Result<Eligibility, Error> {
        let (campaign, state) = load_campaign_pair(&env, campaign_id)?;
        storage::touch_contribution(&env, campaign_id, &account);
        let contribution = storage::get_contribution(&env, campaign_id, &account);

        Ok(lifecycle::eligibility(
            &campaign,
            &state,
            env.ledger().timestamp(),
            &account,
            contribution,
        ))
    }

    /// Up to `limit` campaigns (capped at `MAX_PAGE_SIZE`) starting at `start_id`.
    pub fn list_campaigns(env: Env, start_id: u64, limit: u32) -> Result<Vec<Campaign>, Error> {
        let mut page = Vec::new(&env);
        let limit = limit.min(MAX_PAGE_SIZE);
        let count = campaign_count(&env);

        let mut id = start_id.max(1);
        while id <= count && page.len() < limit {
            page.push_back(load_campaign(&env, id)?);
            id += 1;
        }
        Ok(page)
    }
}
