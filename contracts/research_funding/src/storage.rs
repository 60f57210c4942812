// contracts/research_funding/src/storage.rs
//
// Storage helpers for ResearchFunding.
//
// Layout:
//   instance   DataKey::Config                      → Config
//   instance   DataKey::CampaignCount               → u64
//   persistent DataKey::CampaignConfig(id)          → CampaignConfig (write once)
//   persistent DataKey::CampaignState(id)           → CampaignState
//   persistent DataKey::Contribution(id, address)   → i128
//
// Campaign ids are dense: 1..=CampaignCount.

use soroban_sdk::{contracttype, Address, Env};

use crate::{
    types::{Campaign, CampaignConfig, CampaignState, Config},
    Error,
};

const DAY_IN_LEDGERS: u32 = 17_280;

pub const INSTANCE_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
pub const INSTANCE_LIFETIME_THRESHOLD: u32 = INSTANCE_BUMP_AMOUNT - DAY_IN_LEDGERS;

pub const PERSISTENT_BUMP_AMOUNT: u32 = 120 * DAY_IN_LEDGERS;
pub const PERSISTENT_LIFETIME_THRESHOLD: u32 = PERSISTENT_BUMP_AMOUNT - 7 * DAY_IN_LEDGERS;

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Config,
    CampaignCount,
    CampaignConfig(u64),
    CampaignState(u64),
    Contribution(u64, Address),
}

// ─────────────────────────────────────────────────────────
// TTL upkeep
// ─────────────────────────────────────────────────────────

pub fn extend_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

fn extend_persistent(env: &Env, key: &DataKey) {
    env.storage().persistent().extend_ttl(
        key,
        PERSISTENT_LIFETIME_THRESHOLD,
        PERSISTENT_BUMP_AMOUNT,
    );
}

// ─────────────────────────────────────────────────────────
// Config
// ─────────────────────────────────────────────────────────

pub fn has_config(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Config)
}

pub fn save_config(env: &Env, config: &Config) {
    env.storage().instance().set(&DataKey::Config, config);
}

/// Fails with `Error::NotInitialized` until `init` has run.
pub fn load_config(env: &Env) -> Result<Config, Error> {
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(Error::NotInitialized)
}

// ─────────────────────────────────────────────────────────
// Campaign counter
// ─────────────────────────────────────────────────────────

/// Number of campaigns ever created. Also the highest assigned id.
pub fn campaign_count(env: &Env) -> u64 {
    env.storage()
        .instance()
        .get(&DataKey::CampaignCount)
        .unwrap_or(0)
}

/// Reserve the next campaign id. The first campaign gets id 1.
pub fn next_campaign_id(env: &Env) -> Result<u64, Error> {
    let id = campaign_count(env).checked_add(1).ok_or(Error::Overflow)?;
    env.storage().instance().set(&DataKey::CampaignCount, &id);
    Ok(id)
}

// ─────────────────────────────────────────────────────────
// Campaign records
// ─────────────────────────────────────────────────────────

fn ensure_known(env: &Env, id: u64) -> Result<(), Error> {
    if id == 0 || id > campaign_count(env) {
        return Err(Error::CampaignNotFound);
    }
    Ok(())
}

pub fn save_campaign_config(env: &Env, config: &CampaignConfig) {
    let key = DataKey::CampaignConfig(config.id);
    env.storage().persistent().set(&key, config);
    extend_persistent(env, &key);
}

pub fn load_campaign_config(env: &Env, id: u64) -> Result<CampaignConfig, Error> {
    ensure_known(env, id)?;
    env.storage()
        .persistent()
        .get(&DataKey::CampaignConfig(id))
        .ok_or(Error::CampaignNotFound)
}

/// Write the mutable half and keep both halves of the campaign live together.
pub fn save_campaign_state(env: &Env, id: u64, state: &CampaignState) {
    let key = DataKey::CampaignState(id);
    env.storage().persistent().set(&key, state);
    extend_persistent(env, &key);
    extend_persistent(env, &DataKey::CampaignConfig(id));
}

pub fn load_campaign_state(env: &Env, id: u64) -> Result<CampaignState, Error> {
    ensure_known(env, id)?;
    env.storage()
        .persistent()
        .get(&DataKey::CampaignState(id))
        .ok_or(Error::CampaignNotFound)
}

/// Read both halves of a campaign.
pub fn load_campaign_pair(env: &Env, id: u64) -> Result<(CampaignConfig, CampaignState), Error> {
    let config = load_campaign_config(env, id)?;
    let state = load_campaign_state(env, id)?;
    Ok((config, state))
}

pub fn load_campaign(env: &Env, id: u64) -> Result<Campaign, Error> {
    let (config, state) = load_campaign_pair(env, id)?;
    Ok(Campaign::from_parts(config, state))
}

// ─────────────────────────────────────────────────────────
// Contribution ledger
// ─────────────────────────────────────────────────────────

/// Amount `contributor` currently has on record for `id`. 0 if none.
pub fn get_contribution(env: &Env, id: u64, contributor: &Address) -> i128 {
    env.storage()
        .persistent()
        .get(&DataKey::Contribution(id, contributor.clone()))
        .unwrap_or(0)
}

pub fn set_contribution(env: &Env, id: u64, contributor: &Address, amount: i128) {
    let key = DataKey::Contribution(id, contributor.clone());
    env.storage().persistent().set(&key, &amount);
    extend_persistent(env, &key);
}

/// Bump the TTL of `contributor`'s entry for `id`, if there is one.
pub fn touch_contribution(env: &Env, id: u64, contributor: &Address) {
    let key = DataKey::Contribution(id, contributor.clone());
    if env.storage().persistent().has(&key) {
        extend_persistent(env, &key);
    }
}

/// Zero the entry by removing it; reads return 0 afterwards.
pub fn clear_contribution(env: &Env, id: u64, contributor: &Address) {
    env.storage()
        .persistent()
        .remove(&DataKey::Contribution(id, contributor.clone()));
}
