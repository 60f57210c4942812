// contracts/research_funding/src/lifecycle.rs
//
// Campaign state machine.
//
//   Active ──finalize (now >= deadline)──▶ Successful   if total_raised >= goal
//                                      └─▶ Failed       otherwise
//
// Nothing in this module touches storage. `project_status` is a read-only
// projection; only `finalize` produces a committed transition, and the
// caller decides whether to persist it.

use soroban_sdk::Address;

use crate::{
    types::{CampaignConfig, CampaignState, CampaignStatus, Eligibility},
    Error,
};

pub const MAX_PROGRESS_BPS: u32 = 10_000;

/// Terminal status a campaign with these totals settles into.
pub fn outcome(total_raised: i128, goal: i128) -> CampaignStatus {
    if total_raised >= goal {
        CampaignStatus::Successful
    } else {
        CampaignStatus::Failed
    }
}

/// Status as seen at `now`, without committing anything.
///
/// A committed terminal status always wins. An `Active` campaign whose
/// deadline has passed is reported with the outcome `finalize` would commit.
pub fn project_status(config: &CampaignConfig, state: &CampaignState, now: u64) -> CampaignStatus {
    match state.status {
        CampaignStatus::Active if now >= config.deadline => {
            outcome(state.total_raised, config.goal)
        }
        status => status,
    }
}

/// Contributions are accepted only while the projected status is `Active`,
/// i.e. stored `Active` and `now < deadline`.
pub fn ensure_accepting(config: &CampaignConfig, state: &CampaignState, now: u64) -> Result<(), Error> {
    match project_status(config, state, now) {
        CampaignStatus::Active => Ok(()),
        _ => Err(Error::CampaignNotActive),
    }
}

/// Commit the terminal status into `state`.
///
/// Fails with `AlreadyFinalized` on any campaign that is no longer `Active`,
/// and with `DeadlineNotReached` while `now < deadline`.
pub fn finalize(config: &CampaignConfig, state: &mut CampaignState, now: u64) -> Result<CampaignStatus, Error> {
    if state.status.is_terminal() {
        return Err(Error::AlreadyFinalized);
    }
    if now < config.deadline {
        return Err(Error::DeadlineNotReached);
    }
    let status = outcome(state.total_raised, config.goal);
    state.status = status;
    Ok(status)
}

pub fn ensure_withdrawable(config: &CampaignConfig, state: &CampaignState, caller: &Address) -> Result<(), Error> {
    if &config.creator != caller {
        return Err(Error::NotCreator);
    }
    if state.status != CampaignStatus::Successful {
        return Err(Error::CampaignNotSuccessful);
    }
    if state.funds_withdrawn {
        return Err(Error::FundsAlreadyWithdrawn);
    }
    Ok(())
}

pub fn ensure_refundable(state: &CampaignState, contribution: i128) -> Result<(), Error> {
    if state.status != CampaignStatus::Failed {
        return Err(Error::CampaignNotFailed);
    }
    if contribution <= 0 {
        return Err(Error::NoContribution);
    }
    Ok(())
}

/// Which calls by `account` would currently pass their preconditions.
pub fn eligibility(
    config: &CampaignConfig,
    state: &CampaignState,
    now: u64,
    account: &Address,
    contribution: i128,
) -> Eligibility {
    let can_finalize = state.status == CampaignStatus::Active && now >= config.deadline;
    Eligibility {
        can_contribute: ensure_accepting(config, state, now).is_ok(),
        can_finalize,
        can_withdraw: ensure_withdrawable(config, state, account).is_ok(),
        can_refund: ensure_refundable(state, contribution).is_ok(),
    }
}

/// Funding progress in basis points, capped at 100%.
pub fn progress_bps(total_raised: i128, goal: i128) -> u32 {
    if goal <= 0 || total_raised <= 0 {
        return 0;
    }
    if total_raised >= goal {
        return MAX_PROGRESS_BPS;
    }
    let bps = MAX_PROGRESS_BPS as i128;
    let scaled = match total_raised.checked_mul(bps) {
        Some(scaled) => scaled / goal,
        // Only reachable for amounts near i128::MAX, where goal / bps >= 1.
        None => total_raised / (goal / bps),
    };
    scaled.min(bps) as u32
}
