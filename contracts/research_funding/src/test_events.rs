use soroban_sdk::{
    symbol_short,
    testutils::{Address as _, Events, Ledger},
    token, vec, Address, Env, IntoVal, String, TryIntoVal, Val,
};

use crate::events::{
    CampaignCreated, CampaignFinalized, ContributionReceived, FundsWithdrawn, RefundIssued,
};
use crate::{CampaignStatus, ResearchFunding, ResearchFundingClient};

fn setup() -> (Env, ResearchFundingClient<'static>, token::StellarAssetClient<'static>) {
    let env = Env::default();
    env.mock_all_auths();

    let contract_id = env.register(ResearchFunding, ());
    let client = ResearchFundingClient::new(&env, &contract_id);

    let issuer = Address::generate(&env);
    let payment = env.register_stellar_asset_contract_v2(issuer).address();
    let reward = env.register_stellar_asset_contract_v2(contract_id).address();
    client.init(&payment, &reward);

    let payment_admin = token::StellarAssetClient::new(&env, &payment);
    (env, client, payment_admin)
}

/// Topics and data of the most recent event published by the contract.
fn last_event(env: &Env, client: &ResearchFundingClient) -> (soroban_sdk::Vec<Val>, Val) {
    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");
    assert_eq!(last_event.0, client.address);
    (last_event.1, last_event.2)
}

#[test]
fn test_campaign_created_event() {
    let (env, client, _) = setup();
    let creator = Address::generate(&env);
    let title = String::from_str(&env, "AI Research");
    env.ledger().set_timestamp(500);

    let id = client.create_campaign(&creator, &title, &5_000, &3_600);

    let (topics, data) = last_event(&env, &client);
    let expected_topics = vec![
        &env,
        symbol_short!("created").into_val(&env),
        id.into_val(&env),
    ];
    assert_eq!(topics, expected_topics);

    let event_data: CampaignCreated = data.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        CampaignCreated {
            campaign_id: id,
            creator,
            title,
            goal: 5_000,
            deadline: 4_100,
        }
    );
}

#[test]
fn test_contribution_received_event() {
    let (env, client, payment_admin) = setup();
    let creator = Address::generate(&env);
    let backer = Address::generate(&env);
    payment_admin.mint(&backer, &1_000);

    let id = client.create_campaign(&creator, &String::from_str(&env, "AI"), &5_000, &3_600);
    client.contribute(&id, &backer, &300);
    client.contribute(&id, &backer, &200);

    let (topics, data) = last_event(&env, &client);
    let expected_topics = vec![
        &env,
        symbol_short!("contrib").into_val(&env),
        id.into_val(&env),
    ];
    assert_eq!(topics, expected_topics);

    let event_data: ContributionReceived = data.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        ContributionReceived {
            campaign_id: id,
            contributor: backer,
            amount: 200,
            total_raised: 500,
            reward: 20_000,
        }
    );
}

#[test]
fn test_finalized_and_withdrawn_events() {
    let (env, client, payment_admin) = setup();
    let creator = Address::generate(&env);
    let backer = Address::generate(&env);
    payment_admin.mint(&backer, &5_000);

    let id = client.create_campaign(&creator, &String::from_str(&env, "AI"), &5_000, &3_600);
    client.contribute(&id, &backer, &5_000);
    env.ledger().set_timestamp(3_600);

    client.finalize_campaign(&id);
    let (topics, data) = last_event(&env, &client);
    assert_eq!(
        topics,
        vec![
            &env,
            symbol_short!("finalized").into_val(&env),
            id.into_val(&env),
        ]
    );
    let finalized: CampaignFinalized = data.try_into_val(&env).unwrap();
    assert_eq!(
        finalized,
        CampaignFinalized {
            campaign_id: id,
            status: CampaignStatus::Successful,
            total_raised: 5_000,
        }
    );

    client.withdraw(&id, &creator);
    let (topics, data) = last_event(&env, &client);
    assert_eq!(
        topics,
        vec![
            &env,
            symbol_short!("withdrawn").into_val(&env),
            id.into_val(&env),
        ]
    );
    let withdrawn: FundsWithdrawn = data.try_into_val(&env).unwrap();
    assert_eq!(
        withdrawn,
        FundsWithdrawn {
            campaign_id: id,
            creator,
            amount: 5_000,
        }
    );
}

#[test]
fn test_refund_issued_event() {
    let (env, client, payment_admin) = setup();
    let creator = Address::generate(&env);
    let backer = Address::generate(&env);
    payment_admin.mint(&backer, &1_000);

    let id = client.create_campaign(&creator, &String::from_str(&env, "AI"), &5_000, &3_600);
    client.contribute(&id, &backer, &1_000);
    env.ledger().set_timestamp(3_601);
    client.finalize_campaign(&id);

    client.refund(&id, &backer);
    let (topics, data) = last_event(&env, &client);
    assert_eq!(
        topics,
        vec![
            &env,
            symbol_short!("refunded").into_val(&env),
            id.into_val(&env),
        ]
    );
    let refunded: RefundIssued = data.try_into_val(&env).unwrap();
    assert_eq!(
        refunded,
        RefundIssued {
            campaign_id: id,
            contributor: backer,
            amount: 1_000,
        }
    );
}
