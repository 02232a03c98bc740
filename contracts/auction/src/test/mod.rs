pub mod bidding_test;

use crate::{AuctionHouse, AuctionHouseClient, AuctionParams, SealedAuctionParams};
use soroban_sdk::{
    testutils::{Address as _, Ledger, LedgerInfo},
    token, Address, BytesN, Env, String,
};

pub const START: u64 = 1_000;
pub const END: u64 = 2_000;
pub const REVEAL_END: u64 = 3_000;
pub const BIDDER_FUNDS: i128 = 10_000;
pub const ITEM_SUPPLY: i128 = 100;
pub const ITEM_AMOUNT: u64 = 5;

pub struct TestContext {
    pub env: Env,
    pub client: AuctionHouseClient<'static>,
    pub contract_id: Address,
    pub admin: Address,
    pub owner: Address,
    pub native: token::TokenClient<'static>,
    pub native_admin: token::StellarAssetClient<'static>,
    pub item: token::TokenClient<'static>,
    pub item_address: Address,
}

pub fn setup_test() -> TestContext {
    let env = Env::default();
    env.mock_all_auths();

    env.ledger().set(LedgerInfo {
        timestamp: START,
        protocol_version: 23,
        sequence_number: 1,
        network_id: Default::default(),
        base_reserve: 10,
        min_temp_entry_ttl: 100,
        min_persistent_entry_ttl: 100,
        max_entry_ttl: 1_000_000,
    });

    let contract_id = env.register(AuctionHouse, ());
    let client = AuctionHouseClient::new(&env, &contract_id);

    let admin = Address::generate(&env);
    let owner = Address::generate(&env);

    let native_contract = env.register_stellar_asset_contract_v2(admin.clone());
    let native_address = native_contract.address();
    let native = token::TokenClient::new(&env, &native_address);
    let native_admin = token::StellarAssetClient::new(&env, &native_address);

    let item_issuer = Address::generate(&env);
    let item_contract = env.register_stellar_asset_contract_v2(item_issuer);
    let item_address = item_contract.address();
    let item = token::TokenClient::new(&env, &item_address);
    token::StellarAssetClient::new(&env, &item_address).mint(&owner, &ITEM_SUPPLY);

    client.initialize(&admin, &native_address);

    TestContext {
        env,
        client,
        contract_id,
        admin,
        owner,
        native,
        native_admin,
        item,
        item_address,
    }
}

/// A fresh address holding `BIDDER_FUNDS` of the native token.
pub fn funded_bidder(ctx: &TestContext) -> Address {
    let bidder = Address::generate(&ctx.env);
    ctx.native_admin.mint(&bidder, &BIDDER_FUNDS);
    bidder
}

pub fn open_params(
    ctx: &TestContext,
    title: &str,
    bid_floor: u64,
    min_bid_increment: u64,
    bidder_cap: u32,
) -> AuctionParams {
    AuctionParams {
        title: String::from_str(&ctx.env, title),
        bid_floor,
        min_bid_increment,
        start_time: START,
        end_time: END,
        bidder_cap,
        asset: ctx.item_address.clone(),
        item_amount: ITEM_AMOUNT,
    }
}

/// Floor 100, increment 10, two bidders.
pub fn create_scenario_auction(ctx: &TestContext) -> BytesN<32> {
    let params = open_params(ctx, "Scenario", 100, 10, 2);
    ctx.client.create_auction(&ctx.owner, &params)
}

pub fn sealed_params(ctx: &TestContext, title: &str, first_price: bool) -> SealedAuctionParams {
    SealedAuctionParams {
        title: String::from_str(&ctx.env, title),
        bid_floor: 100,
        first_price,
        start_time: START,
        end_time: END,
        reveal_end: REVEAL_END,
        bidder_cap: 3,
        asset: ctx.item_address.clone(),
        item_amount: ITEM_AMOUNT,
    }
}

pub fn set_time(env: &Env, timestamp: u64) {
    env.ledger().set_timestamp(timestamp);
}

/// Escrow equals the summed ledger and the tokens actually held in custody.
pub fn assert_conserved(ctx: &TestContext, auction_id: &BytesN<32>, bidders: &[&Address]) {
    let escrow = ctx.client.escrow_balance(auction_id);
    let mut total: u64 = 0;
    for bidder in bidders.iter() {
        total += ctx.client.get_bid(auction_id, bidder);
    }
    assert_eq!(escrow, total);
    assert_eq!(ctx.native.balance(&ctx.contract_id), i128::from(escrow));
    ctx.client.verify_auction(auction_id);
}
