use crate::test::{
    assert_conserved, create_scenario_auction, funded_bidder, open_params, set_time, setup_test,
    BIDDER_FUNDS, END, START,
};
use crate::Error;
use soroban_sdk::{testutils::Address as _, Address, BytesN};

#[test]
fn test_cumulative_bids_scenario() {
    let ctx = setup_test();
    let auction_id = create_scenario_auction(&ctx);
    let bidder1 = funded_bidder(&ctx);
    let bidder2 = funded_bidder(&ctx);

    ctx.client.make_bid(&auction_id, &bidder1, &100);
    assert_eq!(ctx.client.get_highest_bid(&auction_id), (Some(bidder1.clone()), 100));
    assert_conserved(&ctx, &auction_id, &[&bidder1, &bidder2]);

    ctx.client.make_bid(&auction_id, &bidder2, &120);
    assert_eq!(ctx.client.get_highest_bid(&auction_id), (Some(bidder2.clone()), 120));
    assert_conserved(&ctx, &auction_id, &[&bidder1, &bidder2]);

    // Top-up: 100 already escrowed plus 50 beats 120 + 10
    ctx.client.make_bid(&auction_id, &bidder1, &50);
    assert_eq!(ctx.client.get_highest_bid(&auction_id), (Some(bidder1.clone()), 150));
    assert_eq!(ctx.client.get_bid(&auction_id, &bidder1), 150);
    assert_eq!(ctx.client.get_bid(&auction_id, &bidder2), 120);
    assert_eq!(ctx.client.escrow_balance(&auction_id), 270);
    assert_conserved(&ctx, &auction_id, &[&bidder1, &bidder2]);

    assert_eq!(ctx.native.balance(&bidder1), BIDDER_FUNDS - 150);
    assert_eq!(ctx.native.balance(&bidder2), BIDDER_FUNDS - 120);
}

#[test]
fn test_equal_bid_from_non_leader_rejected() {
    let ctx = setup_test();
    let auction_id = create_scenario_auction(&ctx);
    let bidder1 = funded_bidder(&ctx);
    let bidder2 = funded_bidder(&ctx);

    ctx.client.make_bid(&auction_id, &bidder1, &120);
    let before = ctx.client.get_auction(&auction_id);

    let result = ctx.client.try_make_bid(&auction_id, &bidder2, &120);
    assert_eq!(result, Err(Ok(Error::BidTooLow)));

    // Under the increment is rejected too
    let result = ctx.client.try_make_bid(&auction_id, &bidder2, &129);
    assert_eq!(result, Err(Ok(Error::BidTooLow)));

    assert_eq!(ctx.client.get_auction(&auction_id), before);
    assert_eq!(ctx.native.balance(&bidder2), BIDDER_FUNDS);
    assert_conserved(&ctx, &auction_id, &[&bidder1, &bidder2]);
}

#[test]
fn test_first_bid_must_reach_floor() {
    let ctx = setup_test();
    let auction_id = create_scenario_auction(&ctx);
    let bidder = funded_bidder(&ctx);

    let result = ctx.client.try_make_bid(&auction_id, &bidder, &99);
    assert_eq!(result, Err(Ok(Error::BidTooLow)));
    assert_eq!(ctx.client.get_auction(&auction_id).ledger.len(), 0);

    ctx.client.make_bid(&auction_id, &bidder, &100);
    assert_eq!(ctx.client.get_highest_bid(&auction_id), (Some(bidder), 100));
}

#[test]
fn test_leader_can_top_up_by_any_amount() {
    let ctx = setup_test();
    let auction_id = create_scenario_auction(&ctx);
    let bidder = funded_bidder(&ctx);

    ctx.client.make_bid(&auction_id, &bidder, &100);
    ctx.client.make_bid(&auction_id, &bidder, &1);

    assert_eq!(ctx.client.get_highest_bid(&auction_id), (Some(bidder.clone()), 101));
    assert_eq!(ctx.client.get_auction(&auction_id).ledger.len(), 1);
    assert_conserved(&ctx, &auction_id, &[&bidder]);
}

#[test]
fn test_zero_amount_rejected() {
    let ctx = setup_test();
    let auction_id = create_scenario_auction(&ctx);
    let bidder = funded_bidder(&ctx);

    ctx.client.make_bid(&auction_id, &bidder, &100);
    let result = ctx.client.try_make_bid(&auction_id, &bidder, &0);
    assert_eq!(result, Err(Ok(Error::InvalidAmount)));
}

#[test]
fn test_bidder_cap_enforced() {
    let ctx = setup_test();
    let auction_id = create_scenario_auction(&ctx);
    let bidder1 = funded_bidder(&ctx);
    let bidder2 = funded_bidder(&ctx);
    let bidder3 = funded_bidder(&ctx);

    ctx.client.make_bid(&auction_id, &bidder1, &100);
    ctx.client.make_bid(&auction_id, &bidder2, &110);

    let result = ctx.client.try_make_bid(&auction_id, &bidder3, &500);
    assert_eq!(result, Err(Ok(Error::BidderCapExceeded)));

    // Known bidders keep bidding
    ctx.client.make_bid(&auction_id, &bidder1, &20);
    assert_eq!(ctx.client.get_highest_bid(&auction_id), (Some(bidder1.clone()), 120));

    // A reclaimed entry still occupies its slot
    ctx.client.reclaim_bid(&auction_id, &bidder2);
    let result = ctx.client.try_make_bid(&auction_id, &bidder3, &500);
    assert_eq!(result, Err(Ok(Error::BidderCapExceeded)));
    assert_eq!(ctx.native.balance(&bidder3), BIDDER_FUNDS);
}

#[test]
fn test_bidding_window() {
    let ctx = setup_test();
    let mut params = open_params(&ctx, "Later", 100, 10, 2);
    params.start_time = START + 100;
    let auction_id = ctx.client.create_auction(&ctx.owner, &params);
    let bidder = funded_bidder(&ctx);

    let result = ctx.client.try_make_bid(&auction_id, &bidder, &100);
    assert_eq!(result, Err(Ok(Error::AuctionNotActive)));

    set_time(&ctx.env, START + 100);
    ctx.client.make_bid(&auction_id, &bidder, &100);

    // The end time itself is still inside the window
    set_time(&ctx.env, END);
    ctx.client.make_bid(&auction_id, &bidder, &5);

    set_time(&ctx.env, END + 1);
    let result = ctx.client.try_make_bid(&auction_id, &bidder, &5);
    assert_eq!(result, Err(Ok(Error::AuctionNotActive)));
    assert_eq!(ctx.client.get_bid(&auction_id, &bidder), 105);
}

#[test]
fn test_cancelled_auction_rejects_bids() {
    let ctx = setup_test();
    let auction_id = create_scenario_auction(&ctx);
    let bidder = funded_bidder(&ctx);

    ctx.client.cancel_auction(&auction_id, &ctx.owner);

    let result = ctx.client.try_make_bid(&auction_id, &bidder, &100);
    assert_eq!(result, Err(Ok(Error::AuctionNotActive)));
}

#[test]
fn test_owner_cannot_bid() {
    let ctx = setup_test();
    let auction_id = create_scenario_auction(&ctx);
    ctx.native_admin.mint(&ctx.owner, &BIDDER_FUNDS);

    let result = ctx.client.try_make_bid(&auction_id, &ctx.owner, &100);
    assert_eq!(result, Err(Ok(Error::OwnerCannotBid)));
}

#[test]
fn test_failed_payment_leaves_state_untouched() {
    let ctx = setup_test();
    let auction_id = create_scenario_auction(&ctx);
    let bidder = funded_bidder(&ctx);
    let broke = Address::generate(&ctx.env);
    ctx.native_admin.mint(&broke, &50);

    ctx.client.make_bid(&auction_id, &bidder, &100);
    let before = ctx.client.get_auction(&auction_id);

    let result = ctx.client.try_make_bid(&auction_id, &broke, &200);
    assert_eq!(result, Err(Ok(Error::TransferFailed)));

    assert_eq!(ctx.client.get_auction(&auction_id), before);
    assert_eq!(ctx.client.get_bid(&auction_id, &broke), 0);
    assert_eq!(ctx.native.balance(&broke), 50);
    assert_conserved(&ctx, &auction_id, &[&bidder, &broke]);
}

#[test]
fn test_leadership_is_monotonic() {
    let ctx = setup_test();
    let params = open_params(&ctx, "Ladder", 10, 5, 3);
    let auction_id = ctx.client.create_auction(&ctx.owner, &params);
    let bidders = [funded_bidder(&ctx), funded_bidder(&ctx), funded_bidder(&ctx)];

    let rounds: [(usize, u64); 8] = [
        (0, 10),
        (1, 15),
        (2, 40),
        (0, 40),
        (0, 1),
        (1, 60),
        (2, 3),
        (2, 68),
    ];

    let mut last_highest = 0;
    for (who, amount) in rounds.iter() {
        let _ = ctx.client.try_make_bid(&auction_id, &bidders[*who], amount);

        let (leader, highest) = ctx.client.get_highest_bid(&auction_id);
        assert!(highest >= last_highest);
        last_highest = highest;

        let mut max_balance = 0;
        for bidder in bidders.iter() {
            max_balance = max_balance.max(ctx.client.get_bid(&auction_id, bidder));
        }
        assert_eq!(highest, max_balance);
        if let Some(leader) = leader {
            assert_eq!(ctx.client.get_bid(&auction_id, &leader), highest);
        }
        assert_conserved(&ctx, &auction_id, &[&bidders[0], &bidders[1], &bidders[2]]);
    }

    assert_eq!(ctx.client.get_highest_bid(&auction_id), (Some(bidders[2].clone()), 108));
}

#[test]
fn test_bid_on_unknown_auction() {
    let ctx = setup_test();
    let bidder = funded_bidder(&ctx);
    let unknown = BytesN::from_array(&ctx.env, &[7u8; 32]);

    let result = ctx.client.try_make_bid(&unknown, &bidder, &100);
    assert_eq!(result, Err(Ok(Error::AuctionNotFound)));
}
