//! Open ascending auctions with cumulative bids.

use soroban_sdk::{Address, BytesN, Env};

use crate::custody;
use crate::derive::{self, OPEN_AUCTION_LABEL};
use crate::errors::Error;
use crate::events::{
    AuctionCancelledEventData, AuctionCreatedEventData, BidPlacedEventData,
    BidReclaimedEventData, ItemReleasedEventData, WinningBidWithdrawnEventData,
};
use crate::invariants;
use crate::ledger::BidRule;
use crate::storage;
use crate::types::{
    AuctionParams, AuctionRecord, AuctionState, BidLedger, ItemDescriptor,
};

pub fn load(env: &Env, auction_id: &BytesN<32>) -> Result<AuctionRecord, Error> {
    storage::get_auction(env, auction_id).ok_or(Error::AuctionNotFound)
}

fn commit(env: &Env, auction: &AuctionRecord) -> Result<(), Error> {
    invariants::check_auction(auction)?;
    storage::save_auction(env, auction);
    Ok(())
}

fn has_ended(env: &Env, auction: &AuctionRecord) -> bool {
    env.ledger().timestamp() > auction.end_time
}

/// Derived lifecycle state. `end_time` itself still counts as open, so an
/// auction reads `Ended` only from `end_time + 1` on.
pub fn state(env: &Env, auction: &AuctionRecord) -> AuctionState {
    if auction.cancelled {
        return AuctionState::Cancelled;
    }
    if !has_ended(env, auction) {
        return AuctionState::Active;
    }
    let item_done = auction.item_withdrawn || !auction.item.deposited;
    let funds_done = auction.highest_bidder.is_none() || auction.winning_bid_withdrawn;
    if item_done && funds_done {
        AuctionState::Settled
    } else {
        AuctionState::Ended
    }
}

/// Shared settlement gate for the winning bid and the item.
fn require_settleable(env: &Env, auction: &AuctionRecord) -> Result<Address, Error> {
    if auction.cancelled {
        return Err(Error::AuctionCancelled);
    }
    if !has_ended(env, auction) {
        return Err(Error::NotYetEnded);
    }
    auction.highest_bidder.clone().ok_or(Error::NoWinningBid)
}

pub fn create_auction(env: &Env, owner: Address, params: AuctionParams) -> Result<BytesN<32>, Error> {
    owner.require_auth();
    storage::get_config(env).ok_or(Error::NotInitialized)?;

    let derived = derive::derive_address(env, OPEN_AUCTION_LABEL, &owner, &params.title)?;
    if storage::has_auction(env, &derived.id) {
        return Err(Error::DuplicateAuction);
    }

    let now = env.ledger().timestamp();
    let start_time = if params.start_time == 0 { now } else { params.start_time };
    if params.end_time <= start_time || params.end_time <= now {
        return Err(Error::InvalidTiming);
    }
    if params.min_bid_increment == 0 {
        return Err(Error::InvalidIncrement);
    }

    let item = ItemDescriptor {
        asset: params.asset,
        amount: params.item_amount,
        deposited: params.item_amount > 0,
    };
    if item.deposited {
        custody::deposit_item(env, &item, &owner)?;
    }

    let auction = AuctionRecord {
        id: derived.id.clone(),
        nonce: derived.nonce,
        owner: owner.clone(),
        title: params.title,
        start_time,
        end_time: params.end_time,
        cancelled: false,
        bid_floor: params.bid_floor,
        min_bid_increment: params.min_bid_increment,
        bidder_cap: params.bidder_cap,
        item,
        highest_bidder: None,
        highest_bid: 0,
        ledger: BidLedger::new(env),
        escrow_balance: 0,
        winning_bid_withdrawn: false,
        item_withdrawn: false,
    };
    commit(env, &auction)?;
    storage::add_owner_auction(env, &owner, &auction.id);

    AuctionCreatedEventData {
        auction_id: auction.id.clone(),
        owner,
        sealed: false,
        end_time: auction.end_time,
        item_amount: auction.item.amount,
    }
    .publish(env);

    Ok(auction.id)
}

pub fn make_bid(env: &Env, auction_id: BytesN<32>, bidder: Address, amount: u64) -> Result<(), Error> {
    bidder.require_auth();

    if amount == 0 {
        return Err(Error::InvalidAmount);
    }

    let mut auction = load(env, &auction_id)?;

    let now = env.ledger().timestamp();
    if auction.cancelled || now < auction.start_time || now > auction.end_time {
        return Err(Error::AuctionNotActive);
    }
    if bidder == auction.owner {
        return Err(Error::OwnerCannotBid);
    }
    if !auction.ledger.contains(&bidder) && auction.ledger.len() >= auction.bidder_cap {
        return Err(Error::BidderCapExceeded);
    }

    let cumulative = auction
        .ledger
        .balance_of(&bidder)
        .checked_add(amount)
        .ok_or(Error::ArithmeticOverflow)?;

    BidRule {
        bid_floor: auction.bid_floor,
        min_bid_increment: auction.min_bid_increment,
        highest_bidder: auction.highest_bidder.as_ref(),
        highest_bid: auction.highest_bid,
    }
    .check(&bidder, cumulative)?;

    custody::collect_value(env, &bidder, amount)?;

    auction.ledger.credit(&bidder, amount)?;
    auction.escrow_balance = auction
        .escrow_balance
        .checked_add(amount)
        .ok_or(Error::ArithmeticOverflow)?;
    // Every accepted cumulative lands above the current highest, so the
    // bidder now leads.
    auction.highest_bidder = Some(bidder.clone());
    auction.highest_bid = cumulative;
    commit(env, &auction)?;

    BidPlacedEventData {
        auction_id,
        bidder,
        amount,
        cumulative,
    }
    .publish(env);

    Ok(())
}

pub fn cancel_auction(env: &Env, auction_id: BytesN<32>, owner: Address) -> Result<(), Error> {
    owner.require_auth();

    let mut auction = load(env, &auction_id)?;

    if auction.owner != owner {
        return Err(Error::Unauthorized);
    }
    if auction.cancelled {
        return Err(Error::AlreadyCancelled);
    }
    if auction.winning_bid_withdrawn || auction.item_withdrawn {
        return Err(Error::AlreadySettled);
    }
    if has_ended(env, &auction) {
        return Err(Error::AuctionClosed);
    }

    auction.cancelled = true;
    commit(env, &auction)?;

    AuctionCancelledEventData { auction_id, owner }.publish(env);

    Ok(())
}

/// Refund a bidder's full cumulative balance. Returns the amount paid back.
pub fn reclaim_bid(env: &Env, auction_id: BytesN<32>, bidder: Address) -> Result<u64, Error> {
    bidder.require_auth();

    let mut auction = load(env, &auction_id)?;

    let is_leader = auction.highest_bidder.as_ref() == Some(&bidder);
    if is_leader && !auction.cancelled {
        return Err(Error::NothingToReclaim);
    }

    let amount = auction.ledger.take(&bidder);
    if amount == 0 {
        return Err(Error::NothingToReclaim);
    }
    auction.escrow_balance = auction
        .escrow_balance
        .checked_sub(amount)
        .ok_or(Error::InvariantViolation)?;

    custody::pay_value(env, &bidder, amount)?;
    commit(env, &auction)?;

    BidReclaimedEventData {
        auction_id,
        bidder,
        amount,
    }
    .publish(env);

    Ok(amount)
}

/// Pay the winning cumulative bid to the owner. Returns the amount paid.
pub fn withdraw_winning_bid(env: &Env, auction_id: BytesN<32>, owner: Address) -> Result<u64, Error> {
    owner.require_auth();

    let mut auction = load(env, &auction_id)?;

    if auction.owner != owner {
        return Err(Error::Unauthorized);
    }
    let winner = require_settleable(env, &auction)?;
    if auction.winning_bid_withdrawn {
        return Err(Error::AlreadyWithdrawn);
    }

    let amount = auction.highest_bid;
    auction.ledger.debit(&winner, amount)?;
    auction.escrow_balance = auction
        .escrow_balance
        .checked_sub(amount)
        .ok_or(Error::InvariantViolation)?;
    auction.winning_bid_withdrawn = true;

    custody::pay_value(env, &owner, amount)?;
    commit(env, &auction)?;

    WinningBidWithdrawnEventData {
        auction_id,
        owner,
        amount,
    }
    .publish(env);

    Ok(amount)
}

/// Hand the escrowed item to the winning bidder. Returns the item amount.
pub fn withdraw_item(env: &Env, auction_id: BytesN<32>, winner: Address) -> Result<u64, Error> {
    winner.require_auth();

    let mut auction = load(env, &auction_id)?;

    let leader = require_settleable(env, &auction)?;
    if leader != winner {
        return Err(Error::Unauthorized);
    }
    if !auction.item.deposited {
        return Err(Error::NoItem);
    }
    if auction.item_withdrawn {
        return Err(Error::AlreadyWithdrawn);
    }

    auction.item_withdrawn = true;
    custody::release_item(env, &auction.item, &winner)?;
    commit(env, &auction)?;

    ItemReleasedEventData {
        auction_id,
        recipient: winner,
        amount: auction.item.amount,
        sold: true,
    }
    .publish(env);

    Ok(auction.item.amount)
}

/// Return an unsold item to the owner: after cancellation, or once the
/// auction ended without any bid.
pub fn reclaim_item(env: &Env, auction_id: BytesN<32>, owner: Address) -> Result<u64, Error> {
    owner.require_auth();

    let mut auction = load(env, &auction_id)?;

    if auction.owner != owner {
        return Err(Error::Unauthorized);
    }
    if !auction.item.deposited {
        return Err(Error::NoItem);
    }
    if auction.item_withdrawn {
        return Err(Error::AlreadyWithdrawn);
    }
    if !auction.cancelled {
        if !has_ended(env, &auction) {
            return Err(Error::NotYetEnded);
        }
        if auction.highest_bidder.is_some() {
            return Err(Error::HasWinningBid);
        }
    }

    auction.item_withdrawn = true;
    custody::release_item(env, &auction.item, &owner)?;
    commit(env, &auction)?;

    ItemReleasedEventData {
        auction_id,
        recipient: owner,
        amount: auction.item.amount,
        sold: false,
    }
    .publish(env);

    Ok(auction.item.amount)
}
