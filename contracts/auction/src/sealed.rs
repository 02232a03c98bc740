//! Sealed-bid auctions with a commit/reveal cycle.
//!
//! During the bidding window a bidder commits to `sha256(bid || salt)` and
//! deposits any amount of native value that hides the real bid. After the
//! window closes bids are revealed until `reveal_end`; a revealed bid that does
//! not take the lead gets its deposit back at once. The winner pays its own bid
//! (first price) or the second-highest revealed bid, never less than the floor
//! (second price), and recovers the rest of its deposit at settlement.

use soroban_sdk::{Address, Bytes, BytesN, Env, Vec};

use crate::custody;
use crate::derive::{self, SEALED_AUCTION_LABEL};
use crate::errors::Error;
use crate::events::{
    AuctionCancelledEventData, AuctionCreatedEventData, BidReclaimedEventData,
    ItemReleasedEventData, SealedBidCommittedEventData, SealedBidRevealedEventData,
    WinningBidWithdrawnEventData,
};
use crate::invariants;
use crate::storage;
use crate::types::{
    AuctionState, BidLedger, ItemDescriptor, SealedAuctionParams, SealedAuctionRecord, SealedBid,
};

/// Commitment a bidder submits for `bid`, blinded by `salt`.
pub fn commitment(env: &Env, bid: u64, salt: u64) -> BytesN<32> {
    let mut preimage = [0u8; 16];
    preimage[..8].copy_from_slice(&bid.to_be_bytes());
    preimage[8..].copy_from_slice(&salt.to_be_bytes());
    env.crypto()
        .sha256(&Bytes::from_array(env, &preimage))
        .to_bytes()
}

pub fn load(env: &Env, auction_id: &BytesN<32>) -> Result<SealedAuctionRecord, Error> {
    storage::get_sealed(env, auction_id).ok_or(Error::AuctionNotFound)
}

fn commit(env: &Env, auction: &SealedAuctionRecord) -> Result<(), Error> {
    invariants::check_sealed(auction)?;
    storage::save_sealed(env, auction);
    Ok(())
}

fn clearing_price(auction: &SealedAuctionRecord) -> u64 {
    if auction.first_price {
        auction.highest_bid
    } else {
        auction.second_highest_bid.max(auction.bid_floor)
    }
}

/// Part of the winner's deposit not owed to the owner.
fn winner_excess(auction: &SealedAuctionRecord, winner: &Address) -> Result<u64, Error> {
    let owed = if auction.winning_bid_withdrawn {
        0
    } else {
        clearing_price(auction)
    };
    auction
        .ledger
        .balance_of(winner)
        .checked_sub(owed)
        .ok_or(Error::InvariantViolation)
}

fn commitment_position(auction: &SealedAuctionRecord, bidder: &Address) -> Option<u32> {
    auction
        .commitments
        .iter()
        .position(|bid| bid.bidder == *bidder)
        .map(|index| index as u32)
}

pub fn state(env: &Env, auction: &SealedAuctionRecord) -> AuctionState {
    if auction.cancelled {
        return AuctionState::Cancelled;
    }
    if env.ledger().timestamp() <= auction.reveal_end {
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

fn require_settleable(env: &Env, auction: &SealedAuctionRecord) -> Result<Address, Error> {
    if auction.cancelled {
        return Err(Error::AuctionCancelled);
    }
    if env.ledger().timestamp() <= auction.reveal_end {
        return Err(Error::NotYetEnded);
    }
    auction.highest_bidder.clone().ok_or(Error::NoWinningBid)
}

pub fn create_sealed_auction(
    env: &Env,
    owner: Address,
    params: SealedAuctionParams,
) -> Result<BytesN<32>, Error> {
    owner.require_auth();
    storage::get_config(env).ok_or(Error::NotInitialized)?;

    let derived = derive::derive_address(env, SEALED_AUCTION_LABEL, &owner, &params.title)?;
    if storage::has_sealed(env, &derived.id) {
        return Err(Error::DuplicateAuction);
    }

    let now = env.ledger().timestamp();
    let start_time = if params.start_time == 0 { now } else { params.start_time };
    if params.end_time <= start_time
        || params.end_time <= now
        || params.reveal_end <= params.end_time
    {
        return Err(Error::InvalidTiming);
    }
    if params.bid_floor == 0 {
        return Err(Error::InvalidBidFloor);
    }

    let item = ItemDescriptor {
        asset: params.asset,
        amount: params.item_amount,
        deposited: params.item_amount > 0,
    };
    if item.deposited {
        custody::deposit_item(env, &item, &owner)?;
    }

    let auction = SealedAuctionRecord {
        id: derived.id.clone(),
        nonce: derived.nonce,
        owner: owner.clone(),
        title: params.title,
        start_time,
        end_time: params.end_time,
        reveal_end: params.reveal_end,
        cancelled: false,
        bid_floor: params.bid_floor,
        first_price: params.first_price,
        bidder_cap: params.bidder_cap,
        item,
        commitments: Vec::new(env),
        ledger: BidLedger::new(env),
        highest_bidder: None,
        highest_bid: 0,
        second_highest_bid: 0,
        escrow_balance: 0,
        winning_bid_withdrawn: false,
        item_withdrawn: false,
    };
    commit(env, &auction)?;
    storage::add_owner_auction(env, &owner, &auction.id);

    AuctionCreatedEventData {
        auction_id: auction.id.clone(),
        owner,
        sealed: true,
        end_time: auction.end_time,
        item_amount: auction.item.amount,
    }
    .publish(env);

    Ok(auction.id)
}

pub fn make_sealed_bid(
    env: &Env,
    auction_id: BytesN<32>,
    bidder: Address,
    commitment: BytesN<32>,
    deposit: u64,
) -> Result<(), Error> {
    bidder.require_auth();

    if deposit == 0 {
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
    if commitment_position(&auction, &bidder).is_some() {
        return Err(Error::DuplicateSealedBid);
    }
    if auction.ledger.len() >= auction.bidder_cap {
        return Err(Error::BidderCapExceeded);
    }

    custody::collect_value(env, &bidder, deposit)?;

    auction.commitments.push_back(SealedBid {
        bidder: bidder.clone(),
        commitment,
        revealed: false,
    });
    auction.ledger.credit(&bidder, deposit)?;
    auction.escrow_balance = auction
        .escrow_balance
        .checked_add(deposit)
        .ok_or(Error::ArithmeticOverflow)?;
    commit(env, &auction)?;

    SealedBidCommittedEventData {
        auction_id,
        bidder,
        deposit,
    }
    .publish(env);

    Ok(())
}

pub fn cancel_sealed_auction(env: &Env, auction_id: BytesN<32>, owner: Address) -> Result<(), Error> {
    owner.require_auth();

    let mut auction = load(env, &auction_id)?;

    if auction.owner != owner {
        return Err(Error::Unauthorized);
    }
    if auction.cancelled {
        return Err(Error::AlreadyCancelled);
    }
    if env.ledger().timestamp() > auction.end_time {
        return Err(Error::AuctionClosed);
    }

    auction.cancelled = true;
    commit(env, &auction)?;

    AuctionCancelledEventData { auction_id, owner }.publish(env);

    Ok(())
}

/// Open a commitment. Returns whether the revealed bid now leads.
pub fn reveal_sealed_bid(
    env: &Env,
    auction_id: BytesN<32>,
    bidder: Address,
    bid: u64,
    salt: u64,
) -> Result<bool, Error> {
    bidder.require_auth();

    let mut auction = load(env, &auction_id)?;

    let now = env.ledger().timestamp();
    if auction.cancelled {
        return Err(Error::AuctionCancelled);
    }
    if now <= auction.end_time {
        return Err(Error::NotYetEnded);
    }
    if now > auction.reveal_end {
        return Err(Error::RevealClosed);
    }

    let index = commitment_position(&auction, &bidder).ok_or(Error::UnknownBidder)?;
    let mut sealed = auction.commitments.get_unchecked(index);
    if sealed.revealed {
        return Err(Error::AlreadyRevealed);
    }
    if sealed.commitment != commitment(env, bid, salt) {
        return Err(Error::CommitmentMismatch);
    }
    if bid < auction.bid_floor {
        return Err(Error::BidTooLow);
    }
    // A reclaimed deposit can no longer back a bid
    let deposit = auction.ledger.balance_of(&bidder);
    if deposit == 0 || deposit < bid {
        return Err(Error::InsufficientDeposit);
    }

    sealed.revealed = true;
    auction.commitments.set(index, sealed);

    let leading = bid > auction.highest_bid || auction.highest_bidder.is_none();
    if leading {
        auction.second_highest_bid = auction.highest_bid;
        auction.highest_bid = bid;
        auction.highest_bidder = Some(bidder.clone());
    } else {
        if bid > auction.second_highest_bid {
            auction.second_highest_bid = bid;
        }
        let refund = auction.ledger.take(&bidder);
        auction.escrow_balance = auction
            .escrow_balance
            .checked_sub(refund)
            .ok_or(Error::InvariantViolation)?;
        custody::pay_value(env, &bidder, refund)?;
    }
    commit(env, &auction)?;

    SealedBidRevealedEventData {
        auction_id,
        bidder,
        bid,
        leading,
    }
    .publish(env);

    Ok(leading)
}

/// Refund a sealed-bid deposit. Returns the amount paid back.
///
/// Outbid and unrevealed bidders get their whole deposit once bidding has
/// closed; the winner can take back what exceeds the clearing price once the
/// reveal period is over.
pub fn reclaim_sealed_bid(env: &Env, auction_id: BytesN<32>, bidder: Address) -> Result<u64, Error> {
    bidder.require_auth();

    let mut auction = load(env, &auction_id)?;

    let now = env.ledger().timestamp();
    if !auction.cancelled && now <= auction.end_time {
        return Err(Error::NotYetEnded);
    }

    let is_leader = auction.highest_bidder.as_ref() == Some(&bidder);
    let amount = if auction.cancelled || !is_leader {
        auction.ledger.take(&bidder)
    } else if now > auction.reveal_end {
        let excess = winner_excess(&auction, &bidder)?;
        auction.ledger.debit(&bidder, excess)?;
        excess
    } else {
        0
    };
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

pub fn withdraw_winning_bid_sealed(
    env: &Env,
    auction_id: BytesN<32>,
    owner: Address,
) -> Result<u64, Error> {
    owner.require_auth();

    let mut auction = load(env, &auction_id)?;

    if auction.owner != owner {
        return Err(Error::Unauthorized);
    }
    let winner = require_settleable(env, &auction)?;
    if auction.winning_bid_withdrawn {
        return Err(Error::AlreadyWithdrawn);
    }

    let amount = clearing_price(&auction);
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

/// Hand the item to the winner together with the unspent part of its
/// deposit. Returns the item amount.
pub fn withdraw_item_sealed(env: &Env, auction_id: BytesN<32>, winner: Address) -> Result<u64, Error> {
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

    let change = winner_excess(&auction, &winner)?;
    auction.ledger.debit(&winner, change)?;
    auction.escrow_balance = auction
        .escrow_balance
        .checked_sub(change)
        .ok_or(Error::InvariantViolation)?;
    auction.item_withdrawn = true;

    custody::release_item(env, &auction.item, &winner)?;
    custody::pay_value(env, &winner, change)?;
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

pub fn reclaim_item_sealed(env: &Env, auction_id: BytesN<32>, owner: Address) -> Result<u64, Error> {
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
        if env.ledger().timestamp() <= auction.reveal_end {
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
