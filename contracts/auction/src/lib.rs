#![no_std]

mod admin;
mod auction;
mod custody;
mod derive;
mod errors;
mod events;
mod invariants;
mod ledger;
mod sealed;
mod storage;
mod types;

use soroban_sdk::{contract, contractimpl, Address, BytesN, Env, String, Vec};

pub use crate::errors::Error;
pub use crate::types::{
    AuctionParams, AuctionRecord, AuctionState, BidEntry, BidLedger, Config, DerivedAddress,
    ItemDescriptor, SealedAuctionParams, SealedAuctionRecord, SealedBid,
};

/// Escrow-backed auction house.
///
/// Custodies the item being sold and the native value bid on it, and releases
/// both strictly according to the auction's rules. Open auctions take
/// cumulative top-up bids; sealed auctions take hashed commitments that are
/// revealed after bidding closes.
#[contract]
pub struct AuctionHouse;

#[contractimpl]
impl AuctionHouse {
    // ========================================================================
    // CONFIGURATION
    // ========================================================================

    /// Initialize the contract.
    ///
    /// # Arguments
    /// * `admin` - Address recorded as contract administrator
    /// * `native_token` - Token contract used as the bidding currency
    ///
    /// # Errors
    /// * `Error::AlreadyInitialized` - If the contract has already been initialized
    pub fn initialize(env: Env, admin: Address, native_token: Address) -> Result<(), Error> {
        admin::initialize(&env, admin, native_token)?;
        storage::extend_instance_ttl(&env);
        Ok(())
    }

    pub fn get_config(env: Env) -> Result<Config, Error> {
        admin::config(&env)
    }

    /// Address an auction created by `owner` under `title` would occupy.
    pub fn derive_auction_address(
        env: Env,
        owner: Address,
        title: String,
        sealed: bool,
    ) -> Result<DerivedAddress, Error> {
        let label = if sealed {
            derive::SEALED_AUCTION_LABEL
        } else {
            derive::OPEN_AUCTION_LABEL
        };
        derive::derive_address(&env, label, &owner, &title)
    }

    // ========================================================================
    // OPEN AUCTIONS
    // ========================================================================

    /// Create an open auction and move the item into escrow.
    ///
    /// # Errors
    /// * `Error::DuplicateAuction` - Owner already has an auction with this title
    /// * `Error::InvalidTitle` - Title longer than 32 bytes
    /// * `Error::InvalidTiming` - End time not after start time or already passed
    /// * `Error::InvalidIncrement` - Zero minimum bid increment
    /// * `Error::TransferFailed` - Item could not be moved into escrow
    pub fn create_auction(env: Env, owner: Address, params: AuctionParams) -> Result<BytesN<32>, Error> {
        storage::extend_instance_ttl(&env);
        auction::create_auction(&env, owner, params)
    }

    /// Top up the bidder's cumulative bid by `amount`.
    ///
    /// # Errors
    /// * `Error::AuctionNotActive` - Cancelled or outside the bidding window
    /// * `Error::BidderCapExceeded` - New bidder on a full auction
    /// * `Error::BidTooLow` - Cumulative under the floor or the increment rule
    /// * `Error::TransferFailed` - Bidder could not pay `amount`
    pub fn make_bid(env: Env, auction_id: BytesN<32>, bidder: Address, amount: u64) -> Result<(), Error> {
        storage::extend_instance_ttl(&env);
        auction::make_bid(&env, auction_id, bidder, amount)
    }

    pub fn cancel_auction(env: Env, auction_id: BytesN<32>, owner: Address) -> Result<(), Error> {
        storage::extend_instance_ttl(&env);
        auction::cancel_auction(&env, auction_id, owner)
    }

    /// Refund the bidder's full balance; valid after cancellation or for
    /// anyone but the current leader.
    pub fn reclaim_bid(env: Env, auction_id: BytesN<32>, bidder: Address) -> Result<u64, Error> {
        storage::extend_instance_ttl(&env);
        auction::reclaim_bid(&env, auction_id, bidder)
    }

    pub fn withdraw_winning_bid(env: Env, auction_id: BytesN<32>, owner: Address) -> Result<u64, Error> {
        storage::extend_instance_ttl(&env);
        auction::withdraw_winning_bid(&env, auction_id, owner)
    }

    pub fn withdraw_item(env: Env, auction_id: BytesN<32>, winner: Address) -> Result<u64, Error> {
        storage::extend_instance_ttl(&env);
        auction::withdraw_item(&env, auction_id, winner)
    }

    /// Return the item to the owner of a cancelled or bidless ended auction.
    pub fn reclaim_item(env: Env, auction_id: BytesN<32>, owner: Address) -> Result<u64, Error> {
        storage::extend_instance_ttl(&env);
        auction::reclaim_item(&env, auction_id, owner)
    }

    pub fn get_auction(env: Env, auction_id: BytesN<32>) -> Result<AuctionRecord, Error> {
        auction::load(&env, &auction_id)
    }

    /// Cumulative balance `bidder` holds in the auction's ledger.
    pub fn get_bid(env: Env, auction_id: BytesN<32>, bidder: Address) -> Result<u64, Error> {
        let auction = auction::load(&env, &auction_id)?;
        Ok(auction.ledger.balance_of(&bidder))
    }

    pub fn get_highest_bid(env: Env, auction_id: BytesN<32>) -> Result<(Option<Address>, u64), Error> {
        let auction = auction::load(&env, &auction_id)?;
        Ok((auction.highest_bidder, auction.highest_bid))
    }

    pub fn auction_state(env: Env, auction_id: BytesN<32>) -> Result<AuctionState, Error> {
        let auction = auction::load(&env, &auction_id)?;
        Ok(auction::state(&env, &auction))
    }

    pub fn escrow_balance(env: Env, auction_id: BytesN<32>) -> Result<u64, Error> {
        let auction = auction::load(&env, &auction_id)?;
        Ok(auction.escrow_balance)
    }

    /// Re-run the consistency checks on a stored open auction.
    pub fn verify_auction(env: Env, auction_id: BytesN<32>) -> Result<(), Error> {
        let auction = auction::load(&env, &auction_id)?;
        invariants::check_auction(&auction)
    }

    /// Ids of every open and sealed auction created by `owner`.
    pub fn owner_auctions(env: Env, owner: Address) -> Vec<BytesN<32>> {
        storage::get_owner_auctions(&env, &owner)
    }

    // ========================================================================
    // SEALED AUCTIONS
    // ========================================================================

    pub fn create_sealed_auction(
        env: Env,
        owner: Address,
        params: SealedAuctionParams,
    ) -> Result<BytesN<32>, Error> {
        storage::extend_instance_ttl(&env);
        sealed::create_sealed_auction(&env, owner, params)
    }

    /// Commit to a hidden bid, escrowing `deposit` (at least the bid).
    pub fn make_sealed_bid(
        env: Env,
        auction_id: BytesN<32>,
        bidder: Address,
        commitment: BytesN<32>,
        deposit: u64,
    ) -> Result<(), Error> {
        storage::extend_instance_ttl(&env);
        sealed::make_sealed_bid(&env, auction_id, bidder, commitment, deposit)
    }

    pub fn cancel_sealed_auction(env: Env, auction_id: BytesN<32>, owner: Address) -> Result<(), Error> {
        storage::extend_instance_ttl(&env);
        sealed::cancel_sealed_auction(&env, auction_id, owner)
    }

    pub fn reveal_sealed_bid(
        env: Env,
        auction_id: BytesN<32>,
        bidder: Address,
        bid: u64,
        salt: u64,
    ) -> Result<bool, Error> {
        storage::extend_instance_ttl(&env);
        sealed::reveal_sealed_bid(&env, auction_id, bidder, bid, salt)
    }

    pub fn reclaim_sealed_bid(env: Env, auction_id: BytesN<32>, bidder: Address) -> Result<u64, Error> {
        storage::extend_instance_ttl(&env);
        sealed::reclaim_sealed_bid(&env, auction_id, bidder)
    }

    pub fn withdraw_winning_bid_sealed(
        env: Env,
        auction_id: BytesN<32>,
        owner: Address,
    ) -> Result<u64, Error> {
        storage::extend_instance_ttl(&env);
        sealed::withdraw_winning_bid_sealed(&env, auction_id, owner)
    }

    pub fn withdraw_item_sealed(env: Env, auction_id: BytesN<32>, winner: Address) -> Result<u64, Error> {
        storage::extend_instance_ttl(&env);
        sealed::withdraw_item_sealed(&env, auction_id, winner)
    }

    pub fn reclaim_item_sealed(env: Env, auction_id: BytesN<32>, owner: Address) -> Result<u64, Error> {
        storage::extend_instance_ttl(&env);
        sealed::reclaim_item_sealed(&env, auction_id, owner)
    }

    pub fn get_sealed_auction(env: Env, auction_id: BytesN<32>) -> Result<SealedAuctionRecord, Error> {
        sealed::load(&env, &auction_id)
    }

    /// Deposit `bidder` holds in a sealed auction.
    pub fn get_sealed_bid(env: Env, auction_id: BytesN<32>, bidder: Address) -> Result<u64, Error> {
        let auction = sealed::load(&env, &auction_id)?;
        Ok(auction.ledger.balance_of(&bidder))
    }

    pub fn sealed_auction_state(env: Env, auction_id: BytesN<32>) -> Result<AuctionState, Error> {
        let auction = sealed::load(&env, &auction_id)?;
        Ok(sealed::state(&env, &auction))
    }

    pub fn verify_sealed_auction(env: Env, auction_id: BytesN<32>) -> Result<(), Error> {
        let auction = sealed::load(&env, &auction_id)?;
        invariants::check_sealed(&auction)
    }

    /// Commitment to submit with `make_sealed_bid` for `bid` and `salt`.
    pub fn sealed_commitment(env: Env, bid: u64, salt: u64) -> BytesN<32> {
        sealed::commitment(&env, bid, salt)
    }
}

#[cfg(test)]
mod test;
