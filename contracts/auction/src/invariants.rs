//! Record consistency checks, run before every record write.

use crate::errors::Error;
use crate::types::{AuctionRecord, SealedAuctionRecord};

pub fn check_auction(auction: &AuctionRecord) -> Result<(), Error> {
    // BidderCapRespected
    if auction.ledger.len() > auction.bidder_cap {
        return Err(Error::InvariantViolation);
    }

    // EscrowCoversLedger
    if auction.escrow_balance != auction.ledger.total()? {
        return Err(Error::InvariantViolation);
    }

    if let Some(leader) = &auction.highest_bidder {
        // LeaderAboveFloor
        if auction.highest_bid < auction.bid_floor {
            return Err(Error::InvariantViolation);
        }
        // LeaderHoldsMaximum, only while its funds are still in escrow
        if !auction.cancelled && !auction.winning_bid_withdrawn {
            if auction.ledger.balance_of(leader) != auction.highest_bid {
                return Err(Error::InvariantViolation);
            }
            if auction.ledger.max_balance() != auction.highest_bid {
                return Err(Error::InvariantViolation);
            }
        }
    } else if auction.highest_bid != 0 || auction.winning_bid_withdrawn {
        return Err(Error::InvariantViolation);
    }

    // ItemWithdrawnOnlyIfDeposited
    if auction.item_withdrawn && !auction.item.deposited {
        return Err(Error::InvariantViolation);
    }

    Ok(())
}

pub fn check_sealed(auction: &SealedAuctionRecord) -> Result<(), Error> {
    if auction.ledger.len() > auction.bidder_cap
        || auction.commitments.len() != auction.ledger.len()
    {
        return Err(Error::InvariantViolation);
    }

    if auction.escrow_balance != auction.ledger.total()? {
        return Err(Error::InvariantViolation);
    }

    if auction.second_highest_bid > auction.highest_bid {
        return Err(Error::InvariantViolation);
    }

    match &auction.highest_bidder {
        Some(_) if auction.highest_bid < auction.bid_floor => {
            return Err(Error::InvariantViolation);
        }
        None if auction.highest_bid != 0 || auction.winning_bid_withdrawn => {
            return Err(Error::InvariantViolation);
        }
        _ => {}
    }

    if auction.item_withdrawn && !auction.item.deposited {
        return Err(Error::InvariantViolation);
    }

    Ok(())
}
