//! Cumulative bid ledger.
//!
//! Each bidder owns one entry holding the running total of everything they
//! have deposited into an auction. Bids top the entry up, reclaims and payouts
//! zero it. Entries are never removed, so the number of entries is the number
//! of distinct bidders the auction has ever recorded.

use soroban_sdk::{Address, Env, Vec};

use crate::errors::Error;
use crate::types::{BidEntry, BidLedger};

impl BidLedger {
    pub fn new(env: &Env) -> Self {
        BidLedger {
            entries: Vec::new(env),
        }
    }

    /// Distinct bidders ever recorded.
    pub fn len(&self) -> u32 {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, bidder: &Address) -> bool {
        self.position(bidder).is_some()
    }

    pub fn balance_of(&self, bidder: &Address) -> u64 {
        match self.position(bidder) {
            Some(index) => self.entry(index).amount,
            None => 0,
        }
    }

    /// Add `amount` to the bidder's running total, creating the entry on
    /// first use. Returns the new cumulative balance.
    pub fn credit(&mut self, bidder: &Address, amount: u64) -> Result<u64, Error> {
        match self.position(bidder) {
            Some(index) => {
                let mut entry = self.entry(index);
                entry.amount = entry
                    .amount
                    .checked_add(amount)
                    .ok_or(Error::ArithmeticOverflow)?;
                let cumulative = entry.amount;
                self.entries.set(index, entry);
                Ok(cumulative)
            }
            None => {
                self.entries.push_back(BidEntry {
                    bidder: bidder.clone(),
                    amount,
                });
                Ok(amount)
            }
        }
    }

    pub fn debit(&mut self, bidder: &Address, amount: u64) -> Result<u64, Error> {
        let index = self.position(bidder).ok_or(Error::NothingToReclaim)?;
        let mut entry = self.entry(index);
        entry.amount = entry
            .amount
            .checked_sub(amount)
            .ok_or(Error::InvariantViolation)?;
        let remaining = entry.amount;
        self.entries.set(index, entry);
        Ok(remaining)
    }

    /// Zero the bidder's entry and return what it held.
    pub fn take(&mut self, bidder: &Address) -> u64 {
        match self.position(bidder) {
            Some(index) => {
                let mut entry = self.entry(index);
                let amount = entry.amount;
                entry.amount = 0;
                self.entries.set(index, entry);
                amount
            }
            None => 0,
        }
    }

    pub fn total(&self) -> Result<u64, Error> {
        let mut total: u64 = 0;
        for entry in self.entries.iter() {
            total = total
                .checked_add(entry.amount)
                .ok_or(Error::ArithmeticOverflow)?;
        }
        Ok(total)
    }

    pub fn max_balance(&self) -> u64 {
        self.entries
            .iter()
            .map(|entry| entry.amount)
            .max()
            .unwrap_or(0)
    }

    fn position(&self, bidder: &Address) -> Option<u32> {
        self.entries
            .iter()
            .position(|entry| entry.bidder == *bidder)
            .map(|index| index as u32)
    }

    fn entry(&self, index: u32) -> BidEntry {
        // `index` always comes from `position`
        self.entries.get_unchecked(index)
    }
}

/// Rules an incoming top-up must satisfy against the auction's current
/// leader.
pub struct BidRule<'a> {
    pub bid_floor: u64,
    pub min_bid_increment: u64,
    pub highest_bidder: Option<&'a Address>,
    pub highest_bid: u64,
}

impl BidRule<'_> {
    /// Validate `cumulative` (the bidder's prior total plus the new amount).
    ///
    /// The leader only needs to raise its own total, which any positive top-up
    /// does. Everyone else must reach the floor when there is no leader yet and
    /// otherwise beat the leader's cumulative by at least the increment.
    pub fn check(&self, bidder: &Address, cumulative: u64) -> Result<(), Error> {
        match self.highest_bidder {
            Some(leader) if leader == bidder => Ok(()),
            Some(_) => {
                let required = self
                    .highest_bid
                    .checked_add(self.min_bid_increment)
                    .ok_or(Error::ArithmeticOverflow)?;
                if cumulative < required {
                    return Err(Error::BidTooLow);
                }
                Ok(())
            }
            None => {
                if cumulative < self.bid_floor {
                    return Err(Error::BidTooLow);
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use soroban_sdk::testutils::Address as _;

    #[test]
    fn test_credit_accumulates() {
        let env = Env::default();
        let alice = Address::generate(&env);
        let bob = Address::generate(&env);
        let mut ledger = BidLedger::new(&env);

        assert_eq!(ledger.credit(&alice, 100), Ok(100));
        assert_eq!(ledger.credit(&bob, 120), Ok(120));
        assert_eq!(ledger.credit(&alice, 50), Ok(150));

        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.balance_of(&alice), 150);
        assert_eq!(ledger.total(), Ok(270));
        assert_eq!(ledger.max_balance(), 150);
    }

    #[test]
    fn test_take_zeroes_but_keeps_entry() {
        let env = Env::default();
        let alice = Address::generate(&env);
        let mut ledger = BidLedger::new(&env);

        ledger.credit(&alice, 80).unwrap();
        assert_eq!(ledger.take(&alice), 80);
        assert_eq!(ledger.take(&alice), 0);
        assert_eq!(ledger.balance_of(&alice), 0);
        assert!(ledger.contains(&alice));
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_debit_cannot_go_negative() {
        let env = Env::default();
        let alice = Address::generate(&env);
        let stranger = Address::generate(&env);
        let mut ledger = BidLedger::new(&env);

        ledger.credit(&alice, 30).unwrap();
        assert_eq!(ledger.debit(&alice, 10), Ok(20));
        assert_eq!(ledger.debit(&alice, 21), Err(Error::InvariantViolation));
        assert_eq!(ledger.debit(&stranger, 1), Err(Error::NothingToReclaim));
    }

    #[test]
    fn test_credit_overflow() {
        let env = Env::default();
        let alice = Address::generate(&env);
        let mut ledger = BidLedger::new(&env);

        ledger.credit(&alice, u64::MAX).unwrap();
        assert_eq!(ledger.credit(&alice, 1), Err(Error::ArithmeticOverflow));
        assert_eq!(ledger.balance_of(&alice), u64::MAX);
    }

    #[test]
    fn test_bid_rule() {
        let env = Env::default();
        let leader = Address::generate(&env);
        let challenger = Address::generate(&env);

        let opening = BidRule {
            bid_floor: 100,
            min_bid_increment: 10,
            highest_bidder: None,
            highest_bid: 0,
        };
        assert_eq!(opening.check(&challenger, 99), Err(Error::BidTooLow));
        assert_eq!(opening.check(&challenger, 100), Ok(()));

        let running = BidRule {
            bid_floor: 100,
            min_bid_increment: 10,
            highest_bidder: Some(&leader),
            highest_bid: 120,
        };
        assert_eq!(running.check(&challenger, 120), Err(Error::BidTooLow));
        assert_eq!(running.check(&challenger, 129), Err(Error::BidTooLow));
        assert_eq!(running.check(&challenger, 130), Ok(()));
        assert_eq!(running.check(&leader, 121), Ok(()));
    }
}
