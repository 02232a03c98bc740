use soroban_sdk::contracterror;

/// Error codes for the auction house contract.
///
/// Every error aborts the invocation, so no storage write or token transfer
/// made before it survives.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    /// Contract has not been initialized
    NotInitialized = 1,
    /// Contract has already been initialized
    AlreadyInitialized = 2,
    /// Caller is not the principal this operation is restricted to
    Unauthorized = 3,
    /// No auction stored under the given id
    AuctionNotFound = 4,
    /// An auction already exists at the derived address
    DuplicateAuction = 5,
    /// Title longer than 32 bytes
    InvalidTitle = 6,
    /// End time not after start time, end time already passed, or reveal
    /// period not after the bidding window
    InvalidTiming = 7,
    /// Minimum bid increment must be greater than zero
    InvalidIncrement = 8,
    /// Zero amount where a positive one is required
    InvalidAmount = 9,
    /// Auction is cancelled or outside its bidding window
    AuctionNotActive = 10,
    /// Auction already tracks its maximum number of distinct bidders
    BidderCapExceeded = 11,
    /// Cumulative bid under the floor or the required increment
    BidTooLow = 12,
    /// The auction owner cannot bid on their own auction
    OwnerCannotBid = 13,
    /// Auction has already been cancelled
    AlreadyCancelled = 14,
    /// Settlement has already started
    AlreadySettled = 15,
    /// Bidding window has closed
    AuctionClosed = 16,
    /// Bidder has no reclaimable balance
    NothingToReclaim = 17,
    /// Auction has not ended yet
    NotYetEnded = 18,
    /// Auction was cancelled
    AuctionCancelled = 19,
    /// Settlement step has already been executed
    AlreadyWithdrawn = 20,
    /// Auction ended without a winning bid
    NoWinningBid = 21,
    /// No item was deposited into escrow
    NoItem = 22,
    /// Item is owed to the winning bidder
    HasWinningBid = 23,
    /// Token transfer failed
    TransferFailed = 24,
    /// Amount arithmetic overflowed
    ArithmeticOverflow = 25,
    /// No usable nonce for the derived address
    DerivationFailed = 26,
    /// Record failed its consistency checks
    InvariantViolation = 27,
    /// Bidder already committed a sealed bid
    DuplicateSealedBid = 28,
    /// Bidder has no sealed bid on this auction
    UnknownBidder = 29,
    /// Sealed bid has already been revealed
    AlreadyRevealed = 30,
    /// Revealed bid and salt do not match the commitment
    CommitmentMismatch = 31,
    /// Deposit does not cover the revealed bid
    InsufficientDeposit = 32,
    /// Reveal period is over
    RevealClosed = 33,
    /// Sealed auctions need a positive bid floor
    InvalidBidFloor = 34,
}
