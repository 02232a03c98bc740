use soroban_sdk::{contracttype, Address, BytesN, String, Vec};

/// Number of ledgers in a day (assuming ~5 second block time)
pub const DAY_IN_LEDGERS: u32 = 17280;

/// TTL extension amount for persistent auction records (30 days)
pub const PERSISTENT_TTL_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;

/// TTL threshold before extending persistent records (29 days)
pub const PERSISTENT_TTL_THRESHOLD: u32 = PERSISTENT_TTL_AMOUNT - DAY_IN_LEDGERS;

/// TTL extension amount for instance storage (30 days)
pub const INSTANCE_TTL_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;

/// TTL threshold before extending instance storage (29 days)
pub const INSTANCE_TTL_THRESHOLD: u32 = INSTANCE_TTL_AMOUNT - DAY_IN_LEDGERS;

/// Longest title accepted as address seed material, in bytes
pub const MAX_TITLE_LEN: u32 = 32;

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Config,
    Auction(BytesN<32>),
    Sealed(BytesN<32>),
    OwnerAuctions(Address),
}

/// Contract-wide configuration written once by `initialize`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    pub admin: Address,
    /// Token contract used as the native bidding currency
    pub native_token: Address,
}

/// Deterministic auction address and the nonce that produced it.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DerivedAddress {
    pub id: BytesN<32>,
    pub nonce: u32,
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AuctionState {
    Active = 0,
    Cancelled = 1,
    Ended = 2,
    Settled = 3,
}

/// The fungible asset being sold.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ItemDescriptor {
    pub asset: Address,
    pub amount: u64,
    pub deposited: bool,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BidEntry {
    pub bidder: Address,
    /// Running total deposited across all of this bidder's bids
    pub amount: u64,
}

/// Per-auction bidder obligations, in first-bid order.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BidLedger {
    pub entries: Vec<BidEntry>,
}

/// Creation parameters of an open ascending auction.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AuctionParams {
    pub title: String,
    pub bid_floor: u64,
    pub min_bid_increment: u64,
    /// Zero means the auction opens immediately
    pub start_time: u64,
    pub end_time: u64,
    pub bidder_cap: u32,
    pub asset: Address,
    /// Zero means no item is deposited
    pub item_amount: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AuctionRecord {
    pub id: BytesN<32>,
    pub nonce: u32,
    pub owner: Address,
    pub title: String,
    pub start_time: u64,
    pub end_time: u64,
    pub cancelled: bool,
    pub bid_floor: u64,
    pub min_bid_increment: u64,
    pub bidder_cap: u32,
    pub item: ItemDescriptor,
    pub highest_bidder: Option<Address>,
    pub highest_bid: u64,
    pub ledger: BidLedger,
    /// Native value held in custody for this auction
    pub escrow_balance: u64,
    pub winning_bid_withdrawn: bool,
    pub item_withdrawn: bool,
}

/// Creation parameters of a sealed-bid auction.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SealedAuctionParams {
    pub title: String,
    pub bid_floor: u64,
    /// Winner pays its own bid when set, the second-highest bid otherwise
    pub first_price: bool,
    pub start_time: u64,
    pub end_time: u64,
    pub reveal_end: u64,
    pub bidder_cap: u32,
    pub asset: Address,
    pub item_amount: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SealedBid {
    pub bidder: Address,
    pub commitment: BytesN<32>,
    pub revealed: bool,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SealedAuctionRecord {
    pub id: BytesN<32>,
    pub nonce: u32,
    pub owner: Address,
    pub title: String,
    pub start_time: u64,
    pub end_time: u64,
    pub reveal_end: u64,
    pub cancelled: bool,
    pub bid_floor: u64,
    pub first_price: bool,
    pub bidder_cap: u32,
    pub item: ItemDescriptor,
    pub commitments: Vec<SealedBid>,
    /// Deposits, not bids: a revealed bid may be lower than its deposit
    pub ledger: BidLedger,
    pub highest_bidder: Option<Address>,
    pub highest_bid: u64,
    pub second_highest_bid: u64,
    pub escrow_balance: u64,
    pub winning_bid_withdrawn: bool,
    pub item_withdrawn: bool,
}
