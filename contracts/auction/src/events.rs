use soroban_sdk::{contractevent, Address, BytesN};

/// Event emitted when the contract is initialized
#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEventData {
    #[topic]
    pub admin: Address,
    pub native_token: Address,
}

/// Event emitted when an open or sealed auction is created
#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AuctionCreatedEventData {
    #[topic]
    pub auction_id: BytesN<32>,
    #[topic]
    pub owner: Address,
    pub sealed: bool,
    pub end_time: u64,
    pub item_amount: u64,
}

/// Event emitted when a bid is accepted into escrow
#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BidPlacedEventData {
    #[topic]
    pub auction_id: BytesN<32>,
    #[topic]
    pub bidder: Address,
    pub amount: u64,
    pub cumulative: u64,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AuctionCancelledEventData {
    #[topic]
    pub auction_id: BytesN<32>,
    pub owner: Address,
}

/// Event emitted when a bidder's escrowed balance is paid back
#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BidReclaimedEventData {
    #[topic]
    pub auction_id: BytesN<32>,
    #[topic]
    pub bidder: Address,
    pub amount: u64,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WinningBidWithdrawnEventData {
    #[topic]
    pub auction_id: BytesN<32>,
    pub owner: Address,
    pub amount: u64,
}

/// Event emitted when the escrowed item leaves custody, to the winner or
/// back to the owner
#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ItemReleasedEventData {
    #[topic]
    pub auction_id: BytesN<32>,
    #[topic]
    pub recipient: Address,
    pub amount: u64,
    pub sold: bool,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SealedBidCommittedEventData {
    #[topic]
    pub auction_id: BytesN<32>,
    #[topic]
    pub bidder: Address,
    pub deposit: u64,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SealedBidRevealedEventData {
    #[topic]
    pub auction_id: BytesN<32>,
    #[topic]
    pub bidder: Address,
    pub bid: u64,
    pub leading: bool,
}
