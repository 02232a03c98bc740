use soroban_sdk::{Address, BytesN, Env, Vec};

use crate::types::{
    AuctionRecord, Config, DataKey, SealedAuctionRecord, INSTANCE_TTL_AMOUNT,
    INSTANCE_TTL_THRESHOLD, PERSISTENT_TTL_AMOUNT, PERSISTENT_TTL_THRESHOLD,
};

// ============================================================================
// CONFIG STORAGE
// ============================================================================

pub fn has_config(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Config)
}

pub fn get_config(env: &Env) -> Option<Config> {
    env.storage().instance().get(&DataKey::Config)
}

pub fn set_config(env: &Env, config: &Config) {
    env.storage().instance().set(&DataKey::Config, config);
}

pub fn extend_instance_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_TTL_AMOUNT);
}

// ============================================================================
// OPEN AUCTION STORAGE
// ============================================================================

pub fn has_auction(env: &Env, id: &BytesN<32>) -> bool {
    env.storage()
        .persistent()
        .has(&DataKey::Auction(id.clone()))
}

pub fn get_auction(env: &Env, id: &BytesN<32>) -> Option<AuctionRecord> {
    let key = DataKey::Auction(id.clone());
    let auction = env.storage().persistent().get::<_, AuctionRecord>(&key);
    if auction.is_some() {
        env.storage()
            .persistent()
            .extend_ttl(&key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_AMOUNT);
    }
    auction
}

pub fn save_auction(env: &Env, auction: &AuctionRecord) {
    let key = DataKey::Auction(auction.id.clone());
    env.storage().persistent().set(&key, auction);
    env.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_AMOUNT);
}

// ============================================================================
// SEALED AUCTION STORAGE
// ============================================================================

pub fn has_sealed(env: &Env, id: &BytesN<32>) -> bool {
    env.storage().persistent().has(&DataKey::Sealed(id.clone()))
}

pub fn get_sealed(env: &Env, id: &BytesN<32>) -> Option<SealedAuctionRecord> {
    let key = DataKey::Sealed(id.clone());
    let auction = env
        .storage()
        .persistent()
        .get::<_, SealedAuctionRecord>(&key);
    if auction.is_some() {
        env.storage()
            .persistent()
            .extend_ttl(&key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_AMOUNT);
    }
    auction
}

pub fn save_sealed(env: &Env, auction: &SealedAuctionRecord) {
    let key = DataKey::Sealed(auction.id.clone());
    env.storage().persistent().set(&key, auction);
    env.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_AMOUNT);
}

// ============================================================================
// OWNER INDEX
// ============================================================================

pub fn get_owner_auctions(env: &Env, owner: &Address) -> Vec<BytesN<32>> {
    let key = DataKey::OwnerAuctions(owner.clone());
    env.storage()
        .persistent()
        .get(&key)
        .unwrap_or(Vec::new(env))
}

pub fn add_owner_auction(env: &Env, owner: &Address, id: &BytesN<32>) {
    let key = DataKey::OwnerAuctions(owner.clone());
    let mut ids = get_owner_auctions(env, owner);
    ids.push_back(id.clone());
    env.storage().persistent().set(&key, &ids);
    env.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_AMOUNT);
}
