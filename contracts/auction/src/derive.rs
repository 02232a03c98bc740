//! Deterministic auction addressing.
//!
//! An auction lives at `sha256(label || owner || title || nonce)`, where the
//! nonce is the highest value in `0..=255` whose digest is canonical (top bit
//! of the first byte clear). The same owner and title always land on the same
//! address, so a second auction with that pair is detected as a duplicate.

use soroban_sdk::{xdr::ToXdr, Address, Bytes, BytesN, Env, String};

use crate::errors::Error;
use crate::types::{DerivedAddress, MAX_TITLE_LEN};

pub const OPEN_AUCTION_LABEL: &[u8] = b"open auction";
pub const SEALED_AUCTION_LABEL: &[u8] = b"sealed auction";

const MAX_NONCE: u32 = 255;

pub fn title_seed(env: &Env, title: &String) -> Result<Bytes, Error> {
    let len = title.len();
    if len > MAX_TITLE_LEN {
        return Err(Error::InvalidTitle);
    }
    let mut buf = [0u8; MAX_TITLE_LEN as usize];
    let used = &mut buf[..len as usize];
    title.copy_into_slice(used);
    Ok(Bytes::from_slice(env, used))
}

pub fn derive_address(
    env: &Env,
    label: &[u8],
    owner: &Address,
    title: &String,
) -> Result<DerivedAddress, Error> {
    let mut seed = Bytes::from_slice(env, label);
    seed.append(&owner.clone().to_xdr(env));
    seed.append(&title_seed(env, title)?);

    for nonce in (0..=MAX_NONCE).rev() {
        let mut preimage = seed.clone();
        preimage.push_back(nonce as u8);
        let id = env.crypto().sha256(&preimage).to_bytes();
        if is_canonical(&id) {
            return Ok(DerivedAddress { id, nonce });
        }
    }

    Err(Error::DerivationFailed)
}

fn is_canonical(id: &BytesN<32>) -> bool {
    matches!(id.get(0), Some(first) if first & 0x80 == 0)
}
