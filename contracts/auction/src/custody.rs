//! Token movements in and out of the contract's custody account.
//!
//! Native value and the auctioned asset are both plain token contracts. A
//! failed transfer is reported as `Error::TransferFailed`, which aborts the
//! calling operation together with any ledger update it already made.

use soroban_sdk::{token, Address, Env};

use crate::admin;
use crate::errors::Error;
use crate::types::ItemDescriptor;

fn transfer(env: &Env, token: &Address, from: &Address, to: &Address, amount: u64) -> Result<(), Error> {
    if amount == 0 {
        return Ok(());
    }
    let client = token::TokenClient::new(env, token);
    match client.try_transfer(from, to, &i128::from(amount)) {
        Ok(Ok(())) => Ok(()),
        _ => Err(Error::TransferFailed),
    }
}

/// Move native value from `from` into escrow.
pub fn collect_value(env: &Env, from: &Address, amount: u64) -> Result<(), Error> {
    let config = admin::config(env)?;
    transfer(env, &config.native_token, from, &env.current_contract_address(), amount)
}

/// Pay native value out of escrow to `to`.
pub fn pay_value(env: &Env, to: &Address, amount: u64) -> Result<(), Error> {
    let config = admin::config(env)?;
    transfer(env, &config.native_token, &env.current_contract_address(), to, amount)
}

pub fn deposit_item(env: &Env, item: &ItemDescriptor, from: &Address) -> Result<(), Error> {
    transfer(env, &item.asset, from, &env.current_contract_address(), item.amount)
}

pub fn release_item(env: &Env, item: &ItemDescriptor, to: &Address) -> Result<(), Error> {
    transfer(env, &item.asset, &env.current_contract_address(), to, item.amount)
}
