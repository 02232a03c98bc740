use soroban_sdk::{Address, Env};

use crate::errors::Error;
use crate::events::InitializedEventData;
use crate::storage;
use crate::types::Config;

pub fn initialize(env: &Env, admin: Address, native_token: Address) -> Result<(), Error> {
    if storage::has_config(env) {
        return Err(Error::AlreadyInitialized);
    }
    admin.require_auth();

    let config = Config {
        admin: admin.clone(),
        native_token: native_token.clone(),
    };
    storage::set_config(env, &config);

    InitializedEventData {
        admin,
        native_token,
    }
    .publish(env);

    Ok(())
}

pub fn config(env: &Env) -> Result<Config, Error> {
    storage::get_config(env).ok_or(Error::NotInitialized)
}
