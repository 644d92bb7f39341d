use soroban_sdk::{
    contracttype, panic_with_error, unwrap::UnwrapOptimized, vec, Address, Env, IntoVal, String,
    Symbol, TryFromVal, Val, Vec,
};

use crate::{
    config::{ConfigWord, UserConfig},
    constants::MAX_RESERVES,
    errors::RiskEngineError,
};

pub(crate) const LEDGER_THRESHOLD_SHARED: u32 = 172800; // ~ 10 days
pub(crate) const LEDGER_BUMP_SHARED: u32 = 241920; // ~ 14 days

pub(crate) const LEDGER_THRESHOLD_USER: u32 = 518400; // ~ 30 days
pub(crate) const LEDGER_BUMP_USER: u32 = 535670; // ~ 31 days

/********** Storage Types **********/

/// The pool's config
#[derive(Clone)]
#[contracttype]
pub struct PoolConfig {
    pub oracle: Address,
}

/// The ledger data for a reserve asset. The identity fields (index, token
/// addresses, rate strategy) are written once at listing; the accrual
/// fields are refreshed by the external accrual engine.
#[derive(Clone)]
#[contracttype]
pub struct ReserveData {
    pub index: u32,              // the index of the reserve in the list
    pub b_token: Address,        // the interest bearing receipt token
    pub s_token: Address,        // the fixed rate debt token
    pub d_token: Address,        // the variable rate debt token
    pub rate_strategy: Address,  // the rate strategy contract accruing this reserve
    pub supply_index: i128,      // the cumulative supply accrual index, 27 decimals
    pub borrow_index: i128,      // the cumulative variable borrow accrual index, 27 decimals
    pub supply_rate: i128,       // the current supply rate, 27 decimals
    pub borrow_rate: i128,       // the current variable borrow rate, 27 decimals
    pub last_time: u64,          // the last timestamp the accrual fields were updated
    pub accrued_to_treasury: i128, // interest accrued to the treasury, in scaled b_token units
    pub unbacked: i128,          // unbacked b_tokens minted by bridges, in underlying
    pub isolation_debt: i128,    // debt drawn against this asset in isolation mode, in underlying
}

/// An efficiency mode category. Reserves declaring the same non-zero
/// category share these risk parameters for users opted into it.
#[derive(Clone)]
#[contracttype]
pub struct EModeCategory {
    pub ltv: u32,                   // 4 decimal percent
    pub liquidation_threshold: u32, // 4 decimal percent
    pub liquidation_bonus: u32,     // 4 decimal percent
    pub price_source: Option<Address>, // unified price asset, None to use per-asset prices
    pub label: String,
}

/********** Storage Key Types **********/

const ADMIN_KEY: &str = "Admin";
const POOL_CONFIG_KEY: &str = "Config";
const RES_LIST_KEY: &str = "ResList";

#[derive(Clone)]
#[contracttype]
pub enum RiskDataKey {
    // A map of underlying asset's contract address to packed reserve config
    ResConfig(Address),
    // A map of underlying asset's contract address to reserve data
    ResData(Address),
    // A map of user address to packed user config
    UserConfig(Address),
    // A map of user address to selected e-mode category id
    UserEMode(Address),
    // A map of category id to e-mode category
    EModeCat(u32),
}

/********** Storage **********/

/// Bump the instance rent for the contract
pub fn extend_instance(e: &Env) {
    e.storage()
        .instance()
        .extend_ttl(LEDGER_THRESHOLD_SHARED, LEDGER_BUMP_SHARED);
}

/// Fetch an entry in persistent storage that has a default value if it doesn't exist
fn get_persistent_default<K: IntoVal<Env, Val>, V: TryFromVal<Env, Val>>(
    e: &Env,
    key: &K,
    default: V,
    bump_threshold: u32,
    bump_amount: u32,
) -> V {
    if let Some(result) = e.storage().persistent().get::<K, V>(key) {
        e.storage()
            .persistent()
            .extend_ttl(key, bump_threshold, bump_amount);
        result
    } else {
        default
    }
}

/********** Admin **********/

/// Fetch the current admin Address
///
/// ### Panics
/// If the admin does not exist
pub fn get_admin(e: &Env) -> Address {
    e.storage()
        .instance()
        .get(&Symbol::new(e, ADMIN_KEY))
        .unwrap_optimized()
}

/// Set a new admin
///
/// ### Arguments
/// * `new_admin` - The Address for the admin
pub fn set_admin(e: &Env, new_admin: &Address) {
    e.storage()
        .instance()
        .set::<Symbol, Address>(&Symbol::new(e, ADMIN_KEY), new_admin);
}

/// Checks if an admin is set
pub fn has_admin(e: &Env) -> bool {
    e.storage().instance().has(&Symbol::new(e, ADMIN_KEY))
}

/********** Pool Config **********/

/// Fetch the pool configuration
///
/// ### Panics
/// If the pool's config is not set
pub fn get_pool_config(e: &Env) -> PoolConfig {
    e.storage()
        .instance()
        .get(&Symbol::new(e, POOL_CONFIG_KEY))
        .unwrap_optimized()
}

/// Set the pool configuration
///
/// ### Arguments
/// * `config` - The pool configuration
pub fn set_pool_config(e: &Env, config: &PoolConfig) {
    e.storage()
        .instance()
        .set::<Symbol, PoolConfig>(&Symbol::new(e, POOL_CONFIG_KEY), config);
}

/********** Reserve Config (ResConfig) **********/

/// Fetch the packed reserve configuration for an asset
///
/// ### Arguments
/// * `asset` - The contract address of the asset
///
/// ### Panics
/// If the reserve does not exist
pub fn get_res_config(e: &Env, asset: &Address) -> ConfigWord {
    let key = RiskDataKey::ResConfig(asset.clone());
    e.storage()
        .persistent()
        .extend_ttl(&key, LEDGER_THRESHOLD_SHARED, LEDGER_BUMP_SHARED);
    e.storage()
        .persistent()
        .get::<RiskDataKey, ConfigWord>(&key)
        .unwrap_optimized()
}

/// Set the packed reserve configuration for an asset
///
/// ### Arguments
/// * `asset` - The contract address of the asset
/// * `config` - The packed reserve configuration for the asset
pub fn set_res_config(e: &Env, asset: &Address, config: &ConfigWord) {
    let key = RiskDataKey::ResConfig(asset.clone());
    e.storage()
        .persistent()
        .set::<RiskDataKey, ConfigWord>(&key, config);
    e.storage()
        .persistent()
        .extend_ttl(&key, LEDGER_THRESHOLD_SHARED, LEDGER_BUMP_SHARED);
}

/// Checks if a reserve exists for an asset
///
/// ### Arguments
/// * `asset` - The contract address of the asset
pub fn has_res(e: &Env, asset: &Address) -> bool {
    let key = RiskDataKey::ResConfig(asset.clone());
    e.storage().persistent().has(&key)
}

/********** Reserve Data (ResData) **********/

/// Fetch the reserve data for an asset
///
/// ### Arguments
/// * `asset` - The contract address of the asset
///
/// ### Panics
/// If the reserve does not exist
pub fn get_res_data(e: &Env, asset: &Address) -> ReserveData {
    let key = RiskDataKey::ResData(asset.clone());
    e.storage()
        .persistent()
        .extend_ttl(&key, LEDGER_THRESHOLD_SHARED, LEDGER_BUMP_SHARED);
    e.storage()
        .persistent()
        .get::<RiskDataKey, ReserveData>(&key)
        .unwrap_optimized()
}

/// Set the reserve data for an asset
///
/// ### Arguments
/// * `asset` - The contract address of the asset
/// * `data` - The reserve data for the asset
pub fn set_res_data(e: &Env, asset: &Address, data: &ReserveData) {
    let key = RiskDataKey::ResData(asset.clone());
    e.storage()
        .persistent()
        .set::<RiskDataKey, ReserveData>(&key, data);
    e.storage()
        .persistent()
        .extend_ttl(&key, LEDGER_THRESHOLD_SHARED, LEDGER_BUMP_SHARED);
}

/********** Reserve List (ResList) **********/

/// Fetch the list of reserves
pub fn get_res_list(e: &Env) -> Vec<Address> {
    get_persistent_default(
        e,
        &Symbol::new(e, RES_LIST_KEY),
        vec![e],
        LEDGER_THRESHOLD_SHARED,
        LEDGER_BUMP_SHARED,
    )
}

/// Add a reserve to the back of the list and returns the index
///
/// ### Arguments
/// * `asset` - The contract address of the underlying asset
///
/// ### Panics
/// If the number of reserves in the list exceeds 128
///
// @dev: Once added it can't be removed
pub fn push_res_list(e: &Env, asset: &Address) -> u32 {
    let mut res_list = get_res_list(e);
    if res_list.len() == MAX_RESERVES {
        panic_with_error!(e, RiskEngineError::MaxReservesExceeded)
    }
    res_list.push_back(asset.clone());
    let new_index = res_list.len() - 1;
    e.storage()
        .persistent()
        .set::<Symbol, Vec<Address>>(&Symbol::new(e, RES_LIST_KEY), &res_list);
    e.storage().persistent().extend_ttl(
        &Symbol::new(e, RES_LIST_KEY),
        LEDGER_THRESHOLD_SHARED,
        LEDGER_BUMP_SHARED,
    );
    new_index
}

/********** User Config **********/

/// Fetch the user's reserve participation bitmap or return an empty one
///
/// ### Arguments
/// * `user` - The address of the user
pub fn get_user_config(e: &Env, user: &Address) -> UserConfig {
    let key = RiskDataKey::UserConfig(user.clone());
    get_persistent_default(
        e,
        &key,
        UserConfig::empty(),
        LEDGER_THRESHOLD_USER,
        LEDGER_BUMP_USER,
    )
}

/// Set the user's reserve participation bitmap
///
/// ### Arguments
/// * `user` - The address of the user
/// * `config` - The new bitmap for the user
pub fn set_user_config(e: &Env, user: &Address, config: &UserConfig) {
    let key = RiskDataKey::UserConfig(user.clone());
    e.storage()
        .persistent()
        .set::<RiskDataKey, UserConfig>(&key, config);
    e.storage()
        .persistent()
        .extend_ttl(&key, LEDGER_THRESHOLD_USER, LEDGER_BUMP_USER);
}

/********** User EMode **********/

/// Fetch the e-mode category id the user has opted into, 0 if none
///
/// ### Arguments
/// * `user` - The address of the user
pub fn get_user_emode(e: &Env, user: &Address) -> u32 {
    let key = RiskDataKey::UserEMode(user.clone());
    get_persistent_default(e, &key, 0, LEDGER_THRESHOLD_USER, LEDGER_BUMP_USER)
}

/// Set the e-mode category id for the user
///
/// ### Arguments
/// * `user` - The address of the user
/// * `category_id` - The category id, 0 to opt out
pub fn set_user_emode(e: &Env, user: &Address, category_id: u32) {
    let key = RiskDataKey::UserEMode(user.clone());
    e.storage()
        .persistent()
        .set::<RiskDataKey, u32>(&key, &category_id);
    e.storage()
        .persistent()
        .extend_ttl(&key, LEDGER_THRESHOLD_USER, LEDGER_BUMP_USER);
}

/********** EMode Categories **********/

/// Fetch the e-mode category for an id
///
/// ### Arguments
/// * `category_id` - The id of the category
///
/// ### Panics
/// If the category does not exist
pub fn get_emode_category(e: &Env, category_id: u32) -> EModeCategory {
    let key = RiskDataKey::EModeCat(category_id);
    e.storage()
        .persistent()
        .extend_ttl(&key, LEDGER_THRESHOLD_SHARED, LEDGER_BUMP_SHARED);
    e.storage()
        .persistent()
        .get::<RiskDataKey, EModeCategory>(&key)
        .unwrap_optimized()
}

/// Set the e-mode category for an id
///
/// ### Arguments
/// * `category_id` - The id of the category
/// * `category` - The category parameters
pub fn set_emode_category(e: &Env, category_id: u32, category: &EModeCategory) {
    let key = RiskDataKey::EModeCat(category_id);
    e.storage()
        .persistent()
        .set::<RiskDataKey, EModeCategory>(&key, category);
    e.storage()
        .persistent()
        .extend_ttl(&key, LEDGER_THRESHOLD_SHARED, LEDGER_BUMP_SHARED);
}

/// Checks if an e-mode category exists for an id
///
/// ### Arguments
/// * `category_id` - The id of the category
pub fn has_emode_category(e: &Env, category_id: u32) -> bool {
    let key = RiskDataKey::EModeCat(category_id);
    e.storage().persistent().has(&key)
}
