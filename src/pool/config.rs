use soroban_sdk::{panic_with_error, Address, Env};

use crate::{
    config::ReserveConfig,
    constants::{PERCENTAGE_FACTOR, RAY},
    errors::RiskEngineError,
    storage::{self, EModeCategory, PoolConfig, ReserveData},
};

/// Initialize the risk engine
///
/// Panics if the contract is already initialized
pub fn execute_initialize(e: &Env, admin: &Address, oracle: &Address) {
    if storage::has_admin(e) {
        panic_with_error!(e, RiskEngineError::AlreadyInitializedError);
    }

    storage::set_admin(e, admin);
    storage::set_pool_config(
        e,
        &PoolConfig {
            oracle: oracle.clone(),
        },
    );
}

/// List a reserve, assigning it the next index and seeding its accrual
/// state at unit indices
#[allow(clippy::too_many_arguments)]
pub fn initialize_reserve(
    e: &Env,
    asset: &Address,
    b_token: &Address,
    s_token: &Address,
    d_token: &Address,
    rate_strategy: &Address,
    config: &ReserveConfig,
) -> u32 {
    if storage::has_res(e, asset) {
        panic_with_error!(e, RiskEngineError::BadRequest);
    }

    require_valid_reserve_metadata(e, config);
    let index = storage::push_res_list(e, asset);

    storage::set_res_config(e, asset, &config.encode());
    let init_data = ReserveData {
        index,
        b_token: b_token.clone(),
        s_token: s_token.clone(),
        d_token: d_token.clone(),
        rate_strategy: rate_strategy.clone(),
        supply_index: RAY,
        borrow_index: RAY,
        supply_rate: 0,
        borrow_rate: 0,
        last_time: e.ledger().timestamp(),
        accrued_to_treasury: 0,
        unbacked: 0,
        isolation_debt: 0,
    };
    storage::set_res_data(e, asset, &init_data);
    index
}

/// Update a reserve's configuration. The reserve's index and token
/// addresses are immutable.
pub fn execute_update_reserve(e: &Env, asset: &Address, config: &ReserveConfig) {
    if !storage::has_res(e, asset) {
        panic_with_error!(e, RiskEngineError::ReserveNotFound);
    }
    require_valid_reserve_metadata(e, config);

    storage::set_res_config(e, asset, &config.encode());
}

/// Write fresh accrual state for a reserve. The identity fields of the
/// stored data (index, token addresses, rate strategy) are preserved from
/// the listing regardless of what the caller passes.
pub fn execute_sync_reserve_data(e: &Env, asset: &Address, data: &ReserveData) {
    if !storage::has_res(e, asset) {
        panic_with_error!(e, RiskEngineError::ReserveNotFound);
    }
    if data.supply_index <= 0 || data.borrow_index <= 0 {
        panic_with_error!(e, RiskEngineError::BadRequest);
    }

    let cur_data = storage::get_res_data(e, asset);
    let new_data = ReserveData {
        index: cur_data.index,
        b_token: cur_data.b_token,
        s_token: cur_data.s_token,
        d_token: cur_data.d_token,
        rate_strategy: cur_data.rate_strategy,
        supply_index: data.supply_index,
        borrow_index: data.borrow_index,
        supply_rate: data.supply_rate,
        borrow_rate: data.borrow_rate,
        last_time: data.last_time,
        accrued_to_treasury: data.accrued_to_treasury,
        unbacked: data.unbacked,
        isolation_debt: data.isolation_debt,
    };
    storage::set_res_data(e, asset, &new_data);
}

/// Create or replace an e-mode category. Category id 0 means "no e-mode"
/// and cannot be written.
pub fn execute_set_emode_category(e: &Env, category_id: u32, category: &EModeCategory) {
    if category_id == 0
        || category_id > 255
        || category.ltv == 0
        || category.ltv > category.liquidation_threshold
        || category.liquidation_threshold as i128 > PERCENTAGE_FACTOR
    {
        panic_with_error!(e, RiskEngineError::InvalidEModeCategory);
    }
    storage::set_emode_category(e, category_id, category);
}

/// Opt a user into an e-mode category, or out with id 0
pub fn execute_set_user_emode(e: &Env, user: &Address, category_id: u32) {
    if category_id != 0 && !storage::has_emode_category(e, category_id) {
        panic_with_error!(e, RiskEngineError::InvalidEModeCategory);
    }
    storage::set_user_emode(e, user, category_id);
}

/// Flip the user's collateral participation bit for an asset's reserve
pub fn execute_set_collateral(e: &Env, user: &Address, asset: &Address, enabled: bool) {
    if !storage::has_res(e, asset) {
        panic_with_error!(e, RiskEngineError::ReserveNotFound);
    }
    let data = storage::get_res_data(e, asset);
    let mut user_config = storage::get_user_config(e, user);
    user_config.set_using_as_collateral(data.index, enabled);
    storage::set_user_config(e, user, &user_config);
}

/// Flip the user's borrowing participation bit for an asset's reserve
pub fn execute_set_borrowing(e: &Env, user: &Address, asset: &Address, enabled: bool) {
    if !storage::has_res(e, asset) {
        panic_with_error!(e, RiskEngineError::ReserveNotFound);
    }
    let data = storage::get_res_data(e, asset);
    let mut user_config = storage::get_user_config(e, user);
    user_config.set_borrowing(data.index, enabled);
    storage::set_user_config(e, user, &user_config);
}

#[allow(clippy::zero_prefixed_literal)]
fn require_valid_reserve_metadata(e: &Env, metadata: &ReserveConfig) {
    let percent = PERCENTAGE_FACTOR as u32;
    if metadata.decimals > 18
        || metadata.ltv > metadata.liquidation_threshold
        || metadata.liquidation_threshold > percent
        || metadata.reserve_factor > percent
        || metadata.liquidation_protocol_fee > percent
        || metadata.emode_category > 255
        || metadata.borrow_cap >= (1 << 36)
        || metadata.supply_cap >= (1 << 36)
        || metadata.unbacked_mint_cap >= (1 << 36)
        || metadata.debt_ceiling >= (1 << 40)
    {
        panic_with_error!(e, RiskEngineError::InvalidReserveMetadata);
    }
}

#[cfg(test)]
mod tests {
    use soroban_sdk::{testutils::Address as _, String};

    use crate::testutils;

    use super::*;

    #[test]
    fn test_execute_initialize() {
        let e = Env::default();
        e.mock_all_auths();

        let pool = testutils::create_risk_engine(&e);
        let admin = Address::generate(&e);
        let oracle = Address::generate(&e);

        e.as_contract(&pool, || {
            execute_initialize(&e, &admin, &oracle);
            assert_eq!(storage::get_admin(&e), admin);
            assert_eq!(storage::get_pool_config(&e).oracle, oracle);
        });
    }

    #[test]
    #[should_panic(expected = "Error(Contract, #3)")]
    fn test_execute_initialize_twice_panics() {
        let e = Env::default();
        e.mock_all_auths();

        let pool = testutils::create_risk_engine(&e);
        let admin = Address::generate(&e);
        let oracle = Address::generate(&e);

        e.as_contract(&pool, || {
            execute_initialize(&e, &admin, &oracle);
            execute_initialize(&e, &admin, &oracle);
        });
    }

    #[test]
    fn test_initialize_reserve() {
        let e = Env::default();
        e.mock_all_auths();

        let pool = testutils::create_risk_engine(&e);
        let asset_0 = Address::generate(&e);
        let asset_1 = Address::generate(&e);
        let b_token = Address::generate(&e);
        let s_token = Address::generate(&e);
        let d_token = Address::generate(&e);
        let rate_strategy = Address::generate(&e);
        let config = testutils::default_reserve_config();

        e.as_contract(&pool, || {
            let index = initialize_reserve(
                &e,
                &asset_0,
                &b_token,
                &s_token,
                &d_token,
                &rate_strategy,
                &config,
            );
            assert_eq!(index, 0);
            let index = initialize_reserve(
                &e,
                &asset_1,
                &b_token,
                &s_token,
                &d_token,
                &rate_strategy,
                &config,
            );
            assert_eq!(index, 1);

            let data = storage::get_res_data(&e, &asset_0);
            assert_eq!(data.index, 0);
            assert_eq!(data.b_token, b_token);
            assert_eq!(data.supply_index, RAY);
            assert_eq!(data.borrow_index, RAY);

            let stored = ReserveConfig::decode(&storage::get_res_config(&e, &asset_0));
            assert_eq!(stored, config);

            let res_list = storage::get_res_list(&e);
            assert_eq!(res_list.len(), 2);
            assert_eq!(res_list.get_unchecked(1), asset_1);
        });
    }

    #[test]
    #[should_panic(expected = "Error(Contract, #1300)")]
    fn test_initialize_reserve_twice_panics() {
        let e = Env::default();
        e.mock_all_auths();

        let pool = testutils::create_risk_engine(&e);
        let asset = Address::generate(&e);
        let token = Address::generate(&e);
        let config = testutils::default_reserve_config();

        e.as_contract(&pool, || {
            initialize_reserve(&e, &asset, &token, &token, &token, &token, &config);
            initialize_reserve(&e, &asset, &token, &token, &token, &token, &config);
        });
    }

    #[test]
    #[should_panic(expected = "Error(Contract, #1301)")]
    fn test_initialize_reserve_invalid_metadata_panics() {
        let e = Env::default();
        e.mock_all_auths();

        let pool = testutils::create_risk_engine(&e);
        let asset = Address::generate(&e);
        let token = Address::generate(&e);
        let mut config = testutils::default_reserve_config();
        // ltv above the liquidation threshold
        config.ltv = 0_9000;
        config.liquidation_threshold = 0_8000;

        e.as_contract(&pool, || {
            initialize_reserve(&e, &asset, &token, &token, &token, &token, &config);
        });
    }

    #[test]
    fn test_execute_update_reserve_keeps_index() {
        let e = Env::default();
        e.mock_all_auths();

        let pool = testutils::create_risk_engine(&e);
        let underlying = Address::generate(&e);
        let (config, data) = testutils::default_reserve_meta(&e);
        testutils::create_reserve(&e, &pool, &underlying, &config, &data);

        e.as_contract(&pool, || {
            let mut new_config = config.clone();
            new_config.ltv = 0_5000;
            new_config.liquidation_threshold = 0_6000;
            execute_update_reserve(&e, &underlying, &new_config);

            let stored = ReserveConfig::decode(&storage::get_res_config(&e, &underlying));
            assert_eq!(stored.ltv, 0_5000);
            assert_eq!(stored.liquidation_threshold, 0_6000);
            // the data record and its index are untouched
            assert_eq!(storage::get_res_data(&e, &underlying).index, 0);
        });
    }

    #[test]
    #[should_panic(expected = "Error(Contract, #1302)")]
    fn test_execute_update_reserve_unlisted_panics() {
        let e = Env::default();
        e.mock_all_auths();

        let pool = testutils::create_risk_engine(&e);
        let asset = Address::generate(&e);
        let config = testutils::default_reserve_config();

        e.as_contract(&pool, || {
            execute_update_reserve(&e, &asset, &config);
        });
    }

    #[test]
    fn test_execute_sync_reserve_data_preserves_identity() {
        let e = Env::default();
        e.mock_all_auths();

        let pool = testutils::create_risk_engine(&e);
        let underlying = Address::generate(&e);
        let (config, data) = testutils::default_reserve_meta(&e);
        testutils::create_reserve(&e, &pool, &underlying, &config, &data);

        e.as_contract(&pool, || {
            let mut update = data.clone();
            // attempt to re-point the tokens and move the index
            update.index = 55;
            update.b_token = Address::generate(&e);
            update.supply_index = 1_100_000_000_000_000_000_000_000_000;
            update.borrow_index = 1_200_000_000_000_000_000_000_000_000;
            update.supply_rate = 0_030_000_000_000_000_000_000_000_000;
            update.borrow_rate = 0_050_000_000_000_000_000_000_000_000;
            update.last_time = 100;
            execute_sync_reserve_data(&e, &underlying, &update);

            let stored = storage::get_res_data(&e, &underlying);
            assert_eq!(stored.index, 0);
            assert_eq!(stored.b_token, data.b_token);
            assert_eq!(stored.s_token, data.s_token);
            assert_eq!(stored.d_token, data.d_token);
            assert_eq!(stored.rate_strategy, data.rate_strategy);
            assert_eq!(
                stored.supply_index,
                1_100_000_000_000_000_000_000_000_000
            );
            assert_eq!(
                stored.borrow_index,
                1_200_000_000_000_000_000_000_000_000
            );
            assert_eq!(stored.last_time, 100);
        });
    }

    #[test]
    #[should_panic(expected = "Error(Contract, #1300)")]
    fn test_execute_sync_reserve_data_zero_index_panics() {
        let e = Env::default();
        e.mock_all_auths();

        let pool = testutils::create_risk_engine(&e);
        let underlying = Address::generate(&e);
        let (config, data) = testutils::default_reserve_meta(&e);
        testutils::create_reserve(&e, &pool, &underlying, &config, &data);

        e.as_contract(&pool, || {
            let mut update = data.clone();
            update.supply_index = 0;
            execute_sync_reserve_data(&e, &underlying, &update);
        });
    }

    #[test]
    fn test_execute_set_emode_category() {
        let e = Env::default();
        e.mock_all_auths();

        let pool = testutils::create_risk_engine(&e);
        e.as_contract(&pool, || {
            let category = EModeCategory {
                ltv: 0_9000,
                liquidation_threshold: 0_9500,
                liquidation_bonus: 1_0100,
                price_source: None,
                label: String::from_str(&e, "stablecoins"),
            };
            execute_set_emode_category(&e, 1, &category);
            assert!(storage::has_emode_category(&e, 1));
            assert_eq!(storage::get_emode_category(&e, 1).ltv, 0_9000);
        });
    }

    #[test]
    #[should_panic(expected = "Error(Contract, #1304)")]
    fn test_execute_set_emode_category_zero_id_panics() {
        let e = Env::default();
        e.mock_all_auths();

        let pool = testutils::create_risk_engine(&e);
        e.as_contract(&pool, || {
            let category = EModeCategory {
                ltv: 0_9000,
                liquidation_threshold: 0_9500,
                liquidation_bonus: 1_0100,
                price_source: None,
                label: String::from_str(&e, "stablecoins"),
            };
            execute_set_emode_category(&e, 0, &category);
        });
    }

    #[test]
    #[should_panic(expected = "Error(Contract, #1304)")]
    fn test_execute_set_emode_category_threshold_below_ltv_panics() {
        let e = Env::default();
        e.mock_all_auths();

        let pool = testutils::create_risk_engine(&e);
        e.as_contract(&pool, || {
            let category = EModeCategory {
                ltv: 0_9600,
                liquidation_threshold: 0_9500,
                liquidation_bonus: 1_0100,
                price_source: None,
                label: String::from_str(&e, "stablecoins"),
            };
            execute_set_emode_category(&e, 1, &category);
        });
    }

    #[test]
    fn test_execute_set_user_emode() {
        let e = Env::default();
        e.mock_all_auths();

        let pool = testutils::create_risk_engine(&e);
        let samwise = Address::generate(&e);
        e.as_contract(&pool, || {
            let category = EModeCategory {
                ltv: 0_9000,
                liquidation_threshold: 0_9500,
                liquidation_bonus: 1_0100,
                price_source: None,
                label: String::from_str(&e, "stablecoins"),
            };
            execute_set_emode_category(&e, 1, &category);

            execute_set_user_emode(&e, &samwise, 1);
            assert_eq!(storage::get_user_emode(&e, &samwise), 1);

            // opting out with 0 is always allowed
            execute_set_user_emode(&e, &samwise, 0);
            assert_eq!(storage::get_user_emode(&e, &samwise), 0);
        });
    }

    #[test]
    #[should_panic(expected = "Error(Contract, #1304)")]
    fn test_execute_set_user_emode_missing_category_panics() {
        let e = Env::default();
        e.mock_all_auths();

        let pool = testutils::create_risk_engine(&e);
        let samwise = Address::generate(&e);
        e.as_contract(&pool, || {
            execute_set_user_emode(&e, &samwise, 9);
        });
    }

    #[test]
    fn test_execute_set_collateral_and_borrowing() {
        let e = Env::default();
        e.mock_all_auths();

        let pool = testutils::create_risk_engine(&e);
        let samwise = Address::generate(&e);
        let underlying_0 = Address::generate(&e);
        let underlying_1 = Address::generate(&e);
        let (config, data) = testutils::default_reserve_meta(&e);
        testutils::create_reserve(&e, &pool, &underlying_0, &config, &data);
        testutils::create_reserve(&e, &pool, &underlying_1, &config, &data);

        e.as_contract(&pool, || {
            execute_set_collateral(&e, &samwise, &underlying_1, true);
            execute_set_borrowing(&e, &samwise, &underlying_0, true);

            let user_config = storage::get_user_config(&e, &samwise);
            assert!(user_config.is_using_as_collateral(1));
            assert!(!user_config.is_using_as_collateral(0));
            assert!(user_config.is_borrowing(0));
            assert!(!user_config.is_borrowing(1));

            execute_set_collateral(&e, &samwise, &underlying_1, false);
            let user_config = storage::get_user_config(&e, &samwise);
            assert!(!user_config.is_using_as_collateral(1));
            assert!(user_config.is_borrowing(0));
        });
    }

    #[test]
    #[should_panic(expected = "Error(Contract, #1302)")]
    fn test_execute_set_collateral_unlisted_panics() {
        let e = Env::default();
        e.mock_all_auths();

        let pool = testutils::create_risk_engine(&e);
        let samwise = Address::generate(&e);
        let asset = Address::generate(&e);
        e.as_contract(&pool, || {
            execute_set_collateral(&e, &samwise, &asset, true);
        });
    }
}
