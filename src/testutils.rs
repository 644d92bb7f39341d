#![cfg(test)]

use crate::{
    config::ReserveConfig,
    constants::RAY,
    storage::{self, ReserveData},
    RiskEngineContract,
};
use sep_40_oracle::testutils::{MockPriceOracleClient, MockPriceOracleWASM};
use sep_41_token::testutils::{MockTokenClient, MockTokenWASM};
use soroban_sdk::{
    contract, contractimpl, testutils::Address as _, Address, Env, IntoVal,
};

pub(crate) fn create_risk_engine(e: &Env) -> Address {
    e.register_contract(None, RiskEngineContract {})
}

//************************************************
//           External Contract Helpers
//************************************************

// ***** Token *****

pub(crate) fn create_token_contract<'a>(
    e: &Env,
    admin: &Address,
) -> (Address, MockTokenClient<'a>) {
    let contract_address = Address::generate(e);
    e.register_contract_wasm(&contract_address, MockTokenWASM);
    let client = MockTokenClient::new(e, &contract_address);
    client.initialize(admin, &7, &"unit".into_val(e), &"test".into_val(e));
    (contract_address, client)
}

// ***** Scaled Token *****

/// A minimal stand-in for the b_token and variable d_token contracts, only
/// reporting per-user scaled balances.
#[contract]
pub struct MockScaledToken;

#[contractimpl]
impl MockScaledToken {
    pub fn set_scaled_balance(e: Env, id: Address, balance: i128) {
        e.storage().persistent().set(&id, &balance);
    }

    pub fn scaled_balance(e: Env, id: Address) -> i128 {
        e.storage().persistent().get(&id).unwrap_or(0)
    }
}

pub(crate) fn create_scaled_token<'a>(e: &Env) -> (Address, MockScaledTokenClient<'a>) {
    let contract_address = e.register_contract(None, MockScaledToken {});
    (
        contract_address.clone(),
        MockScaledTokenClient::new(e, &contract_address),
    )
}

//***** Oracle ******

pub(crate) fn create_mock_oracle(e: &Env) -> (Address, MockPriceOracleClient) {
    let contract_address = e.register_contract_wasm(None, MockPriceOracleWASM);
    (
        contract_address.clone(),
        MockPriceOracleClient::new(e, &contract_address),
    )
}

//************************************************
//            Reserve Fixtures
//************************************************

pub(crate) fn default_reserve_config() -> ReserveConfig {
    ReserveConfig {
        ltv: 0_7500,
        liquidation_threshold: 0_8500,
        liquidation_bonus: 1_0500,
        decimals: 7,
        active: true,
        frozen: false,
        borrowing_enabled: true,
        stable_borrowing_enabled: true,
        paused: false,
        borrowable_in_isolation: false,
        siloed_borrowing: false,
        flashloan_enabled: false,
        reserve_factor: 0_1000,
        borrow_cap: 0,
        supply_cap: 0,
        liquidation_protocol_fee: 0,
        emode_category: 0,
        unbacked_mint_cap: 0,
        debt_ceiling: 0,
    }
}

pub(crate) fn default_reserve_meta(e: &Env) -> (ReserveConfig, ReserveData) {
    (
        default_reserve_config(),
        ReserveData {
            index: 0,
            b_token: Address::generate(e),
            s_token: Address::generate(e),
            d_token: Address::generate(e),
            rate_strategy: Address::generate(e),
            supply_index: RAY,
            borrow_index: RAY,
            supply_rate: 0,
            borrow_rate: 0,
            last_time: 0,
            accrued_to_treasury: 0,
            unbacked: 0,
            isolation_debt: 0,
        },
    )
}

/// List a reserve in the pool's storage, assigning it the next index.
pub(crate) fn create_reserve(
    e: &Env,
    pool_address: &Address,
    underlying: &Address,
    config: &ReserveConfig,
    data: &ReserveData,
) -> u32 {
    let mut index = 0;
    e.as_contract(pool_address, || {
        index = storage::push_res_list(e, underlying);
        storage::set_res_config(e, underlying, &config.encode());
        let mut data = data.clone();
        data.index = index;
        storage::set_res_data(e, underlying, &data);
    });
    index
}

/// A listed reserve wired to live token mocks, for aggregation tests.
pub(crate) struct TestReserve<'a> {
    pub underlying: Address,
    pub index: u32,
    pub b_token: MockScaledTokenClient<'a>,
    pub s_token: MockTokenClient<'a>,
    pub d_token: MockScaledTokenClient<'a>,
}

/// List a reserve backed by mock token contracts so scaled and plain
/// balances can be set per user.
pub(crate) fn create_reserve_with_tokens<'a>(
    e: &Env,
    pool_address: &Address,
    admin: &Address,
    config: &ReserveConfig,
) -> TestReserve<'a> {
    let underlying = Address::generate(e);
    let (b_token_id, b_token) = create_scaled_token(e);
    let (s_token_id, s_token) = create_token_contract(e, admin);
    let (d_token_id, d_token) = create_scaled_token(e);

    let (_, mut data) = default_reserve_meta(e);
    data.b_token = b_token_id;
    data.s_token = s_token_id;
    data.d_token = d_token_id;
    let index = create_reserve(e, pool_address, &underlying, config, &data);

    TestReserve {
        underlying,
        index,
        b_token,
        s_token,
        d_token,
    }
}
