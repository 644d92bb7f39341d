use soroban_sdk::{contracttype, Address, Env};

use crate::{config::ReserveConfig, math, storage};

/// A read-only snapshot of a listed reserve, joining the decoded
/// configuration with the accrual state written by the accrual engine.
#[derive(Clone)]
#[contracttype]
pub struct Reserve {
    pub asset: Address,      // the underlying asset address
    pub index: u32,          // the reserve index in the pool
    pub config: ReserveConfig,
    pub b_token: Address,    // the interest bearing receipt token
    pub s_token: Address,    // the fixed rate debt token
    pub d_token: Address,    // the variable rate debt token
    pub scalar: i128,        // one whole token of the underlying, 10^decimals
    pub supply_index: i128,  // cumulative supply accrual index, 27 decimals
    pub borrow_index: i128,  // cumulative variable borrow accrual index, 27 decimals
}

impl Reserve {
    /// Load a Reserve snapshot from the ledger.
    ///
    /// **NOTE**: This function is not cached, and should be called from the Pool.
    ///
    /// ### Arguments
    /// * asset - The address of the underlying asset
    ///
    /// ### Panics
    /// Panics if the asset is not a listed reserve
    pub fn load(e: &Env, asset: &Address) -> Reserve {
        let config = ReserveConfig::decode(&storage::get_res_config(e, asset));
        let data = storage::get_res_data(e, asset);
        Reserve {
            asset: asset.clone(),
            index: data.index,
            scalar: 10i128.pow(config.decimals),
            config,
            b_token: data.b_token,
            s_token: data.s_token,
            d_token: data.d_token,
            supply_index: data.supply_index,
            borrow_index: data.borrow_index,
        }
    }

    /// The cumulative income accrued per unit of supplied principal, 27 decimals
    pub fn normalized_income(&self) -> i128 {
        self.supply_index
    }

    /// The cumulative interest accrued per unit of variable debt, 27 decimals
    pub fn normalized_debt(&self) -> i128 {
        self.borrow_index
    }

    /// Convert a scaled b_token balance to underlying tokens
    ///
    /// ### Arguments
    /// * `scaled_balance` - The scaled balance to convert
    pub fn to_underlying_supply(&self, e: &Env, scaled_balance: i128) -> i128 {
        math::ray_mul(e, scaled_balance, self.normalized_income())
    }

    /// Convert a scaled d_token balance to underlying tokens
    ///
    /// ### Arguments
    /// * `scaled_balance` - The scaled balance to convert
    pub fn to_underlying_debt(&self, e: &Env, scaled_balance: i128) -> i128 {
        math::ray_mul(e, scaled_balance, self.normalized_debt())
    }
}
