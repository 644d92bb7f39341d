use soroban_sdk::{map, panic_with_error, unwrap::UnwrapOptimized, Address, Env, Map};

use sep_40_oracle::{Asset, PriceFeedClient};

use crate::{
    errors::RiskEngineError,
    storage::{self, PoolConfig},
};

use super::reserve::Reserve;

/// The pool context for a single invocation. Caches reserve snapshots and
/// oracle prices so one aggregation observes one consistent set of reads.
pub struct Pool {
    pub config: PoolConfig,
    pub reserves: Map<Address, Reserve>,
    prices: Map<Address, i128>,
}

impl Pool {
    /// Load the Pool from the ledger
    pub fn load(e: &Env) -> Self {
        let pool_config = storage::get_pool_config(e);
        Pool {
            config: pool_config,
            reserves: map![e],
            prices: map![e],
        }
    }

    /// Load a Reserve snapshot from the ledger. Returns a cached version if
    /// it exists.
    ///
    /// ### Arguments
    /// * asset - The address of the underlying asset
    pub fn load_reserve(&self, e: &Env, asset: &Address) -> Reserve {
        if let Some(reserve) = self.reserves.get(asset.clone()) {
            return reserve;
        }
        Reserve::load(e, asset)
    }

    /// Cache the reserve in the pool.
    ///
    /// ### Arguments
    /// * reserve - The loaded reserve
    pub fn cache_reserve(&mut self, reserve: Reserve) {
        self.reserves.set(reserve.asset.clone(), reserve);
    }

    /// Load a price from the Pool's oracle. Returns a cached version if one
    /// already exists. The value is not validated, a zero price passes
    /// through.
    ///
    /// ### Arguments
    /// * asset - The address of the underlying asset
    ///
    /// ### Panics
    /// If the price is stale
    pub fn load_price(&mut self, e: &Env, asset: &Address) -> i128 {
        if let Some(price) = self.prices.get(asset.clone()) {
            return price;
        }
        let oracle_client = PriceFeedClient::new(e, &self.config.oracle);
        let oracle_asset = Asset::Stellar(asset.clone());
        let price_data = oracle_client.lastprice(&oracle_asset).unwrap_optimized();
        if price_data.timestamp + 24 * 60 * 60 < e.ledger().timestamp() {
            panic_with_error!(e, RiskEngineError::StalePrice);
        }
        self.prices.set(asset.clone(), price_data.price);
        price_data.price
    }
}
