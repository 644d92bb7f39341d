use cast::i128;
use sep_41_token::TokenClient;
use soroban_fixed_point_math::SorobanFixedPoint;
use soroban_sdk::{contracttype, Address, Env};

use crate::{
    constants::HEALTH_FACTOR_MAX, dependencies::ScaledTokenClient, math, storage,
};

use super::{emode::EModeParams, pool::Pool};

/// A user's aggregate risk position. Totals are in base currency units
/// (the oracle's decimals), averages are 4 decimal percentages weighted by
/// collateral value, and the health factor is expressed in 27 decimals with
/// `i128::MAX` standing in for a debt-free position.
///
/// Computed on demand, never persisted.
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct AccountData {
    pub total_collateral_base: i128,
    pub total_debt_base: i128,
    pub avg_ltv: i128,
    pub avg_liquidation_threshold: i128,
    pub health_factor: i128,
    pub has_zero_ltv_collateral: bool,
}

impl AccountData {
    /// Aggregate the user's position over every reserve they participate in.
    ///
    /// A user with an empty participation bitmap short circuits without
    /// touching reserves or the oracle. Otherwise the reserve list is walked
    /// in index order, skipping reserves the user neither supplies nor
    /// borrows, and each participating reserve contributes a collateral leg,
    /// a debt leg, or both.
    ///
    /// ### Arguments
    /// * pool - The pool context to read reserves and prices through
    /// * user - The address of the user
    ///
    /// ### Panics
    /// If an oracle or token call fails, a price is stale, or a total
    /// overflows i128
    pub fn calculate(e: &Env, pool: &mut Pool, user: &Address) -> AccountData {
        let user_config = storage::get_user_config(e, user);
        if user_config.is_empty() {
            return AccountData {
                total_collateral_base: 0,
                total_debt_base: 0,
                avg_ltv: 0,
                avg_liquidation_threshold: 0,
                health_factor: HEALTH_FACTOR_MAX,
                has_zero_ltv_collateral: false,
            };
        }

        // resolve the user's e-mode once and reuse it across the loop
        let user_category = storage::get_user_emode(e, user);
        let emode = if user_category != 0 {
            Some(EModeParams::resolve(e, pool, user_category))
        } else {
            None
        };

        let res_list = storage::get_res_list(e);
        let mut total_collateral_base: i128 = 0;
        let mut total_debt_base: i128 = 0;
        let mut weighted_ltv: i128 = 0;
        let mut weighted_threshold: i128 = 0;
        let mut has_zero_ltv_collateral = false;

        for i in 0..res_list.len() {
            if !user_config.is_using_as_collateral_or_borrowing(i) {
                continue;
            }
            let asset = match res_list.get(i) {
                Some(asset) => asset,
                None => continue,
            };
            let reserve = pool.load_reserve(e, &asset);

            // the unified e-mode price only overrides a matching reserve,
            // and only when it resolved to a non-zero value
            let price = match &emode {
                Some(params) if params.applies_to(reserve.config.emode_category) && params.price != 0 => {
                    params.price
                }
                _ => pool.load_price(e, &asset),
            };

            if reserve.config.liquidation_threshold != 0 && user_config.is_using_as_collateral(i) {
                let scaled_balance =
                    ScaledTokenClient::new(e, &reserve.b_token).scaled_balance(user);
                let balance = reserve.to_underlying_supply(e, scaled_balance);
                let value = price.fixed_mul_floor(e, &balance, &reserve.scalar);
                total_collateral_base += value;

                let (ltv, threshold) = match &emode {
                    Some(params) if params.applies_to(reserve.config.emode_category) => {
                        (params.ltv, params.liquidation_threshold)
                    }
                    _ => (reserve.config.ltv, reserve.config.liquidation_threshold),
                };
                if ltv != 0 {
                    weighted_ltv += value * i128(ltv);
                } else {
                    has_zero_ltv_collateral = true;
                }
                weighted_threshold += value * i128(threshold);
            }

            if user_config.is_borrowing(i) {
                let stable_debt = TokenClient::new(e, &reserve.s_token).balance(user);
                let scaled_debt = ScaledTokenClient::new(e, &reserve.d_token).scaled_balance(user);
                let debt = stable_debt + reserve.to_underlying_debt(e, scaled_debt);
                total_debt_base += price.fixed_mul_floor(e, &debt, &reserve.scalar);
            }

            pool.cache_reserve(reserve);
        }

        let (avg_ltv, avg_liquidation_threshold) = if total_collateral_base != 0 {
            (
                weighted_ltv / total_collateral_base,
                weighted_threshold / total_collateral_base,
            )
        } else {
            (0, 0)
        };

        let health_factor = if total_debt_base == 0 {
            HEALTH_FACTOR_MAX
        } else {
            math::ray_div(
                e,
                math::percent_mul(e, total_collateral_base, avg_liquidation_threshold),
                total_debt_base,
            )
        };

        AccountData {
            total_collateral_base,
            total_debt_base,
            avg_ltv,
            avg_liquidation_threshold,
            health_factor,
            has_zero_ltv_collateral,
        }
    }

    /// The additional base currency value the user could borrow against
    /// their collateral, clamped at zero.
    pub fn available_borrows(&self, e: &Env) -> i128 {
        let capacity = math::percent_mul(e, self.total_collateral_base, self.avg_ltv);
        if capacity <= self.total_debt_base {
            0
        } else {
            capacity - self.total_debt_base
        }
    }
}
