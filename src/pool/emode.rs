use soroban_sdk::Env;

use crate::storage;

use super::pool::Pool;

/// The resolved risk parameters for a user's selected e-mode category.
/// Resolved once per aggregation and reused for every reserve in the loop.
pub struct EModeParams {
    pub category_id: u32,
    pub ltv: u32,
    pub liquidation_threshold: u32,
    /// The unified category price, 0 when the category has no price source.
    /// A zero price is never applied - matching reserves fall back to their
    /// per-asset oracle price.
    pub price: i128,
}

impl EModeParams {
    /// Resolve the parameters for a non-zero category id
    ///
    /// ### Arguments
    /// * pool - The pool context, used to resolve the unified price
    /// * category_id - The user's selected category id
    ///
    /// ### Panics
    /// If the category does not exist or the unified price is stale
    pub fn resolve(e: &Env, pool: &mut Pool, category_id: u32) -> EModeParams {
        let category = storage::get_emode_category(e, category_id);
        let price = match category.price_source {
            Some(source) => pool.load_price(e, &source),
            None => 0,
        };
        EModeParams {
            category_id,
            ltv: category.ltv,
            liquidation_threshold: category.liquidation_threshold,
            price,
        }
    }

    /// Checks if the category's overrides apply to a reserve declaring
    /// `reserve_category`. Category 0 never matches anything.
    ///
    /// ### Arguments
    /// * `reserve_category` - The category id the reserve declares
    pub fn applies_to(&self, reserve_category: u32) -> bool {
        self.category_id != 0 && self.category_id == reserve_category
    }
}
