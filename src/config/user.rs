// Adapted from: https://github.com/aave/aave-v3-core/blob/master/contracts/protocol/libraries/configuration/UserConfiguration.sol

use soroban_sdk::contracttype;

use super::word::ConfigWord;

/// Packs which reserves a user participates in and how, two bits per
/// reserve id from LSB to MSB:
///
/// LSB -> 0 / 1 = (borrowing flag) not borrowing / borrowing the reserve\
/// MSB -> 0 / 1 = (collateral flag) not supplying / supplying as collateral
///
/// The pair for reserve id `i` starts at bit `2 * i`. Supports 128
/// indexable reserves; bits above the last listed reserve are never set.
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct UserConfig {
    pub config: ConfigWord,
}

impl UserConfig {
    pub fn empty() -> UserConfig {
        UserConfig {
            config: ConfigWord::zero(),
        }
    }

    /// True if the user has no collateral or borrow position on any reserve
    pub fn is_empty(&self) -> bool {
        self.config.is_zero()
    }

    /// Checks if the user is borrowing the reserve
    ///
    /// ### Arguments
    /// * `res_index` - The index of the reserve to check
    pub fn is_borrowing(&self, res_index: u32) -> bool {
        self.config.get_flag(2 * res_index)
    }

    /// Checks if the user supplies the reserve as collateral
    ///
    /// ### Arguments
    /// * `res_index` - The index of the reserve to check
    pub fn is_using_as_collateral(&self, res_index: u32) -> bool {
        self.config.get_flag(2 * res_index + 1)
    }

    /// Checks if the reserve contributes to the user's risk position at all
    ///
    /// ### Arguments
    /// * `res_index` - The index of the reserve to check
    pub fn is_using_as_collateral_or_borrowing(&self, res_index: u32) -> bool {
        self.config.get_bits(2 * res_index, 2) != 0
    }

    /// Set the borrowing flag for the reserve at `res_index`
    pub fn set_borrowing(&mut self, res_index: u32, borrowing: bool) {
        self.config.set_flag(2 * res_index, borrowing);
    }

    /// Set the collateral flag for the reserve at `res_index`
    pub fn set_using_as_collateral(&mut self, res_index: u32, collateral: bool) {
        self.config.set_flag(2 * res_index + 1, collateral);
    }
}
