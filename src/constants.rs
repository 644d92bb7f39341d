/********** Numbers **********/

/// Fixed-point scalar for 27 decimal numbers, used for accrual indices,
/// rates and the health factor
pub const RAY: i128 = 1_000_000_000_000_000_000_000_000_000;

/// Fixed-point scalar for 18 decimal numbers, used for token amounts
pub const WAD: i128 = 1_000_000_000_000_000_000;

/// Fixed-point scalar for 4 decimal percentages, 1_0000 == 100.00%
pub const PERCENTAGE_FACTOR: i128 = 1_0000;

/// Health factor reported for an account with no debt. An account at this
/// value can never be liquidated - consumers must treat it as "no debt",
/// not as a number to do arithmetic against.
pub const HEALTH_FACTOR_MAX: i128 = i128::MAX;

/// The maximum number of reserves the pool can list. Each reserve uses a
/// 2 bit pair in the 256 bit user configuration word.
pub const MAX_RESERVES: u32 = 128;
