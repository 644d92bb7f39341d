//! Fixed point math over the three scales used by the risk engine: ray (27
//! decimals), wad (18 decimals) and 4 decimal percentages.
//!
//! All operations truncate (floor) and route through `SorobanFixedPoint`, so
//! intermediate products wider than i128 are carried in I256 rather than
//! causing a phantom overflow. A result that does not fit in i128 panics.

use soroban_fixed_point_math::SorobanFixedPoint;
use soroban_sdk::Env;

use crate::constants::{PERCENTAGE_FACTOR, RAY, WAD};

/// Multiply two ray scaled numbers, eg. a scaled balance by an accrual index
pub fn ray_mul(e: &Env, x: i128, y: i128) -> i128 {
    x.fixed_mul_floor(e, &y, &RAY)
}

/// Divide a ray scaled number by another, producing a ray scaled result
pub fn ray_div(e: &Env, x: i128, y: i128) -> i128 {
    x.fixed_div_floor(e, &y, &RAY)
}

/// Multiply two wad scaled numbers
pub fn wad_mul(e: &Env, x: i128, y: i128) -> i128 {
    x.fixed_mul_floor(e, &y, &WAD)
}

/// Divide a wad scaled number by another, producing a wad scaled result
pub fn wad_div(e: &Env, x: i128, y: i128) -> i128 {
    x.fixed_div_floor(e, &y, &WAD)
}

/// Take a 4 decimal percentage of a value, eg. `percent_mul(v, 8000)` is 80% of `v`
pub fn percent_mul(e: &Env, x: i128, percentage: i128) -> i128 {
    x.fixed_mul_floor(e, &percentage, &PERCENTAGE_FACTOR)
}

/// Divide a value by a 4 decimal percentage
pub fn percent_div(e: &Env, x: i128, percentage: i128) -> i128 {
    x.fixed_div_floor(e, &percentage, &PERCENTAGE_FACTOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_mul() {
        let e = Env::default();

        // 1000.0000000 units against a 1.1 ray index
        let index = 1_100_000_000_000_000_000_000_000_000;
        assert_eq!(ray_mul(&e, 1000_0000000, index), 1100_0000000);
        assert_eq!(ray_mul(&e, 0, index), 0);
        assert_eq!(ray_mul(&e, 1000_0000000, RAY), 1000_0000000);
    }

    #[test]
    fn test_ray_mul_phantom_overflow() {
        let e = Env::default();

        // product exceeds i128 before the scale down, result does not
        let index = 1_500_000_000_000_000_000_000_000_000;
        let amount = 1_000_000_000_000_000_000_000_000; // 1e24
        assert_eq!(ray_mul(&e, amount, index), 1_500_000_000_000_000_000_000_000);
    }

    #[test]
    #[should_panic]
    fn test_ray_mul_overflow_panics() {
        let e = Env::default();

        ray_mul(&e, i128::MAX, 2 * RAY);
    }

    #[test]
    fn test_ray_div() {
        let e = Env::default();

        assert_eq!(
            ray_div(&e, 850_0000000, 400_0000000),
            2_125_000_000_000_000_000_000_000_000
        );
        assert_eq!(ray_div(&e, 0, 400_0000000), 0);
    }

    #[test]
    fn test_wad_ops() {
        let e = Env::default();

        let half = 500_000_000_000_000_000;
        assert_eq!(wad_mul(&e, 10 * WAD, half), 5 * WAD);
        assert_eq!(wad_div(&e, 5 * WAD, 10 * WAD), half);
    }

    #[test]
    fn test_percent_mul() {
        let e = Env::default();

        assert_eq!(percent_mul(&e, 1000_0000000, 8000), 800_0000000);
        assert_eq!(percent_mul(&e, 1000_0000000, 0), 0);
        assert_eq!(percent_mul(&e, 1000_0000000, 1_0000), 1000_0000000);
        // truncates
        assert_eq!(percent_mul(&e, 99, 5000), 49);
    }

    #[test]
    fn test_percent_div() {
        let e = Env::default();

        assert_eq!(percent_div(&e, 800_0000000, 8000), 1000_0000000);
    }
}
