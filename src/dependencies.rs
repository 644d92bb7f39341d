use soroban_sdk::{contractclient, Address, Env};

/// Client for the interest bearing and debt token contracts backing a
/// reserve. Both report a user's scaled balance, the balance recorded at
/// supply or borrow time, before any accrual index is applied.
#[contractclient(name = "ScaledTokenClient")]
pub trait ScaledToken {
    /// Fetch the scaled balance of `id`
    fn scaled_balance(e: Env, id: Address) -> i128;
}
