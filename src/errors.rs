use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
/// Error codes for the risk engine contract. Common errors are codes that match up with the
/// built-in contracts error reporting. Risk engine specific errors start at 1300.
pub enum RiskEngineError {
    // Common Errors
    InternalError = 1,
    AlreadyInitializedError = 3,
    UnauthorizedError = 4,

    // Risk Engine Errors (start at 1300)
    BadRequest = 1300,
    InvalidReserveMetadata = 1301,
    ReserveNotFound = 1302,
    MaxReservesExceeded = 1303,
    InvalidEModeCategory = 1304,

    // Oracle Errors
    StalePrice = 1310,
}
