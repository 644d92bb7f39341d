#![no_std]

#[cfg(any(test, feature = "testutils"))]
extern crate std;

mod config;
mod constants;
mod contract;
mod dependencies;
mod errors;
mod math;
mod pool;
mod storage;
mod testutils;

pub use config::{ConfigWord, ReserveConfig, UserConfig};
pub use contract::{RiskEngineClient, RiskEngineContract, RiskEngineContractClient};
pub use errors::RiskEngineError;
pub use pool::{AccountData, Reserve};
pub use storage::{EModeCategory, ReserveData};
