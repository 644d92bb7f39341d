mod account;
pub use account::AccountData;

mod config;
pub use config::{
    execute_initialize, execute_set_borrowing, execute_set_collateral, execute_set_emode_category,
    execute_set_user_emode, execute_sync_reserve_data, execute_update_reserve, initialize_reserve,
};

mod emode;
pub use emode::EModeParams;

#[allow(clippy::module_inception)]
mod pool;
pub use pool::Pool;

mod reserve;
pub use reserve::Reserve;
