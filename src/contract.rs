use crate::{
    config::ReserveConfig,
    pool::{self, AccountData, Pool, Reserve},
    storage::{self, EModeCategory, ReserveData},
};
use soroban_sdk::{contract, contractclient, contractimpl, Address, Env, Symbol, Vec};

/// ### RiskEngine
///
/// The risk accounting core of a collateralized lending pool.
#[contract]
pub struct RiskEngineContract;

#[contractclient(name = "RiskEngineClient")]
pub trait RiskEngine {
    /// Initialize the risk engine
    ///
    /// ### Arguments
    /// * `admin` - The Address for the admin
    /// * `oracle` - The contract address of the oracle
    ///
    /// ### Panics
    /// If the contract is already initialized
    fn initialize(e: Env, admin: Address, oracle: Address);

    /// (Admin only) Set a new address as the admin of this pool
    ///
    /// ### Arguments
    /// * `new_admin` - The new admin address
    ///
    /// ### Panics
    /// If the caller is not the admin
    fn set_admin(e: Env, new_admin: Address);

    /// (Admin only) List a reserve in the pool. Returns the reserve's index.
    ///
    /// ### Arguments
    /// * `asset` - The underlying asset to add as a reserve
    /// * `b_token` - The interest bearing receipt token for the reserve
    /// * `s_token` - The fixed rate debt token for the reserve
    /// * `d_token` - The variable rate debt token for the reserve
    /// * `rate_strategy` - The rate strategy contract accruing the reserve
    /// * `config` - The ReserveConfig for the reserve
    ///
    /// ### Panics
    /// If the caller is not the admin, the reserve is already listed, the
    /// config is invalid, or the reserve list is full
    #[allow(clippy::too_many_arguments)]
    fn init_reserve(
        e: Env,
        asset: Address,
        b_token: Address,
        s_token: Address,
        d_token: Address,
        rate_strategy: Address,
        config: ReserveConfig,
    ) -> u32;

    /// (Admin only) Update a reserve's configuration. The reserve's index
    /// and token addresses cannot change.
    ///
    /// ### Arguments
    /// * `asset` - The underlying asset of the reserve
    /// * `config` - The new ReserveConfig for the reserve
    ///
    /// ### Panics
    /// If the caller is not the admin, the reserve is not listed, or the
    /// config is invalid
    fn update_reserve(e: Env, asset: Address, config: ReserveConfig);

    /// (Admin only) Write fresh accrual state for a reserve on behalf of
    /// the accrual engine. Identity fields in `data` are ignored.
    ///
    /// ### Arguments
    /// * `asset` - The underlying asset of the reserve
    /// * `data` - The new accrual state, indices and rates in 27 decimals
    ///
    /// ### Panics
    /// If the caller is not the admin, the reserve is not listed, or an
    /// index is not positive
    fn sync_reserve_data(e: Env, asset: Address, data: ReserveData);

    /// (Admin only) Create or replace an e-mode category
    ///
    /// ### Arguments
    /// * `category_id` - The id of the category, 1-255
    /// * `category` - The category parameters
    ///
    /// ### Panics
    /// If the caller is not the admin or the category is invalid
    fn set_emode_category(e: Env, category_id: u32, category: EModeCategory);

    /// Opt the user into an e-mode category, or out with id 0
    ///
    /// ### Arguments
    /// * `user` - The address of the user
    /// * `category_id` - The category id to select
    ///
    /// ### Panics
    /// If the user does not authorize the call or a non-zero id names no
    /// existing category
    fn set_user_emode(e: Env, user: Address, category_id: u32);

    /// (Admin only) Flip the user's collateral participation bit for an
    /// asset's reserve
    ///
    /// ### Arguments
    /// * `user` - The address of the user
    /// * `asset` - The underlying asset of the reserve
    /// * `enabled` - Whether the reserve counts as collateral for the user
    ///
    /// ### Panics
    /// If the caller is not the admin or the reserve is not listed
    fn set_collateral(e: Env, user: Address, asset: Address, enabled: bool);

    /// (Admin only) Flip the user's borrowing participation bit for an
    /// asset's reserve
    ///
    /// ### Arguments
    /// * `user` - The address of the user
    /// * `asset` - The underlying asset of the reserve
    /// * `enabled` - Whether the user is borrowing the reserve
    ///
    /// ### Panics
    /// If the caller is not the admin or the reserve is not listed
    fn set_borrowing(e: Env, user: Address, asset: Address, enabled: bool);

    /// Fetch the aggregate risk position for a user
    ///
    /// ### Arguments
    /// * `user` - The address of the user
    fn get_account_data(e: Env, user: Address) -> AccountData;

    /// Fetch the health factor for a user, 27 decimals, `i128::MAX` when
    /// debt free
    ///
    /// ### Arguments
    /// * `user` - The address of the user
    fn get_health_factor(e: Env, user: Address) -> i128;

    /// Fetch the additional base currency value the user can borrow
    ///
    /// ### Arguments
    /// * `user` - The address of the user
    fn get_available_borrows(e: Env, user: Address) -> i128;

    /// Fetch the decoded snapshot of a listed reserve
    ///
    /// ### Arguments
    /// * `asset` - The underlying asset of the reserve
    fn get_reserve(e: Env, asset: Address) -> Reserve;

    /// Fetch an e-mode category
    ///
    /// ### Arguments
    /// * `category_id` - The id of the category
    fn get_emode_category(e: Env, category_id: u32) -> EModeCategory;

    /// Fetch the e-mode category id a user has opted into, 0 if none
    ///
    /// ### Arguments
    /// * `user` - The address of the user
    fn get_user_emode(e: Env, user: Address) -> u32;

    /// Fetch the list of reserve underlying addresses, in index order
    fn get_reserve_list(e: Env) -> Vec<Address>;
}

#[contractimpl]
impl RiskEngine for RiskEngineContract {
    fn initialize(e: Env, admin: Address, oracle: Address) {
        storage::extend_instance(&e);
        pool::execute_initialize(&e, &admin, &oracle);

        e.events()
            .publish((Symbol::new(&e, "initialize"), admin), oracle);
    }

    fn set_admin(e: Env, new_admin: Address) {
        storage::extend_instance(&e);
        let admin = storage::get_admin(&e);
        admin.require_auth();

        storage::set_admin(&e, &new_admin);

        e.events()
            .publish((Symbol::new(&e, "set_admin"), admin), new_admin);
    }

    fn init_reserve(
        e: Env,
        asset: Address,
        b_token: Address,
        s_token: Address,
        d_token: Address,
        rate_strategy: Address,
        config: ReserveConfig,
    ) -> u32 {
        storage::extend_instance(&e);
        let admin = storage::get_admin(&e);
        admin.require_auth();

        let index = pool::initialize_reserve(
            &e,
            &asset,
            &b_token,
            &s_token,
            &d_token,
            &rate_strategy,
            &config,
        );

        e.events()
            .publish((Symbol::new(&e, "init_reserve"), admin), (asset, index));
        index
    }

    fn update_reserve(e: Env, asset: Address, config: ReserveConfig) {
        storage::extend_instance(&e);
        let admin = storage::get_admin(&e);
        admin.require_auth();

        pool::execute_update_reserve(&e, &asset, &config);

        e.events()
            .publish((Symbol::new(&e, "update_reserve"), admin), asset);
    }

    fn sync_reserve_data(e: Env, asset: Address, data: ReserveData) {
        storage::extend_instance(&e);
        let admin = storage::get_admin(&e);
        admin.require_auth();

        pool::execute_sync_reserve_data(&e, &asset, &data);

        e.events()
            .publish((Symbol::new(&e, "sync_reserve_data"), admin), asset);
    }

    fn set_emode_category(e: Env, category_id: u32, category: EModeCategory) {
        storage::extend_instance(&e);
        let admin = storage::get_admin(&e);
        admin.require_auth();

        pool::execute_set_emode_category(&e, category_id, &category);

        e.events()
            .publish((Symbol::new(&e, "set_emode_category"), admin), category_id);
    }

    fn set_user_emode(e: Env, user: Address, category_id: u32) {
        storage::extend_instance(&e);
        user.require_auth();

        pool::execute_set_user_emode(&e, &user, category_id);

        e.events()
            .publish((Symbol::new(&e, "set_user_emode"), user), category_id);
    }

    fn set_collateral(e: Env, user: Address, asset: Address, enabled: bool) {
        storage::extend_instance(&e);
        let admin = storage::get_admin(&e);
        admin.require_auth();

        pool::execute_set_collateral(&e, &user, &asset, enabled);

        e.events().publish(
            (Symbol::new(&e, "set_collateral"), admin),
            (user, asset, enabled),
        );
    }

    fn set_borrowing(e: Env, user: Address, asset: Address, enabled: bool) {
        storage::extend_instance(&e);
        let admin = storage::get_admin(&e);
        admin.require_auth();

        pool::execute_set_borrowing(&e, &user, &asset, enabled);

        e.events().publish(
            (Symbol::new(&e, "set_borrowing"), admin),
            (user, asset, enabled),
        );
    }

    /********* View Functions **********/

    fn get_account_data(e: Env, user: Address) -> AccountData {
        let mut pool = Pool::load(&e);
        AccountData::calculate(&e, &mut pool, &user)
    }

    fn get_health_factor(e: Env, user: Address) -> i128 {
        let mut pool = Pool::load(&e);
        AccountData::calculate(&e, &mut pool, &user).health_factor
    }

    fn get_available_borrows(e: Env, user: Address) -> i128 {
        let mut pool = Pool::load(&e);
        AccountData::calculate(&e, &mut pool, &user).available_borrows(&e)
    }

    fn get_reserve(e: Env, asset: Address) -> Reserve {
        Reserve::load(&e, &asset)
    }

    fn get_emode_category(e: Env, category_id: u32) -> EModeCategory {
        storage::get_emode_category(&e, category_id)
    }

    fn get_user_emode(e: Env, user: Address) -> u32 {
        storage::get_user_emode(&e, &user)
    }

    fn get_reserve_list(e: Env) -> Vec<Address> {
        storage::get_res_list(&e)
    }
}
