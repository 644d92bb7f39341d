mod word;
pub use word::ConfigWord;

mod reserve;
pub use reserve::ReserveConfig;

mod user;
pub use user::UserConfig;
