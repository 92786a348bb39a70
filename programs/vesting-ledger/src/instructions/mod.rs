pub mod emit_ledger_quote;
pub mod fund;
pub mod get_claimable_balance;
pub mod get_unvested_balance;
pub mod initialize;
pub mod refresh_vesting;
pub mod set_vesting_params;
pub mod withdraw;

pub use emit_ledger_quote::*;
pub use fund::*;
pub use get_claimable_balance::*;
pub use get_unvested_balance::*;
pub use initialize::*;
pub use refresh_vesting::*;
pub use set_vesting_params::*;
pub use withdraw::*;
