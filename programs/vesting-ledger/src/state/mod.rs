pub mod ledger;
pub mod schedule;

pub use ledger::*;
pub use schedule::*;
