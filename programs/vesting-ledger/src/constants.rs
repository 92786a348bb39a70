//! Program-wide constants.

use anchor_lang::prelude::Pubkey;

/// Max assets tracked by one ledger (funded token mints plus the native
/// lamport record).
pub const MAX_ASSETS: usize = 8;

/// Sentinel asset id under which the native lamport balance is recorded.
/// Keeping the native balance in an ordinary record means every balance
/// path is written once and applied uniformly.
pub const NATIVE_ASSET: Pubkey = Pubkey::new_from_array([0u8; 32]);
