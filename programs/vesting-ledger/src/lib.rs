//! Multi-asset vesting ledger: holds deposited value (lamports plus an
//! arbitrary set of fungible tokens) for a single beneficiary and releases
//! it along an owner-configured unlock schedule.

use anchor_lang::prelude::*;

pub mod constants;
pub mod error;
pub mod instructions;
pub mod state;

use instructions::*;

declare_id!("Fg6PaFpoGXkYsidMpWTK6W2BeZ7FEfcYkg476zPFsLnS");

#[program]
pub mod vesting_ledger {
    use super::*;

    /// Create the ledger for a beneficiary; the payer becomes the owner.
    pub fn initialize(ctx: Context<Initialize>, beneficiary: Pubkey) -> Result<()> {
        instructions::initialize(ctx, beneficiary)
    }

    /// Configure the unlock schedule (owner-only, exactly once). Valid
    /// shapes: start only, start + end, start + end + cliff rate.
    pub fn set_vesting_params(
        ctx: Context<SetVestingParams>,
        start_ts: i64,
        end_ts: Option<i64>,
        cliff_rate: Option<u64>,
    ) -> Result<()> {
        instructions::set_vesting_params(ctx, start_ts, end_ts, cliff_rate)
    }

    /// Fund the ledger (owner-only, exactly once, after the schedule is
    /// set). Token amounts are pulled through the (source, vault) account
    /// pairs in remaining accounts; `native_amount` lamports accompany
    /// them onto the ledger PDA.
    pub fn fund<'info>(
        ctx: Context<'_, '_, 'info, 'info, Fund<'info>>,
        amounts: Vec<u64>,
        native_amount: u64,
    ) -> Result<()> {
        instructions::fund(ctx, amounts, native_amount)
    }

    /// Advance the cached vested amount of one asset (or the native asset)
    /// to the current time.
    pub fn refresh_vesting(ctx: Context<RefreshVesting>, asset: Option<Pubkey>) -> Result<()> {
        instructions::refresh_vesting(ctx, asset)
    }

    /// `initial - vested` from the last refresh; does not refresh.
    pub fn get_unvested_balance(
        ctx: Context<GetUnvestedBalance>,
        asset: Option<Pubkey>,
    ) -> Result<u64> {
        instructions::get_unvested_balance(ctx, asset)
    }

    /// `vested - claimed`, optionally refreshing first.
    pub fn get_claimable_balance(
        ctx: Context<GetClaimableBalance>,
        asset: Option<Pubkey>,
        force_refresh: bool,
    ) -> Result<u64> {
        instructions::get_claimable_balance(ctx, asset, force_refresh)
    }

    /// Send the full claimable balance of one asset to the beneficiary.
    pub fn withdraw(
        ctx: Context<Withdraw>,
        asset: Option<Pubkey>,
        force_refresh: bool,
    ) -> Result<()> {
        instructions::withdraw(ctx, asset, force_refresh)
    }

    /// Emit the read-only accessor surface for one asset as an event.
    pub fn emit_ledger_quote(ctx: Context<EmitLedgerQuote>, asset: Option<Pubkey>) -> Result<()> {
        instructions::emit_ledger_quote(ctx, asset)
    }
}
