use anchor_lang::prelude::*;

use crate::constants::NATIVE_ASSET;
use crate::state::{AssetLedger, AssetRecord, LedgerState};

/// Read-only accessor surface, emitted as one event: schedule parameters,
/// lifecycle flags and the cached balance figures for one asset. Untracked
/// assets quote as an empty record.
pub fn emit_ledger_quote(ctx: Context<EmitLedgerQuote>, asset: Option<Pubkey>) -> Result<()> {
    let ledger = &ctx.accounts.ledger;
    let assets = &ctx.accounts.assets;
    let asset = asset.unwrap_or(NATIVE_ASSET);

    let record = assets
        .record(ledger.asset_count, &asset)
        .copied()
        .unwrap_or_else(|| AssetRecord::new(asset, 0));

    emit!(LedgerQuote {
        asset,
        vesting_params_set: ledger.schedule.is_set(),
        is_funded: ledger.is_funded,
        unlock_start_ts: ledger.schedule.unlock_start_ts().unwrap_or(0),
        unlock_end_ts: ledger.schedule.unlock_end_ts().unwrap_or(0),
        vesting_coefficient: ledger.schedule.cliff_rate().unwrap_or(0),
        vesting_slope: record.vesting_slope,
        initial_amount: record.initial_amount,
        vested_amount: record.vested_amount,
        claimed_amount: record.claimed_amount,
        claimable_amount: record.claimable_amount(),
        unvested_amount: record.unvested_amount(),
    });

    Ok(())
}

#[derive(Accounts)]
pub struct EmitLedgerQuote<'info> {
    #[account(seeds = [b"ledger"], bump)]
    pub ledger: Account<'info, LedgerState>,

    #[account(
        seeds = [b"assets", ledger.key().as_ref()],
        bump
    )]
    pub assets: Box<Account<'info, AssetLedger>>,
}

#[event]
pub struct LedgerQuote {
    pub asset: Pubkey,
    pub vesting_params_set: bool,
    pub is_funded: bool,
    pub unlock_start_ts: i64,
    pub unlock_end_ts: i64,
    pub vesting_coefficient: u64,
    pub vesting_slope: u64,
    pub initial_amount: u64,
    pub vested_amount: u64,
    pub claimed_amount: u64,
    pub claimable_amount: u64,
    pub unvested_amount: u64,
}
