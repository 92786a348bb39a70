use anchor_lang::prelude::*;

use crate::constants::NATIVE_ASSET;
use crate::state::{AssetLedger, LedgerState};

/// The single choke point through which time passage is observed. Unset
/// schedules, unfunded ledgers and unknown assets are a no-op rather than
/// an error.
pub fn refresh_vesting(ctx: Context<RefreshVesting>, asset: Option<Pubkey>) -> Result<()> {
    let ledger = &ctx.accounts.ledger;
    let assets = &mut ctx.accounts.assets;
    let asset = asset.unwrap_or(NATIVE_ASSET);

    if !ledger.schedule.is_set() || !ledger.is_funded {
        return Ok(());
    }
    let Some(record) = assets.record_mut(ledger.asset_count, &asset) else {
        return Ok(());
    };

    let now = Clock::get()?.unix_timestamp;
    record.advance(&ledger.schedule, now)?;

    emit!(VestingRefreshed {
        asset,
        vested_amount: record.vested_amount,
        last_eval_ts: record.last_eval_ts,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct RefreshVesting<'info> {
    #[account(seeds = [b"ledger"], bump)]
    pub ledger: Account<'info, LedgerState>,

    #[account(
        mut,
        seeds = [b"assets", ledger.key().as_ref()],
        bump
    )]
    pub assets: Box<Account<'info, AssetLedger>>,
}

#[event]
pub struct VestingRefreshed {
    pub asset: Pubkey,
    pub vested_amount: u64,
    pub last_eval_ts: i64,
}
