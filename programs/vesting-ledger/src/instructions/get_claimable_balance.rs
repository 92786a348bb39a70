use anchor_lang::prelude::*;

use crate::constants::NATIVE_ASSET;
use crate::state::{AssetLedger, LedgerState};

/// Reports `vested - claimed` for the asset, refreshing the vesting cache
/// first when `force_refresh` is set.
pub fn get_claimable_balance(
    ctx: Context<GetClaimableBalance>,
    asset: Option<Pubkey>,
    force_refresh: bool,
) -> Result<u64> {
    let ledger = &ctx.accounts.ledger;
    let assets = &mut ctx.accounts.assets;
    let asset = asset.unwrap_or(NATIVE_ASSET);

    if force_refresh && ledger.schedule.is_set() && ledger.is_funded {
        if let Some(record) = assets.record_mut(ledger.asset_count, &asset) {
            let now = Clock::get()?.unix_timestamp;
            record.advance(&ledger.schedule, now)?;
        }
    }

    let claimable = assets
        .record(ledger.asset_count, &asset)
        .map(|r| r.claimable_amount())
        .unwrap_or(0);

    Ok(claimable)
}

#[derive(Accounts)]
pub struct GetClaimableBalance<'info> {
    #[account(seeds = [b"ledger"], bump)]
    pub ledger: Account<'info, LedgerState>,

    #[account(
        mut,
        seeds = [b"assets", ledger.key().as_ref()],
        bump
    )]
    pub assets: Box<Account<'info, AssetLedger>>,
}
