use anchor_lang::prelude::*;

use crate::constants::NATIVE_ASSET;
use crate::state::{AssetLedger, LedgerState};

/// Reports `initial - vested` from the last-refreshed cache; never
/// refreshes. Callers wanting fresh figures refresh first. Assets the
/// ledger does not track read as zero, matching an empty record.
pub fn get_unvested_balance(
    ctx: Context<GetUnvestedBalance>,
    asset: Option<Pubkey>,
) -> Result<u64> {
    let ledger = &ctx.accounts.ledger;
    let assets = &ctx.accounts.assets;
    let asset = asset.unwrap_or(NATIVE_ASSET);

    let unvested = assets
        .record(ledger.asset_count, &asset)
        .map(|r| r.unvested_amount())
        .unwrap_or(0);

    Ok(unvested)
}

#[derive(Accounts)]
pub struct GetUnvestedBalance<'info> {
    #[account(seeds = [b"ledger"], bump)]
    pub ledger: Account<'info, LedgerState>,

    #[account(
        seeds = [b"assets", ledger.key().as_ref()],
        bump
    )]
    pub assets: Box<Account<'info, AssetLedger>>,
}
