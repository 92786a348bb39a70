use anchor_lang::prelude::*;

use crate::constants::MAX_ASSETS;
use crate::error::LedgerError;
use crate::state::{AssetLedger, AssetRecord, LedgerState, UnlockSchedule};

pub fn initialize(ctx: Context<Initialize>, beneficiary: Pubkey) -> Result<()> {
    require!(beneficiary != Pubkey::default(), LedgerError::InvalidPubkey);
    require!(
        beneficiary != ctx.accounts.ledger.key(),
        LedgerError::InvalidConfig
    );
    require!(beneficiary != crate::ID, LedgerError::InvalidConfig);

    let ledger = &mut ctx.accounts.ledger;
    ledger.owner = ctx.accounts.owner.key();
    ledger.beneficiary = beneficiary;
    ledger.schedule = UnlockSchedule::Unset;
    ledger.is_funded = false;
    ledger.asset_count = 0;

    let assets = &mut ctx.accounts.assets;
    assets.entries = [AssetRecord::default(); MAX_ASSETS];

    emit!(LedgerInitialized {
        owner: ledger.owner,
        beneficiary,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct Initialize<'info> {
    #[account(
        init,
        payer = owner,
        space = 8 + LedgerState::SIZE,
        seeds = [b"ledger"],
        bump
    )]
    pub ledger: Account<'info, LedgerState>,

    #[account(
        init,
        payer = owner,
        space = AssetLedger::space(),
        seeds = [b"assets", ledger.key().as_ref()],
        bump
    )]
    pub assets: Box<Account<'info, AssetLedger>>,

    #[account(mut)]
    pub owner: Signer<'info>,

    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

#[event]
pub struct LedgerInitialized {
    pub owner: Pubkey,
    pub beneficiary: Pubkey,
}
