use anchor_lang::prelude::*;
use anchor_lang::system_program;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::constants::NATIVE_ASSET;
use crate::error::LedgerError;
use crate::state::{AssetLedger, AssetRecord, LedgerState};

/// One-shot funding. Remaining accounts carry one (source, vault) token
/// account pair per entry in `amounts`; the vault for each mint must be a
/// token account owned by the ledger PDA, created ahead of this call.
/// Everything happens in one instruction, so a failed transfer aborts the
/// whole funding with no records created.
pub fn fund<'info>(
    ctx: Context<'_, '_, 'info, 'info, Fund<'info>>,
    amounts: Vec<u64>,
    native_amount: u64,
) -> Result<()> {
    let ledger = &mut ctx.accounts.ledger;
    require_keys_eq!(
        ctx.accounts.owner.key(),
        ledger.owner,
        LedgerError::NotAuthorizedOwner
    );
    ledger.ensure_can_fund()?;

    let pairs = ctx.remaining_accounts;
    require!(pairs.len() == amounts.len() * 2, LedgerError::LengthMismatch);

    let ledger_key = ledger.key();
    let assets = &mut ctx.accounts.assets;
    let mut count = ledger.asset_count;

    for (i, amount) in amounts.iter().copied().enumerate() {
        require!(amount > 0, LedgerError::InvalidConfig);

        let source_ai = &pairs[i * 2];
        let vault_ai = &pairs[i * 2 + 1];
        let source: Account<TokenAccount> =
            Account::try_from(source_ai).map_err(|_| LedgerError::InvalidTokenAccount)?;
        let vault: Account<TokenAccount> =
            Account::try_from(vault_ai).map_err(|_| LedgerError::InvalidTokenAccount)?;

        require_keys_eq!(
            source.owner,
            ctx.accounts.owner.key(),
            LedgerError::InvalidTokenAccount
        );
        require_keys_eq!(vault.owner, ledger_key, LedgerError::InvalidTokenAccount);
        require_keys_eq!(vault.mint, source.mint, LedgerError::InvalidTokenMint);
        require!(source.mint != NATIVE_ASSET, LedgerError::InvalidTokenMint);

        token::transfer(
            CpiContext::new(
                ctx.accounts.token_program.to_account_info(),
                Transfer {
                    from: source_ai.clone(),
                    to: vault_ai.clone(),
                    authority: ctx.accounts.owner.to_account_info(),
                },
            ),
            amount,
        )?;

        assets.push(&mut count, AssetRecord::new(source.mint, amount))?;
    }

    if native_amount > 0 {
        system_program::transfer(
            CpiContext::new(
                ctx.accounts.system_program.to_account_info(),
                system_program::Transfer {
                    from: ctx.accounts.owner.to_account_info(),
                    to: ledger.to_account_info(),
                },
            ),
            native_amount,
        )?;
    }
    // The native balance is a record like any other, possibly zero.
    assets.push(&mut count, AssetRecord::new(NATIVE_ASSET, native_amount))?;

    ledger.asset_count = count;
    ledger.is_funded = true;

    emit!(LedgerFunded {
        owner: ledger.owner,
        asset_count: count,
        native_amount,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct Fund<'info> {
    #[account(mut, seeds = [b"ledger"], bump)]
    pub ledger: Account<'info, LedgerState>,

    #[account(
        mut,
        seeds = [b"assets", ledger.key().as_ref()],
        bump
    )]
    pub assets: Box<Account<'info, AssetLedger>>,

    #[account(mut)]
    pub owner: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

#[event]
pub struct LedgerFunded {
    pub owner: Pubkey,
    pub asset_count: u8,
    pub native_amount: u64,
}
