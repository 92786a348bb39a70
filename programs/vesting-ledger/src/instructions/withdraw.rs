use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::constants::NATIVE_ASSET;
use crate::error::LedgerError;
use crate::state::{AssetLedger, LedgerState};

/// Withdraw the full claimable balance of one asset to the beneficiary.
/// For token assets the vault and the beneficiary's token account must be
/// supplied; for the native asset both are left out and lamports move
/// straight off the ledger PDA.
pub fn withdraw(
    ctx: Context<Withdraw>,
    asset: Option<Pubkey>,
    force_refresh: bool,
) -> Result<()> {
    let ledger_bump = ctx.bumps.ledger;
    let ledger_ai = ctx.accounts.ledger.to_account_info();

    let ledger = &ctx.accounts.ledger;
    require_keys_eq!(
        ctx.accounts.beneficiary.key(),
        ledger.beneficiary,
        LedgerError::NotAuthorizedBeneficiary
    );

    let asset = asset.unwrap_or(NATIVE_ASSET);
    let schedule = ledger.schedule;
    let assets = &mut ctx.accounts.assets;
    let record = assets
        .record_mut(ledger.asset_count, &asset)
        .ok_or(LedgerError::NothingClaimable)?;

    if force_refresh {
        let now = Clock::get()?.unix_timestamp;
        record.advance(&schedule, now)?;
    }

    // Commit the claim before any value leaves the ledger; a reentrant
    // call arriving mid-transfer observes a zero claimable balance.
    let amount = record.claim_all()?;
    let claimed_total = record.claimed_amount;

    if asset == NATIVE_ASSET {
        let beneficiary_ai = ctx.accounts.beneficiary.to_account_info();
        let debited = ledger_ai
            .lamports()
            .checked_sub(amount)
            .ok_or(LedgerError::TransferFailed)?;
        let credited = beneficiary_ai
            .lamports()
            .checked_add(amount)
            .ok_or(LedgerError::TransferFailed)?;
        **ledger_ai.try_borrow_mut_lamports()? = debited;
        **beneficiary_ai.try_borrow_mut_lamports()? = credited;
    } else {
        let vault = ctx
            .accounts
            .vault
            .as_ref()
            .ok_or(LedgerError::InvalidTokenAccount)?;
        let destination = ctx
            .accounts
            .beneficiary_token_account
            .as_ref()
            .ok_or(LedgerError::InvalidTokenAccount)?;
        require_keys_eq!(vault.mint, asset, LedgerError::InvalidTokenMint);
        require_keys_eq!(destination.mint, asset, LedgerError::InvalidTokenMint);
        require_keys_eq!(vault.owner, ledger.key(), LedgerError::InvalidTokenAccount);
        require_keys_eq!(
            destination.owner,
            ledger.beneficiary,
            LedgerError::InvalidTokenAccount
        );

        let signer_seeds: &[&[&[u8]]] = &[&[b"ledger", &[ledger_bump]]];
        token::transfer(
            CpiContext::new_with_signer(
                ctx.accounts.token_program.to_account_info(),
                Transfer {
                    from: vault.to_account_info(),
                    to: destination.to_account_info(),
                    authority: ledger_ai,
                },
                signer_seeds,
            ),
            amount,
        )?;
    }

    emit!(FundsWithdrawn {
        beneficiary: ledger.beneficiary,
        asset,
        amount,
        claimed_total,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct Withdraw<'info> {
    #[account(mut, seeds = [b"ledger"], bump)]
    pub ledger: Account<'info, LedgerState>,

    #[account(
        mut,
        seeds = [b"assets", ledger.key().as_ref()],
        bump
    )]
    pub assets: Box<Account<'info, AssetLedger>>,

    #[account(mut)]
    pub beneficiary: Signer<'info>,

    #[account(mut)]
    pub vault: Option<Account<'info, TokenAccount>>,

    #[account(mut)]
    pub beneficiary_token_account: Option<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
}

#[event]
pub struct FundsWithdrawn {
    pub beneficiary: Pubkey,
    pub asset: Pubkey,
    pub amount: u64,
    pub claimed_total: u64,
}
