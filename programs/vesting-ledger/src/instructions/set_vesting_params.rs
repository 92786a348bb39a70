use anchor_lang::prelude::*;

use crate::error::LedgerError;
use crate::state::LedgerState;

/// One instruction covers all three parameter arities of the unlock
/// schedule; argument-shape dispatch is the client's concern.
pub fn set_vesting_params(
    ctx: Context<SetVestingParams>,
    start_ts: i64,
    end_ts: Option<i64>,
    cliff_rate: Option<u64>,
) -> Result<()> {
    let ledger = &mut ctx.accounts.ledger;
    require_keys_eq!(
        ctx.accounts.owner.key(),
        ledger.owner,
        LedgerError::NotAuthorizedOwner
    );

    ledger.schedule.set(start_ts, end_ts, cliff_rate)?;

    emit!(VestingParamsSet {
        owner: ledger.owner,
        start_ts,
        end_ts,
        cliff_rate,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct SetVestingParams<'info> {
    #[account(mut, seeds = [b"ledger"], bump)]
    pub ledger: Account<'info, LedgerState>,

    pub owner: Signer<'info>,
}

#[event]
pub struct VestingParamsSet {
    pub owner: Pubkey,
    pub start_ts: i64,
    pub end_ts: Option<i64>,
    pub cliff_rate: Option<u64>,
}
