use anchor_lang::prelude::*;

/// Custom error codes for the vesting ledger program.
#[error_code]
pub enum LedgerError {
    #[msg("Only the owner can set vesting parameters or fund the ledger")]
    NotAuthorizedOwner,

    #[msg("Only the beneficiary can withdraw")]
    NotAuthorizedBeneficiary,

    #[msg("Set vesting parameters before funding")]
    ScheduleNotSet,

    #[msg("Vesting parameters have already been set")]
    AlreadySet,

    #[msg("The ledger has already been funded")]
    AlreadyFunded,

    #[msg("Specify an amount for each asset being deposited")]
    LengthMismatch,

    #[msg("That asset has no claimable balance")]
    NothingClaimable,

    #[msg("Value transfer failed")]
    TransferFailed,

    #[msg("Invalid configuration")]
    InvalidConfig,

    #[msg("Invalid timestamp")]
    InvalidTimestamp,

    #[msg("Invalid public key")]
    InvalidPubkey,

    #[msg("Asset list is full")]
    AssetListFull,

    #[msg("Duplicate asset in funding list")]
    DuplicateAsset,

    #[msg("Invalid token mint")]
    InvalidTokenMint,

    #[msg("Invalid token account")]
    InvalidTokenAccount,

    #[msg("Math overflow")]
    MathOverflow,
}
