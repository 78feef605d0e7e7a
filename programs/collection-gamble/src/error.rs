// error.rs
use anchor_lang::prelude::*;

#[error_code]
pub enum CollectionGambleError {
    // 🏦 BANK LIFECYCLE
    #[msg("Bank already initialized")]
    AlreadyInitialized,

    #[msg("Signer is not the bank authority")]
    UnauthorizedAuthority,

    #[msg("Deposit amount must be greater than zero")]
    InvalidDepositAmount,

    // 🪪 ELIGIBILITY
    #[msg("Token holding does not prove membership in the required collection")]
    NotCollectionMember,

    // 🎲 WAGER
    #[msg("Stake is zero or out of bounds")]
    InvalidStake,

    #[msg("Bank cannot cover the payout without dropping below rent exemption")]
    InsufficientBankLiquidity,

    #[msg("Payout would exceed the bank liability ceiling")]
    LiabilityCeilingExceeded,

    #[msg("Caller cannot cover the stake and stay rent exempt")]
    InsufficientCallerFunds,

    #[msg("Wagers must settle in the order they were locked")]
    WagerOutOfOrder,

    // 🔐 RANDOMNESS
    #[msg("Win probability must be between 1 and 9999 basis points")]
    InvalidWinProbability,

    #[msg("Seed reveal does not match the bank commitment")]
    InvalidSeedReveal,

    #[msg("Signer is not the bank randomness authority")]
    UnauthorizedRandomnessAuthority,

    #[msg("Seed cannot rotate while wagers are pending")]
    PendingWagersOutstanding,

    #[msg("SlotHashes sysvar is empty or malformed")]
    SlotHashesUnavailable,

    // 🧮 MISC
    #[msg("Math overflow")]
    MathOverflow,
}
