use anchor_lang::prelude::*;

// Import modules
pub mod constants;
pub mod error;
pub mod state;
pub mod instructions;
pub mod utils;

// Re-export for convenience
pub use constants::*;
pub use error::*;
pub use state::*;
pub use instructions::*;

declare_id!("75qoKtT4w6ysfWt8Y9ejzSNBe819sU5A1D7dsWLcQutY");

#[program]
pub mod collection_gamble {
    use super::*;

    /// Create the bank for `required_collection` holders and deposit the float
    pub fn init_bank(
        ctx: Context<InitBank>,
        liability_ceiling: u64,
        required_collection: Pubkey,
        randomness: RandomnessConfig,
    ) -> Result<()> {
        instructions::init_bank::process_init_bank(ctx, liability_ceiling, required_collection, randomness)
    }

    /// Authority deposit into the bank
    pub fn fund_bank(ctx: Context<FundBank>, amount: u64) -> Result<()> {
        instructions::fund_bank::process_fund_bank(ctx, amount)
    }

    /// Wager `stake` lamports; the stake is escrowed now and a win later
    /// returns it plus twice the stake
    pub fn gamble(ctx: Context<Gamble>, stake: u64) -> Result<()> {
        instructions::gamble::process_gamble(ctx, stake)
    }

    /// Randomness authority draws the oldest pending wager
    pub fn settle_wager(ctx: Context<SettleWager>, reveal: [u8; 32]) -> Result<Outcome> {
        instructions::settle_wager::process_settle_wager(ctx, reveal)
    }

    pub fn rotate_seed(ctx: Context<RotateSeed>, new_commitment: [u8; 32]) -> Result<()> {
        instructions::rotate_seed::process_rotate_seed(ctx, new_commitment)
    }
}

// ============================================================================
// EVENTS
// ============================================================================

#[event]
pub struct BankInitialized {
    pub bank: Pubkey,
    pub authority: Pubkey,
    pub required_collection: Pubkey,
    pub liability_ceiling: u64,
    pub randomness_authority: Pubkey,
    pub win_probability_bps: u16,
    pub created_at: i64,
}

#[event]
pub struct BankFunded {
    pub bank: Pubkey,
    pub amount: u64,
    pub total_deposited: u64,
}

#[event]
pub struct SeedRotated {
    pub bank: Pubkey,
    pub seed_commitment: [u8; 32],
    pub wager_count: u64,
}

#[event]
pub struct WagerLocked {
    pub bank: Pubkey,
    pub caller: Pubkey,
    pub wager: Pubkey,
    pub stake: u64,
    pub payout: u64,
    pub draw_index: u64,
    pub locked_at: i64,
}

#[event]
pub struct WagerSettled {
    pub bank: Pubkey,
    pub caller: Pubkey,
    pub stake: u64,
    pub outcome: Outcome,
    /// Winnings on top of the returned stake (0 on a loss)
    pub payout: u64,
    /// Stake kept by the bank (0 on a win)
    pub collected: u64,
    pub draw_index: u64,
    pub net_exposure: u64,
    pub settled_at: i64,
}
