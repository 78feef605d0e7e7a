// state/bank.rs
use anchor_lang::prelude::*;
use crate::constants::*;
use crate::error::CollectionGambleError;
use crate::state::Outcome;

/// Randomness settings fixed when the bank is created
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct RandomnessConfig {
    /// Settles every wager by revealing the next hash-chain link
    pub authority: Pubkey,
    /// sha256 of the first seed that will be revealed
    pub seed_commitment: [u8; 32],
    /// Chance of a winning draw, in basis points
    pub win_probability_bps: u16,
}

/// Pooled custody account. Its lamports are the bank balance, escrowed
/// stakes of pending wagers included.
#[account]
pub struct Bank {
    /// Creator, fixed at init
    pub authority: Pubkey,

    /// Mint whose holders may wager
    pub required_collection: Pubkey,

    /// Maximum net payout the bank will ever be exposed to
    pub liability_ceiling: u64,

    pub randomness_authority: Pubkey,

    /// Head of the hash chain; the next reveal must hash to this
    pub seed_commitment: [u8; 32],

    pub win_probability_bps: u16,

    /// Lamports deposited by the authority (initial float included)
    pub total_deposited: u64,

    /// Stakes kept from losing callers
    pub total_collected: u64,

    /// Winnings paid to callers, returned stakes excluded
    pub total_paid_out: u64,

    /// Stakes escrowed by wagers not yet settled
    pub pending_stakes: u64,

    /// Winnings reserved for wagers not yet settled
    pub pending_payouts: u64,

    /// Draw index handed to the next locked wager
    pub next_draw_index: u64,

    /// Settled wagers; also the draw index that must settle next
    pub wager_count: u64,

    pub created_at: i64,

    pub is_initialized: bool,

    pub bump: u8,
}

impl Bank {
    /// Size for account allocation
    pub const SIZE: usize = 8 + // discriminator
        32 + // authority
        32 + // required_collection
        8 + // liability_ceiling
        32 + // randomness_authority
        32 + // seed_commitment
        2 + // win_probability_bps
        8 + // total_deposited
        8 + // total_collected
        8 + // total_paid_out
        8 + // pending_stakes
        8 + // pending_payouts
        8 + // next_draw_index
        8 + // wager_count
        8 + // created_at
        1 + // is_initialized
        1; // bump

    /// Configure a freshly allocated bank. Fails if it was configured before,
    /// leaving the existing configuration untouched.
    pub fn configure(
        &mut self,
        authority: Pubkey,
        required_collection: Pubkey,
        liability_ceiling: u64,
        randomness: &RandomnessConfig,
        created_at: i64,
        bump: u8,
    ) -> Result<()> {
        if self.is_initialized {
            return Err(CollectionGambleError::AlreadyInitialized.into());
        }
        validate_win_probability(randomness.win_probability_bps)?;

        self.authority = authority;
        self.required_collection = required_collection;
        self.liability_ceiling = liability_ceiling;
        self.randomness_authority = randomness.authority;
        self.seed_commitment = randomness.seed_commitment;
        self.win_probability_bps = randomness.win_probability_bps;
        self.total_deposited = 0;
        self.total_collected = 0;
        self.total_paid_out = 0;
        self.pending_stakes = 0;
        self.pending_payouts = 0;
        self.next_draw_index = 0;
        self.wager_count = 0;
        self.created_at = created_at;
        self.is_initialized = true;
        self.bump = bump;
        Ok(())
    }

    pub fn check_authority(&self, signer: &Pubkey) -> Result<()> {
        if *signer != self.authority {
            return Err(CollectionGambleError::UnauthorizedAuthority.into());
        }
        Ok(())
    }

    pub fn check_randomness_authority(&self, signer: &Pubkey) -> Result<()> {
        if *signer != self.randomness_authority {
            return Err(CollectionGambleError::UnauthorizedRandomnessAuthority.into());
        }
        Ok(())
    }

    /// Net lamports the bank has lost to callers so far
    pub fn net_exposure(&self) -> u64 {
        self.total_paid_out.saturating_sub(self.total_collected)
    }

    pub fn pending_wagers(&self) -> u64 {
        self.next_draw_index.saturating_sub(self.wager_count)
    }

    /// Would reserving `payout` on top of every pending wager push net
    /// exposure past the ceiling?
    pub fn check_exposure(&self, payout: u64) -> Result<()> {
        let committed = self.total_paid_out as u128
            + self.pending_payouts as u128
            + payout as u128;
        let allowance = self.liability_ceiling as u128 + self.total_collected as u128;
        if committed > allowance {
            return Err(CollectionGambleError::LiabilityCeilingExceeded.into());
        }
        Ok(())
    }

    /// Can the bank, holding `lamports` before the new stake arrives, release
    /// every pending wager plus a new `payout` and stay at `rent_floor`?
    pub fn check_liquidity(&self, lamports: u64, payout: u64, rent_floor: u64) -> Result<()> {
        let free = (lamports as u128)
            .checked_sub(self.pending_stakes as u128 + self.pending_payouts as u128 + payout as u128)
            .ok_or(CollectionGambleError::InsufficientBankLiquidity)?;
        if free < rent_floor as u128 {
            return Err(CollectionGambleError::InsufficientBankLiquidity.into());
        }
        Ok(())
    }

    pub fn add_deposit(&mut self, amount: u64) -> Result<()> {
        self.total_deposited = self.total_deposited
            .checked_add(amount)
            .ok_or(CollectionGambleError::MathOverflow)?;
        Ok(())
    }

    /// Hold `stake + payout` for a newly locked wager and hand out its draw index
    pub fn reserve_draw(&mut self, stake: u64, payout: u64) -> Result<u64> {
        let draw_index = self.next_draw_index;
        self.pending_stakes = self.pending_stakes
            .checked_add(stake)
            .ok_or(CollectionGambleError::MathOverflow)?;
        self.pending_payouts = self.pending_payouts
            .checked_add(payout)
            .ok_or(CollectionGambleError::MathOverflow)?;
        self.next_draw_index = draw_index
            .checked_add(1)
            .ok_or(CollectionGambleError::MathOverflow)?;
        Ok(draw_index)
    }

    /// Wagers settle in lock order
    pub fn check_draw_turn(&self, draw_index: u64) -> Result<()> {
        if draw_index != self.wager_count {
            return Err(CollectionGambleError::WagerOutOfOrder.into());
        }
        Ok(())
    }

    /// Release the reservation of a settled wager and book its outcome
    pub fn record_settlement(&mut self, outcome: Outcome, stake: u64, payout: u64) -> Result<()> {
        self.pending_stakes = self.pending_stakes
            .checked_sub(stake)
            .ok_or(CollectionGambleError::MathOverflow)?;
        self.pending_payouts = self.pending_payouts
            .checked_sub(payout)
            .ok_or(CollectionGambleError::MathOverflow)?;

        if outcome.is_win() {
            self.total_paid_out = self.total_paid_out
                .checked_add(payout)
                .ok_or(CollectionGambleError::MathOverflow)?;
        } else {
            self.total_collected = self.total_collected
                .checked_add(stake)
                .ok_or(CollectionGambleError::MathOverflow)?;
        }

        self.wager_count = self.wager_count
            .checked_add(1)
            .ok_or(CollectionGambleError::MathOverflow)?;
        Ok(())
    }

    /// Move the hash chain forward to the seed that was just revealed
    pub fn advance_commitment(&mut self, reveal: [u8; 32]) {
        self.seed_commitment = reveal;
    }

    /// Install a new chain head. Refused while any wager is pending, since
    /// those draws must come from the chain that was live when they locked.
    pub fn rotate_commitment(&mut self, signer: &Pubkey, new_commitment: [u8; 32]) -> Result<()> {
        self.check_randomness_authority(signer)?;
        if self.pending_wagers() > 0 {
            return Err(CollectionGambleError::PendingWagersOutstanding.into());
        }
        self.seed_commitment = new_commitment;
        Ok(())
    }
}

pub fn validate_win_probability(bps: u16) -> Result<()> {
    if !(MIN_WIN_PROBABILITY_BPS..=MAX_WIN_PROBABILITY_BPS).contains(&bps) {
        return Err(CollectionGambleError::InvalidWinProbability.into());
    }
    Ok(())
}
