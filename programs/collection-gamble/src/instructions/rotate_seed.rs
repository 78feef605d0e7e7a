// instructions/rotate_seed.rs
use anchor_lang::prelude::*;
use crate::constants::*;
use crate::state::*;

/// Install a new hash-chain head once the previous chain runs out.
/// Only allowed when no wager is waiting for a draw.
pub fn process_rotate_seed(ctx: Context<RotateSeed>, new_commitment: [u8; 32]) -> Result<()> {
    let bank = &mut ctx.accounts.bank;
    bank.rotate_commitment(&ctx.accounts.randomness_authority.key(), new_commitment)?;

    msg!("🔐 Seed commitment rotated at wager {}", bank.wager_count);

    emit!(crate::SeedRotated {
        bank: bank.key(),
        seed_commitment: new_commitment,
        wager_count: bank.wager_count,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct RotateSeed<'info> {
    pub randomness_authority: Signer<'info>,

    #[account(
        mut,
        seeds = [BANK_SEED, bank.authority.as_ref()],
        bump = bank.bump
    )]
    pub bank: Account<'info, Bank>,
}
