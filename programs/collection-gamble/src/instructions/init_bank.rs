// instructions/init_bank.rs
use anchor_lang::prelude::*;
use anchor_lang::system_program;
use crate::constants::*;
use crate::state::*;

/// Create and configure the bank, then deposit the starting float
pub fn process_init_bank(
    ctx: Context<InitBank>,
    liability_ceiling: u64,
    required_collection: Pubkey,
    randomness: RandomnessConfig,
) -> Result<()> {
    let clock = Clock::get()?;
    let authority = ctx.accounts.authority.key();

    ctx.accounts.bank.configure(
        authority,
        required_collection,
        liability_ceiling,
        &randomness,
        clock.unix_timestamp,
        ctx.bumps.bank,
    )?;

    // The float covers the full configured exposure
    if liability_ceiling > 0 {
        system_program::transfer(
            CpiContext::new(
                ctx.accounts.system_program.to_account_info(),
                system_program::Transfer {
                    from: ctx.accounts.authority.to_account_info(),
                    to: ctx.accounts.bank.to_account_info(),
                },
            ),
            liability_ceiling,
        )?;
        ctx.accounts.bank.add_deposit(liability_ceiling)?;
    }

    let bank = &ctx.accounts.bank;
    msg!("🏦 Bank initialized!");
    msg!("Authority: {}", bank.authority);
    msg!("Required collection: {}", bank.required_collection);
    msg!("Liability ceiling: {} lamports", bank.liability_ceiling);
    msg!("Win probability: {} bps", bank.win_probability_bps);

    emit!(crate::BankInitialized {
        bank: bank.key(),
        authority: bank.authority,
        required_collection: bank.required_collection,
        liability_ceiling: bank.liability_ceiling,
        randomness_authority: bank.randomness_authority,
        win_probability_bps: bank.win_probability_bps,
        created_at: bank.created_at,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct InitBank<'info> {
    /// Bank authority, pays rent and the starting float
    #[account(mut)]
    pub authority: Signer<'info>,

    /// Bank account. `init_if_needed` so a second call reaches the handler
    /// and fails with `AlreadyInitialized` instead of a system error.
    #[account(
        init_if_needed,
        payer = authority,
        space = Bank::SIZE,
        seeds = [BANK_SEED, authority.key().as_ref()],
        bump
    )]
    pub bank: Account<'info, Bank>,

    /// System program for account creation and the float transfer
    pub system_program: Program<'info, System>,
}
