// instructions/fund_bank.rs
use anchor_lang::prelude::*;
use anchor_lang::system_program;
use crate::constants::*;
use crate::state::*;
use crate::utils::*;

/// Authority tops up the bank
pub fn process_fund_bank(ctx: Context<FundBank>, amount: u64) -> Result<()> {
    // Only authority can deposit
    ctx.accounts.bank.check_authority(&ctx.accounts.authority.key())?;
    validate_deposit_amount(amount)?;

    system_program::transfer(
        CpiContext::new(
            ctx.accounts.system_program.to_account_info(),
            system_program::Transfer {
                from: ctx.accounts.authority.to_account_info(),
                to: ctx.accounts.bank.to_account_info(),
            },
        ),
        amount,
    )?;

    let bank = &mut ctx.accounts.bank;
    bank.add_deposit(amount)?;

    msg!("💰 Bank funded: {} lamports", amount);
    msg!("Total deposited: {} lamports", bank.total_deposited);

    emit!(crate::BankFunded {
        bank: bank.key(),
        amount,
        total_deposited: bank.total_deposited,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct FundBank<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [BANK_SEED, bank.authority.as_ref()],
        bump = bank.bump
    )]
    pub bank: Account<'info, Bank>,

    pub system_program: Program<'info, System>,
}
