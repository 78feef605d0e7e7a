// instructions/gamble.rs
use anchor_lang::prelude::*;
use anchor_lang::solana_program::sysvar;
use anchor_lang::system_program;
use anchor_spl::token::TokenAccount;
use crate::constants::*;
use crate::state::*;
use crate::utils::*;

/// Escrow the stake and queue the wager for its draw
pub fn process_gamble(ctx: Context<Gamble>, stake: u64) -> Result<()> {
    let request = WagerRequest {
        caller: ctx.accounts.caller.key(),
        bank: ctx.accounts.bank.key(),
        stake,
    };
    let holding = TokenHolding::from(&ctx.accounts.token_account);
    // caller has already paid rent for the wager account at this point
    let balances = Balances {
        bank: ctx.accounts.bank.get_lamports(),
        caller: ctx.accounts.caller.get_lamports(),
    };
    let rent = Rent::get()?;
    let floors = RentFloors {
        bank: rent.minimum_balance(ctx.accounts.bank.to_account_info().data_len()),
        caller: rent.minimum_balance(0),
    };

    let lock = plan_lock(&ctx.accounts.bank, &request, &holding, balances, floors)?;

    let entropy = {
        let data = ctx.accounts.slot_hashes.try_borrow_data()?;
        most_recent_slot_hash(&data)?
    };

    system_program::transfer(
        CpiContext::new(
            ctx.accounts.system_program.to_account_info(),
            system_program::Transfer {
                from: ctx.accounts.caller.to_account_info(),
                to: ctx.accounts.bank.to_account_info(),
            },
        ),
        lock.stake,
    )?;

    let draw_index = ctx.accounts.bank.reserve_draw(lock.stake, lock.payout)?;
    let locked_at = Clock::get()?.unix_timestamp;

    let wager = &mut ctx.accounts.wager;
    wager.bank = request.bank;
    wager.caller = request.caller;
    wager.stake = lock.stake;
    wager.payout = lock.payout;
    wager.draw_index = draw_index;
    wager.entropy = entropy;
    wager.locked_at = locked_at;
    wager.bump = ctx.bumps.wager;

    msg!("🔒 Wager #{} locked", draw_index);
    msg!("Caller: {}", request.caller);
    msg!("Stake: {} lamports, payout on win: {} lamports", lock.stake, lock.payout);

    emit!(crate::WagerLocked {
        bank: request.bank,
        caller: request.caller,
        wager: wager.key(),
        stake: lock.stake,
        payout: lock.payout,
        draw_index,
        locked_at,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct Gamble<'info> {
    /// Wallet placing the wager; pays the stake and the wager account rent
    #[account(mut)]
    pub caller: Signer<'info>,

    /// Holding presented as proof of collection membership; checked in the handler
    pub token_account: Account<'info, TokenAccount>,

    /// Writable, so the runtime serializes every wager touching this bank
    #[account(
        mut,
        seeds = [BANK_SEED, bank.authority.as_ref()],
        bump = bank.bump
    )]
    pub bank: Account<'info, Bank>,

    #[account(
        init,
        payer = caller,
        space = Wager::SIZE,
        seeds = [WAGER_SEED, bank.key().as_ref(), &bank.next_draw_index.to_le_bytes()],
        bump
    )]
    pub wager: Account<'info, Wager>,

    /// CHECK: address pinned to the SlotHashes sysvar
    #[account(address = sysvar::slot_hashes::ID)]
    pub slot_hashes: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
}
