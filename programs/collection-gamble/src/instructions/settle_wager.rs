// instructions/settle_wager.rs
use anchor_lang::prelude::*;
use crate::constants::*;
use crate::state::*;
use crate::error::*;
use crate::utils::*;

/// Reveal the next seed, draw the oldest pending wager and pay it out
pub fn process_settle_wager(ctx: Context<SettleWager>, reveal: [u8; 32]) -> Result<Outcome> {
    ctx.accounts
        .bank
        .check_randomness_authority(&ctx.accounts.randomness_authority.key())?;

    let bank = &ctx.accounts.bank;
    let wager = &ctx.accounts.wager;
    let mut source = HashChainSource::new(
        bank.seed_commitment,
        reveal,
        wager.entropy,
        bank.win_probability_bps,
    );
    let settlement = settle_draw(bank, wager, &mut source)?;

    if settlement.outcome.is_win() {
        let rent_floor = Rent::get()?.minimum_balance(ctx.accounts.bank.to_account_info().data_len());
        let left = ctx.accounts.bank.get_lamports()
            .checked_sub(settlement.released)
            .ok_or(CollectionGambleError::InsufficientBankLiquidity)?;
        if left < rent_floor {
            return Err(CollectionGambleError::InsufficientBankLiquidity.into());
        }
        // Bank is program-owned, so lamports move directly
        ctx.accounts.bank.sub_lamports(settlement.released)?;
        ctx.accounts.caller.add_lamports(settlement.released)?;
    }

    let bank = &mut ctx.accounts.bank;
    bank.advance_commitment(reveal);
    settlement.record(bank, &ctx.accounts.wager)?;

    let wager = &ctx.accounts.wager;
    let (payout, collected) = if settlement.outcome.is_win() {
        (wager.payout, 0)
    } else {
        (0, wager.stake)
    };

    msg!("🎲 Wager #{} settled: {:?}", wager.draw_index, settlement.outcome);
    msg!("Caller: {}", wager.caller);
    msg!("Net exposure: {} / {} lamports", bank.net_exposure(), bank.liability_ceiling);

    emit!(crate::WagerSettled {
        bank: wager.bank,
        caller: wager.caller,
        stake: wager.stake,
        outcome: settlement.outcome,
        payout,
        collected,
        draw_index: wager.draw_index,
        net_exposure: bank.net_exposure(),
        settled_at: Clock::get()?.unix_timestamp,
    });

    Ok(settlement.outcome)
}

#[derive(Accounts)]
pub struct SettleWager<'info> {
    /// Reveals the seed; must match the bank's randomness authority
    pub randomness_authority: Signer<'info>,

    #[account(
        mut,
        seeds = [BANK_SEED, bank.authority.as_ref()],
        bump = bank.bump
    )]
    pub bank: Account<'info, Bank>,

    /// Closed once settled; rent goes back to the caller
    #[account(
        mut,
        has_one = bank,
        has_one = caller,
        close = caller,
        seeds = [WAGER_SEED, bank.key().as_ref(), &wager.draw_index.to_le_bytes()],
        bump = wager.bump
    )]
    pub wager: Account<'info, Wager>,

    #[account(mut)]
    pub caller: SystemAccount<'info>,
}
