// utils/settlement.rs
use anchor_lang::prelude::*;
use crate::error::*;
use crate::state::{Bank, Outcome, Wager, WagerRequest};
use crate::utils::randomness::{DrawContext, RandomnessSource};
use crate::utils::validation::{check_eligibility, validate_stake, TokenHolding};

/// Lamports held by the two parties before the stake is escrowed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Balances {
    pub bank: u64,
    pub caller: u64,
}

/// Rent-exempt minimums. The bank must always keep its floor; the caller
/// must keep theirs or be emptied completely.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RentFloors {
    pub bank: u64,
    pub caller: u64,
}

/// What a successful lock commits the bank to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Lock {
    pub stake: u64,
    pub payout: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Settlement {
    pub outcome: Outcome,
    /// Lamports the bank hands back to the caller (0 on a loss)
    pub released: u64,
}

impl Settlement {
    /// Book the settlement into the bank statistics
    pub fn record(&self, bank: &mut Bank, wager: &Wager) -> Result<()> {
        bank.record_settlement(self.outcome, wager.stake, wager.payout)
    }
}

/// The stake transfer must leave the caller either empty or rent exempt
pub fn check_caller_funds(caller: u64, stake: u64, rent_floor: u64) -> Result<()> {
    let left = caller
        .checked_sub(stake)
        .ok_or(CollectionGambleError::InsufficientCallerFunds)?;
    if left != 0 && left < rent_floor {
        return Err(CollectionGambleError::InsufficientCallerFunds.into());
    }
    Ok(())
}

/// Everything that must hold before a stake is escrowed.
///
/// A wager only locks if the bank could pay it out on top of every wager
/// already waiting for its draw.
pub fn check_wager_bounds(
    bank: &Bank,
    balances: Balances,
    floors: RentFloors,
    stake: u64,
    payout: u64,
) -> Result<()> {
    bank.check_exposure(payout)?;
    bank.check_liquidity(balances.bank, payout, floors.bank)?;
    check_caller_funds(balances.caller, stake, floors.caller)
}

/// stake → eligibility → bounds. Nothing here depends on the draw.
pub fn plan_lock(
    bank: &Bank,
    request: &WagerRequest,
    holding: &TokenHolding,
    balances: Balances,
    floors: RentFloors,
) -> Result<Lock> {
    let payout = validate_stake(request.stake)?;
    check_eligibility(holding, bank, &request.caller)?;
    check_wager_bounds(bank, balances, floors, request.stake, payout)?;

    Ok(Lock { stake: request.stake, payout })
}

/// Draw the outcome of the wager at the head of the queue
pub fn settle_draw<R: RandomnessSource>(
    bank: &Bank,
    wager: &Wager,
    source: &mut R,
) -> Result<Settlement> {
    bank.check_draw_turn(wager.draw_index)?;

    let request = wager.request();
    let outcome = source.next(&DrawContext {
        request: &request,
        draw_index: wager.draw_index,
    })?;

    let released = if outcome.is_win() { wager.release_on_win()? } else { 0 };
    Ok(Settlement { outcome, released })
}
