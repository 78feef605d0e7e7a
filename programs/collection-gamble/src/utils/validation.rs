use anchor_lang::prelude::*;
use anchor_spl::associated_token::get_associated_token_address;
use anchor_spl::token::TokenAccount;
use crate::constants::*;
use crate::error::*;
use crate::state::Bank;

/// Fields of an SPL token account that matter for collection membership
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TokenHolding {
    /// Address of the token account itself
    pub address: Pubkey,
    pub owner: Pubkey,
    pub mint: Pubkey,
    pub amount: u64,
}

impl<'info> From<&Account<'info, TokenAccount>> for TokenHolding {
    fn from(account: &Account<'info, TokenAccount>) -> Self {
        Self {
            address: account.key(),
            owner: account.owner,
            mint: account.mint,
            amount: account.amount,
        }
    }
}

/// Why a holding was rejected. Only logged, never returned to the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EligibilityFailure {
    WrongMint,
    WrongOwner,
    EmptyHolding,
    NotAssociatedAccount,
}

/// Classify a holding without side effects
pub fn eligibility_failure(
    holding: &TokenHolding,
    required_collection: &Pubkey,
    caller: &Pubkey,
) -> Option<EligibilityFailure> {
    if holding.mint != *required_collection {
        Some(EligibilityFailure::WrongMint)
    } else if holding.owner != *caller {
        Some(EligibilityFailure::WrongOwner)
    } else if holding.amount < 1 {
        Some(EligibilityFailure::EmptyHolding)
    } else if holding.address != get_associated_token_address(caller, required_collection) {
        Some(EligibilityFailure::NotAssociatedAccount)
    } else {
        None
    }
}

/// Mint, owner, amount and the associated-account address must all check out
pub fn check_eligibility(holding: &TokenHolding, bank: &Bank, caller: &Pubkey) -> Result<()> {
    match eligibility_failure(holding, &bank.required_collection, caller) {
        None => Ok(()),
        Some(reason) => {
            msg!("❌ Not a collection member: {:?} (mint {}, owner {})", reason, holding.mint, holding.owner);
            Err(CollectionGambleError::NotCollectionMember.into())
        }
    }
}

/// Validate stake and return the payout a win would require
pub fn validate_stake(stake: u64) -> Result<u64> {
    if stake == 0 {
        return Err(CollectionGambleError::InvalidStake.into());
    }
    stake
        .checked_mul(WIN_PAYOUT_MULTIPLIER)
        .ok_or_else(|| CollectionGambleError::InvalidStake.into())
}

/// Validate deposit amount
pub fn validate_deposit_amount(amount: u64) -> Result<()> {
    if amount == 0 {
        return Err(CollectionGambleError::InvalidDepositAmount.into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use anchor_lang::error::Error;

    fn member_holding(caller: Pubkey, collection: Pubkey, amount: u64) -> TokenHolding {
        TokenHolding {
            address: get_associated_token_address(&caller, &collection),
            owner: caller,
            mint: collection,
            amount,
        }
    }

    fn bank_for(collection: Pubkey) -> Bank {
        Bank {
            authority: Pubkey::new_unique(),
            required_collection: collection,
            liability_ceiling: 0,
            randomness_authority: Pubkey::new_unique(),
            seed_commitment: [0u8; 32],
            win_probability_bps: DEFAULT_WIN_PROBABILITY_BPS,
            total_deposited: 0,
            total_collected: 0,
            total_paid_out: 0,
            pending_stakes: 0,
            pending_payouts: 0,
            next_draw_index: 0,
            wager_count: 0,
            created_at: 0,
            is_initialized: true,
            bump: 255,
        }
    }

    #[test]
    fn member_with_one_token_passes() {
        let collection = Pubkey::new_unique();
        let caller = Pubkey::new_unique();
        let holding = member_holding(caller, collection, 1);

        check_eligibility(&holding, &bank_for(collection), &caller).unwrap();
    }

    #[test]
    fn member_with_several_tokens_passes() {
        let collection = Pubkey::new_unique();
        let caller = Pubkey::new_unique();
        let holding = member_holding(caller, collection, 2);

        check_eligibility(&holding, &bank_for(collection), &caller).unwrap();
    }

    #[test]
    fn every_failure_reports_the_same_error() {
        let collection = Pubkey::new_unique();
        let caller = Pubkey::new_unique();
        let bank = bank_for(collection);
        let member = member_holding(caller, collection, 1);

        let cases = [
            (
                TokenHolding { mint: Pubkey::new_unique(), ..member },
                EligibilityFailure::WrongMint,
            ),
            (
                TokenHolding { owner: Pubkey::new_unique(), ..member },
                EligibilityFailure::WrongOwner,
            ),
            (
                TokenHolding { amount: 0, ..member },
                EligibilityFailure::EmptyHolding,
            ),
            (
                TokenHolding { address: Pubkey::new_unique(), ..member },
                EligibilityFailure::NotAssociatedAccount,
            ),
        ];

        for (holding, reason) in cases {
            assert_eq!(eligibility_failure(&holding, &collection, &caller), Some(reason));
            assert_eq!(
                check_eligibility(&holding, &bank, &caller).unwrap_err(),
                Error::from(CollectionGambleError::NotCollectionMember)
            );
        }
    }

    #[test]
    fn auxiliary_token_account_is_not_accepted() {
        let collection = Pubkey::new_unique();
        let caller = Pubkey::new_unique();
        // someone else's associated account, rewritten to look like the caller's
        let other = member_holding(Pubkey::new_unique(), collection, 1);
        let forged = TokenHolding { owner: caller, ..other };

        assert_eq!(
            eligibility_failure(&forged, &collection, &caller),
            Some(EligibilityFailure::NotAssociatedAccount)
        );
        assert_eq!(
            check_eligibility(&forged, &bank_for(collection), &caller).unwrap_err(),
            Error::from(CollectionGambleError::NotCollectionMember)
        );
    }

    #[test]
    fn stake_bounds() {
        assert_eq!(validate_stake(10_000_000).unwrap(), 20_000_000);
        assert_eq!(
            validate_stake(0).unwrap_err(),
            Error::from(CollectionGambleError::InvalidStake)
        );
        assert_eq!(
            validate_stake(u64::MAX / 2 + 1).unwrap_err(),
            Error::from(CollectionGambleError::InvalidStake)
        );
    }

    #[test]
    fn zero_deposit_rejected() {
        assert!(validate_deposit_amount(1).is_ok());
        assert_eq!(
            validate_deposit_amount(0).unwrap_err(),
            Error::from(CollectionGambleError::InvalidDepositAmount)
        );
    }
}
