// state/wager.rs
use anchor_lang::prelude::*;

/// Result of a single draw, returned by `settle_wager` as instruction return data
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    Win,
    Lose,
}

impl Outcome {
    pub fn is_win(&self) -> bool {
        matches!(self, Outcome::Win)
    }
}

/// Who is wagering what against which bank
#[derive(Clone, Copy, Debug)]
pub struct WagerRequest {
    pub caller: Pubkey,
    pub bank: Pubkey,
    pub stake: u64,
}

/// A locked wager waiting for its draw. The stake already sits in the bank.
#[account]
#[derive(Debug)]
pub struct Wager {
    pub bank: Pubkey,

    /// Receives the release on a win and the rent when the wager closes
    pub caller: Pubkey,

    /// Lamports escrowed at lock
    pub stake: u64,

    /// Winnings reserved on top of the stake
    pub payout: u64,

    /// Position in the bank's settlement queue
    pub draw_index: u64,

    /// Newest slot hash when the wager locked
    pub entropy: [u8; 32],

    pub locked_at: i64,

    pub bump: u8,
}

impl Wager {
    /// Size for account allocation
    pub const SIZE: usize = 8 + // discriminator
        32 + // bank
        32 + // caller
        8 + // stake
        8 + // payout
        8 + // draw_index
        32 + // entropy
        8 + // locked_at
        1; // bump

    pub fn request(&self) -> WagerRequest {
        WagerRequest {
            caller: self.caller,
            bank: self.bank,
            stake: self.stake,
        }
    }

    /// Lamports the bank hands back when this wager wins
    pub fn release_on_win(&self) -> Result<u64> {
        self.stake
            .checked_add(self.payout)
            .ok_or_else(|| crate::error::CollectionGambleError::MathOverflow.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wager_size() {
        let wager = Wager {
            bank: Pubkey::default(),
            caller: Pubkey::default(),
            stake: 0,
            payout: 0,
            draw_index: 0,
            entropy: [0u8; 32],
            locked_at: 0,
            bump: 0,
        };
        let mut bytes = Vec::new();
        wager.serialize(&mut bytes).unwrap();

        assert_eq!(bytes.len() + 8, Wager::SIZE);
    }

    #[test]
    fn win_releases_stake_and_winnings() {
        let wager = Wager {
            bank: Pubkey::new_unique(),
            caller: Pubkey::new_unique(),
            stake: 10,
            payout: 20,
            draw_index: 3,
            entropy: [1u8; 32],
            locked_at: 0,
            bump: 254,
        };
        assert_eq!(wager.release_on_win().unwrap(), 30);
        assert_eq!(wager.request().stake, 10);
        assert!(Outcome::Win.is_win());
        assert!(!Outcome::Lose.is_win());
    }
}
