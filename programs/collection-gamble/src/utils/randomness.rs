// utils/randomness.rs
use anchor_lang::prelude::*;
use anchor_lang::solana_program::hash::{hash, hashv};
use crate::constants::*;
use crate::error::*;
use crate::state::{Outcome, WagerRequest};

/// Inputs a source may bind the draw to
pub struct DrawContext<'a> {
    pub request: &'a WagerRequest,
    /// Queue position assigned when the wager locked
    pub draw_index: u64,
}

/// Anything that can produce one outcome per wager.
///
/// Implementations must make both outcomes reachable and must not be
/// derivable from data the caller controls or sees before submission.
pub trait RandomnessSource {
    fn next(&mut self, context: &DrawContext) -> Result<Outcome>;
}

/// Hash-chain commit/reveal mixed with the slot hash captured at lock.
///
/// The randomness authority publishes `sha256(s_k)` ahead of time. A wager
/// locks its stake and slot hash first; `s_k` is revealed only in the later
/// settle instruction, so the caller is committed before any input of the
/// draw except the slot hash is public. The authority cannot pick `s_k`
/// either: it is fixed by the commitment, and draws settle in lock order.
pub struct HashChainSource {
    commitment: [u8; 32],
    reveal: [u8; 32],
    entropy: [u8; 32],
    win_probability_bps: u16,
}

impl HashChainSource {
    pub fn new(
        commitment: [u8; 32],
        reveal: [u8; 32],
        entropy: [u8; 32],
        win_probability_bps: u16,
    ) -> Self {
        Self { commitment, reveal, entropy, win_probability_bps }
    }
}

impl RandomnessSource for HashChainSource {
    /// Fails unless `reveal` opens the commitment
    fn next(&mut self, context: &DrawContext) -> Result<Outcome> {
        verify_reveal(&self.commitment, &self.reveal)?;
        let request = context.request;
        let seed = hashv(&[
            &self.reveal,
            &self.entropy,
            request.caller.as_ref(),
            request.bank.as_ref(),
            &request.stake.to_le_bytes(),
            &context.draw_index.to_le_bytes(),
        ]);
        Ok(outcome_from_seed(&seed.to_bytes(), self.win_probability_bps))
    }
}

pub fn verify_reveal(commitment: &[u8; 32], reveal: &[u8; 32]) -> Result<()> {
    if hash(reveal).to_bytes() != *commitment {
        return Err(CollectionGambleError::InvalidSeedReveal.into());
    }
    Ok(())
}

/// Map 32 bytes of entropy onto Win/Lose
pub fn outcome_from_seed(seed: &[u8; 32], win_probability_bps: u16) -> Outcome {
    let mut head = [0u8; 8];
    head.copy_from_slice(&seed[..8]);
    let roll = u64::from_le_bytes(head) % BASIS_POINTS;
    if roll < win_probability_bps as u64 {
        Outcome::Win
    } else {
        Outcome::Lose
    }
}

/// Newest hash stored in the SlotHashes sysvar data
pub fn most_recent_slot_hash(data: &[u8]) -> Result<[u8; 32]> {
    let start = SLOT_HASHES_LEN_PREFIX + SLOT_HASH_ENTRY_SLOT_LEN;
    let end = start + SLOT_HASH_LEN;
    if data.len() < end {
        return Err(CollectionGambleError::SlotHashesUnavailable.into());
    }

    let mut len = [0u8; 8];
    len.copy_from_slice(&data[..SLOT_HASHES_LEN_PREFIX]);
    if u64::from_le_bytes(len) == 0 {
        return Err(CollectionGambleError::SlotHashesUnavailable.into());
    }

    let mut slot_hash = [0u8; 32];
    slot_hash.copy_from_slice(&data[start..end]);
    Ok(slot_hash)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anchor_lang::error::Error;

    /// s_0 .. s_n where s_{i+1} = sha256(s_i)
    fn chain(len: usize) -> Vec<[u8; 32]> {
        let mut links = vec![[42u8; 32]];
        for _ in 1..len {
            let next = hash(links.last().unwrap()).to_bytes();
            links.push(next);
        }
        links
    }

    fn slot_hashes_data(entries: &[(u64, [u8; 32])]) -> Vec<u8> {
        let mut data = (entries.len() as u64).to_le_bytes().to_vec();
        for (slot, h) in entries {
            data.extend_from_slice(&slot.to_le_bytes());
            data.extend_from_slice(h);
        }
        data
    }

    #[test]
    fn reveal_must_open_commitment() {
        let links = chain(3);
        verify_reveal(&links[2], &links[1]).unwrap();
        assert_eq!(
            verify_reveal(&links[2], &links[0]).unwrap_err(),
            Error::from(CollectionGambleError::InvalidSeedReveal)
        );

        let request = WagerRequest {
            caller: Pubkey::new_unique(),
            bank: Pubkey::new_unique(),
            stake: 1,
        };
        let context = DrawContext { request: &request, draw_index: 0 };
        let mut forged = HashChainSource::new(links[2], [0u8; 32], [1u8; 32], 5_000);
        assert_eq!(
            forged.next(&context).unwrap_err(),
            Error::from(CollectionGambleError::InvalidSeedReveal)
        );
    }

    #[test]
    fn reveal_opens_the_chain_only_once() {
        let links = chain(3);
        let mut bank_commitment = links[2];
        let request = WagerRequest {
            caller: Pubkey::new_unique(),
            bank: Pubkey::new_unique(),
            stake: 1,
        };

        let first = DrawContext { request: &request, draw_index: 0 };
        HashChainSource::new(bank_commitment, links[1], [5u8; 32], 5_000)
            .next(&first)
            .unwrap();
        bank_commitment = links[1];

        // replaying the same seed against the advanced head fails
        let second = DrawContext { request: &request, draw_index: 1 };
        assert_eq!(
            HashChainSource::new(bank_commitment, links[1], [5u8; 32], 5_000)
                .next(&second)
                .unwrap_err(),
            Error::from(CollectionGambleError::InvalidSeedReveal)
        );
        HashChainSource::new(bank_commitment, links[0], [5u8; 32], 5_000)
            .next(&second)
            .unwrap();
    }

    #[test]
    fn both_outcomes_reachable_along_chain() {
        let links = chain(41);
        let request = WagerRequest {
            caller: Pubkey::new_unique(),
            bank: Pubkey::new_unique(),
            stake: 10_000_000,
        };

        let mut wins = 0;
        let mut losses = 0;
        let mut commitment = *links.last().unwrap();
        for (i, reveal) in links[..40].iter().rev().enumerate() {
            let mut source =
                HashChainSource::new(commitment, *reveal, [9u8; 32], DEFAULT_WIN_PROBABILITY_BPS);
            let context = DrawContext { request: &request, draw_index: i as u64 };
            match source.next(&context).unwrap() {
                Outcome::Win => wins += 1,
                Outcome::Lose => losses += 1,
            }
            commitment = *reveal;
        }

        assert!(wins > 0, "no wins in 40 draws");
        assert!(losses > 0, "no losses in 40 draws");
    }

    #[test]
    fn draw_depends_on_locked_entropy() {
        let links = chain(2);
        let request = WagerRequest {
            caller: Pubkey::new_unique(),
            bank: Pubkey::new_unique(),
            stake: 1,
        };
        let context = DrawContext { request: &request, draw_index: 0 };

        let outcomes: Vec<Outcome> = (0u8..32)
            .map(|b| {
                HashChainSource::new(links[1], links[0], [b; 32], 5_000)
                    .next(&context)
                    .unwrap()
            })
            .collect();
        assert!(outcomes.contains(&Outcome::Win));
        assert!(outcomes.contains(&Outcome::Lose));
    }

    #[test]
    fn probability_edges() {
        let zero = [0u8; 32];
        assert_eq!(outcome_from_seed(&zero, 1), Outcome::Win);
        assert_eq!(outcome_from_seed(&zero, 9_999), Outcome::Win);

        let mut high = [0u8; 32];
        high[..8].copy_from_slice(&9_999u64.to_le_bytes());
        assert_eq!(outcome_from_seed(&high, 9_999), Outcome::Lose);
        assert_eq!(outcome_from_seed(&high, 1), Outcome::Lose);
    }

    #[test]
    fn reads_newest_slot_hash() {
        let data = slot_hashes_data(&[(99, [3u8; 32]), (98, [2u8; 32])]);
        assert_eq!(most_recent_slot_hash(&data).unwrap(), [3u8; 32]);
    }

    #[test]
    fn empty_slot_hashes_rejected() {
        assert_eq!(
            most_recent_slot_hash(&slot_hashes_data(&[])).unwrap_err(),
            Error::from(CollectionGambleError::SlotHashesUnavailable)
        );

        let mut zero_count = slot_hashes_data(&[(1, [1u8; 32])]);
        zero_count[..8].copy_from_slice(&0u64.to_le_bytes());
        assert!(most_recent_slot_hash(&zero_count).is_err());
    }
}
