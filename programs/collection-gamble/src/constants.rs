// constants.rs

// ============================================================================
// PDA SEEDS
// ============================================================================

pub const BANK_SEED: &[u8] = b"bank";
pub const WAGER_SEED: &[u8] = b"wager";

// ============================================================================
// WAGER CONFIGURATION
// ============================================================================

/// Winnings on top of the returned stake, as a multiple of the stake
pub const WIN_PAYOUT_MULTIPLIER: u64 = 2;

/// Denominator for win probability
pub const BASIS_POINTS: u64 = 10_000;

/// Fair coin unless the bank is configured otherwise
pub const DEFAULT_WIN_PROBABILITY_BPS: u16 = 5_000;

/// Both outcomes must stay reachable
pub const MIN_WIN_PROBABILITY_BPS: u16 = 1;
pub const MAX_WIN_PROBABILITY_BPS: u16 = 9_999;

// ============================================================================
// SYSVAR LAYOUT
// ============================================================================

/// SlotHashes data: u64 entry count, then (u64 slot, [u8; 32] hash) entries,
/// newest first.
pub const SLOT_HASHES_LEN_PREFIX: usize = 8;
pub const SLOT_HASH_ENTRY_SLOT_LEN: usize = 8;
pub const SLOT_HASH_LEN: usize = 32;
