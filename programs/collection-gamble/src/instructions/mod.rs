// Instructions module exports
pub mod init_bank;
pub mod fund_bank;
pub mod gamble;
pub mod settle_wager;
pub mod rotate_seed;

pub use init_bank::*;
pub use fund_bank::*;
pub use gamble::*;
pub use settle_wager::*;
pub use rotate_seed::*;
