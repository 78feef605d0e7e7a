// state/mod.rs
pub mod bank;
pub mod wager;

pub use bank::*;
pub use wager::*;
