// utils/mod.rs
pub mod randomness;
pub mod settlement;
pub mod validation;

pub use randomness::*;
pub use settlement::*;
pub use validation::*;
