pub mod liquidity;
pub mod swap;

pub use liquidity::*;
pub use swap::*;
