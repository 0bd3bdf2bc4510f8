pub mod bn;
pub mod liquidity_math;
pub mod price_math;
pub mod swap_math;
pub mod tick_math;
pub mod token_math;

pub use bn::*;
pub use liquidity_math::*;
pub use price_math::*;
pub use swap_math::*;
pub use tick_math::*;
pub use token_math::*;
