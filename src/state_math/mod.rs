pub mod tick;
pub mod tick_array;

pub use tick::*;
pub use tick_array::*;
