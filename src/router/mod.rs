pub mod fetcher;
pub mod processor;
pub mod ranker;
pub mod typedefs;

pub use fetcher::*;
pub use processor::*;
pub use typedefs::*;
