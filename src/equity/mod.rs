pub mod estimate;
pub use estimate::*;

pub mod simulator;
pub use simulator::*;

pub mod tally;
pub use tally::*;
