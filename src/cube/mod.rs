pub mod cubie;
pub mod facelet;
pub mod moves;

pub use cubie::*;
pub use facelet::*;
pub use moves::*;
