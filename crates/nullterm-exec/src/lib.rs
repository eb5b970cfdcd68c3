pub mod clock;
pub mod timers;

pub use clock::*;
pub use timers::*;
