//! Command implementations for the loom CLI
//!
//! Each command lives in its own submodule.

mod generate;
mod materialize;
mod preview;
mod stacks;

pub use generate::execute as generate;
pub use materialize::execute as materialize;
pub use preview::execute as preview;
pub use stacks::execute as list_stacks;
