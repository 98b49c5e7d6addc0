//! Write paths for the REST surface: field checks, reference checks, then persistence.

pub mod cards;
pub mod commands;
pub mod games;
pub mod stacks;

pub use cards::CardService;
pub use commands::{CommandOutcome, CommandService, CommandView};
pub use games::GameService;
pub use stacks::StackService;
