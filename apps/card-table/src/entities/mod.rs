pub mod cards;
pub mod commands;
pub mod games;
pub mod stacks;

pub use cards::Entity as Cards;
pub use cards::Facing;
pub use cards::Model as Card;
pub use commands::Entity as Commands;
pub use commands::Model as Command;
pub use games::Entity as Games;
pub use games::GameState;
pub use games::Model as Game;
pub use stacks::Entity as Stacks;
pub use stacks::Model as Stack;
