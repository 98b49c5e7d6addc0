//! Domain layer: field metadata, deck construction and change-set merging.

pub mod changes;
pub mod deck;
pub mod fields;

pub use deck::{standard_deck, AcePolicy, DeckCard, Rank, Suit};
pub use fields::EntityKind;

/// Conventional stack labels.
pub mod labels {
    pub const HAND: &str = "hand";
    pub const IN_PLAY: &str = "in play";
    pub const DRAW_PILE: &str = "draw pile";
    pub const DISCARDS: &str = "discards";

    pub const COMMON_STACKS: [&str; 4] = [HAND, IN_PLAY, DRAW_PILE, DISCARDS];
}
