//! Standard 52-card deck construction.

use std::fmt;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Suit {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
}

impl Suit {
    /// Canonical deck order.
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];

    /// Singular display name as stored on a card row.
    pub fn name(self) -> &'static str {
        match self {
            Suit::Clubs => "club",
            Suit::Diamonds => "diamond",
            Suit::Hearts => "heart",
            Suit::Spades => "spade",
        }
    }

    /// Sortable ordinal, clubs=1 through spades=4.
    pub fn value(self) -> i32 {
        match self {
            Suit::Clubs => 1,
            Suit::Diamonds => 2,
            Suit::Hearts => 3,
            Suit::Spades => 4,
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Rank {
    Ace,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
}

impl Rank {
    const PIPS: [Rank; 12] = [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Rank::Ace => "ace",
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "jack",
            Rank::Queen => "queen",
            Rank::King => "king",
        }
    }

    /// Effective rank under the given ace policy.
    pub fn value(self, ace: AcePolicy) -> i32 {
        match self {
            Rank::Ace => match ace {
                AcePolicy::Low => 1,
                AcePolicy::High => 14,
            },
            Rank::Two => 2,
            Rank::Three => 3,
            Rank::Four => 4,
            Rank::Five => 5,
            Rank::Six => 6,
            Rank::Seven => 7,
            Rank::Eight => 8,
            Rank::Nine => 9,
            Rank::Ten => 10,
            Rank::Jack => 11,
            Rank::Queen => 12,
            Rank::King => 13,
        }
    }

    /// All ranks in ascending order of their effective value.
    pub fn ascending(ace: AcePolicy) -> Vec<Rank> {
        let mut ranks = Vec::with_capacity(13);
        if ace == AcePolicy::Low {
            ranks.push(Rank::Ace);
        }
        ranks.extend(Self::PIPS);
        if ace == AcePolicy::High {
            ranks.push(Rank::Ace);
        }
        ranks
    }
}

/// Whether the ace ranks below the two or above the king
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum AcePolicy {
    #[default]
    Low,
    High,
}

impl AcePolicy {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "low" => Some(AcePolicy::Low),
            "high" => Some(AcePolicy::High),
            _ => None,
        }
    }
}

impl fmt::Display for AcePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AcePolicy::Low => f.write_str("low"),
            AcePolicy::High => f.write_str("high"),
        }
    }
}

/// Card attributes before the card is attached to a stack
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckCard {
    pub suit: Suit,
    pub rank: Rank,
    pub rank_value: i32,
}

/// A full deck, suits in canonical order and ranks ascending within each suit.
/// The index of a card in the returned vector is its stack position.
pub fn standard_deck(ace: AcePolicy) -> Vec<DeckCard> {
    let ranks = Rank::ascending(ace);
    let mut deck = Vec::with_capacity(52);
    for suit in Suit::ALL {
        for &rank in &ranks {
            deck.push(DeckCard {
                suit,
                rank,
                rank_value: rank.value(ace),
            });
        }
    }
    deck
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn deck_has_52_unique_cards() {
        let deck = standard_deck(AcePolicy::Low);
        assert_eq!(deck.len(), 52);

        let unique: HashSet<(Suit, Rank)> = deck.iter().map(|c| (c.suit, c.rank)).collect();
        assert_eq!(unique.len(), 52);

        for suit in Suit::ALL {
            assert_eq!(deck.iter().filter(|c| c.suit == suit).count(), 13);
        }
    }

    #[test]
    fn low_aces_open_each_suit() {
        let deck = standard_deck(AcePolicy::Low);
        assert_eq!(deck[0].suit, Suit::Clubs);
        assert_eq!(deck[0].rank, Rank::Ace);
        assert_eq!(deck[0].rank_value, 1);
        assert_eq!(deck[12].rank, Rank::King);
        assert_eq!(deck[12].rank_value, 13);
        assert_eq!(deck[13].suit, Suit::Diamonds);
        assert_eq!(deck[51].suit, Suit::Spades);
    }

    #[test]
    fn high_aces_close_each_suit() {
        let deck = standard_deck(AcePolicy::High);
        assert_eq!(deck[0].rank, Rank::Two);
        assert_eq!(deck[0].rank_value, 2);
        assert_eq!(deck[12].rank, Rank::Ace);
        assert_eq!(deck[12].rank_value, 14);

        let values: Vec<i32> = deck[..13].iter().map(|c| c.rank_value).collect();
        assert_eq!(values, (2..=14).collect::<Vec<_>>());
    }

    #[test]
    fn display_names() {
        assert_eq!(Suit::Hearts.name(), "heart");
        assert_eq!(Suit::Spades.value(), 4);
        assert_eq!(Rank::Ten.name(), "10");
        assert_eq!(AcePolicy::from_name("high"), Some(AcePolicy::High));
        assert_eq!(AcePolicy::from_name("HIGH"), None);
        assert_eq!(AcePolicy::default().to_string(), "low");
    }
}
