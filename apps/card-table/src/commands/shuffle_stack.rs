//! `shuffle-stack`: randomly reorder the cards of one stack.

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sea_orm::ConnectionTrait;
use serde_json::{Map, Value};
use tracing::debug;

use crate::entities::stacks;
use crate::errors::domain::DomainError;
use crate::repos::cards as cards_repo;
use crate::validation::require_record;

/// Source of uniform draws for shuffling
pub trait DrawSource: Send {
    /// A uniform index in `[0, upper)`; `upper` is never zero.
    fn draw(&mut self, upper: usize) -> usize;
}

/// OS-seeded CSPRNG draws
pub struct OsDraws(StdRng);

impl OsDraws {
    pub fn new() -> Self {
        Self(StdRng::from_os_rng())
    }
}

impl Default for OsDraws {
    fn default() -> Self {
        Self::new()
    }
}

impl DrawSource for OsDraws {
    fn draw(&mut self, upper: usize) -> usize {
        self.0.random_range(0..upper)
    }
}

/// A fixed draw sequence, for reproducing a specific shuffle.
///
/// Draws past the end of the script are 0. A scripted value outside
/// `[0, upper)` panics.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDraws {
    script: VecDeque<usize>,
    taken: usize,
}

impl ScriptedDraws {
    pub fn new(script: impl IntoIterator<Item = usize>) -> Self {
        Self {
            script: script.into_iter().collect(),
            taken: 0,
        }
    }

    /// Number of draws made so far.
    pub fn taken(&self) -> usize {
        self.taken
    }
}

impl DrawSource for ScriptedDraws {
    fn draw(&mut self, upper: usize) -> usize {
        self.taken += 1;
        let value = self.script.pop_front().unwrap_or(0);
        assert!(
            value < upper,
            "scripted draw {} is {value}, outside [0, {upper})",
            self.taken
        );
        value
    }
}

/// Remove-and-append shuffle: draw an index into the cards still remaining,
/// take that card out and append it to the result. One draw per item.
pub fn shuffle_order<T>(items: Vec<T>, draws: &mut dyn DrawSource) -> Vec<T> {
    let mut remaining = items;
    let mut ordered = Vec::with_capacity(remaining.len());
    while !remaining.is_empty() {
        let index = draws.draw(remaining.len());
        ordered.push(remaining.remove(index));
    }
    ordered
}

pub async fn run<C>(
    conn: &C,
    changes: &Map<String, Value>,
    draws: &mut dyn DrawSource,
) -> Result<(), DomainError>
where
    C: ConnectionTrait + Send + Sync,
{
    let stack = require_record::<stacks::Entity, _>(conn, "stack_id", changes).await?;
    let cards = cards_repo::find_by_stack(conn, stack.id).await?;
    let count = cards.len();

    for (position, card) in shuffle_order(cards, draws).into_iter().enumerate() {
        let position = position as i32;
        if card.position != position {
            cards_repo::set_position(conn, card, position).await?;
        }
    }

    debug!(stack_id = stack.id, count, "stack shuffled");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use proptest::prelude::*;

    use super::*;

    #[test]
    fn scripted_draws_reproduce_known_order() {
        let mut draws = ScriptedDraws::new([2, 1, 0, 0]);
        let order = shuffle_order(vec![1, 2, 3, 4], &mut draws);

        assert_eq!(order, vec![3, 2, 1, 4]);
        assert_eq!(draws.taken(), 4);
    }

    #[test]
    fn empty_input_draws_nothing() {
        let mut draws = ScriptedDraws::default();
        let order: Vec<i64> = shuffle_order(Vec::new(), &mut draws);

        assert!(order.is_empty());
        assert_eq!(draws.taken(), 0);
    }

    #[test]
    #[should_panic(expected = "outside [0, 2)")]
    fn scripted_draw_out_of_range_panics() {
        let mut draws = ScriptedDraws::new([1, 5]);
        shuffle_order(vec!['a', 'b', 'c'], &mut draws);
    }

    #[test]
    fn os_draws_stay_in_range() {
        let mut draws = OsDraws::new();
        for upper in 1..60 {
            assert!(draws.draw(upper) < upper);
        }
    }

    proptest! {
        #[test]
        fn shuffle_is_a_permutation(len in 0usize..60, script in proptest::collection::vec(0usize..64, 0..60)) {
            let items: Vec<usize> = (0..len).collect();
            // fold each raw value into the range of the draw it feeds
            let script = script.into_iter().take(len).enumerate().map(|(i, raw)| raw % (len - i));
            let mut draws = ScriptedDraws::new(script);
            let order = shuffle_order(items.clone(), &mut draws);

            prop_assert_eq!(order.len(), len);
            prop_assert_eq!(draws.taken(), len);
            let seen: HashSet<usize> = order.into_iter().collect();
            prop_assert_eq!(seen, items.into_iter().collect::<HashSet<_>>());
        }
    }
}
