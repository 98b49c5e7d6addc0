//! `create-deck`: fill a stack with a standard 52-card deck.

use sea_orm::{ConnectionTrait, Set};
use serde_json::{Map, Value};
use tracing::debug;

use crate::domain::deck::{standard_deck, AcePolicy};
use crate::entities::{cards, stacks, Facing};
use crate::errors::domain::DomainError;
use crate::repos::cards as cards_repo;
use crate::validation::require_record;

/// `ace` is optional and defaults to low.
pub fn ace_policy(changes: &Map<String, Value>) -> Result<AcePolicy, DomainError> {
    match changes.get("ace") {
        None => Ok(AcePolicy::default()),
        Some(Value::String(name)) => AcePolicy::from_name(name)
            .ok_or_else(|| DomainError::invalid("ace", format!("Expected high or low, got {name}"))),
        Some(other) => Err(DomainError::invalid("ace", format!("Expected high or low, got {other}"))),
    }
}

/// Card rows for a fresh deck on `stack_id`, in position order.
pub fn deck_rows(stack_id: i64, ace: AcePolicy) -> Vec<cards::ActiveModel> {
    standard_deck(ace)
        .into_iter()
        .enumerate()
        .map(|(position, card)| cards::ActiveModel {
            stack_id: Set(stack_id),
            position: Set(position as i32),
            owner_facing: Set(Facing::Down),
            other_facing: Set(Facing::Down),
            suit: Set(Some(card.suit.name().to_string())),
            suit_value: Set(Some(card.suit.value())),
            rank: Set(Some(card.rank.name().to_string())),
            rank_value: Set(Some(card.rank_value)),
            ..Default::default()
        })
        .collect()
}

pub async fn run<C>(conn: &C, changes: &Map<String, Value>) -> Result<Vec<cards::Model>, DomainError>
where
    C: ConnectionTrait + Send + Sync,
{
    let stack = require_record::<stacks::Entity, _>(conn, "stack_id", changes).await?;
    let ace = ace_policy(changes)?;

    // positions 0..51 must not collide with cards already in the stack
    let existing = cards_repo::count_in_stack(conn, stack.id).await?;
    if existing > 0 {
        debug!(stack_id = stack.id, existing, "deck target is not empty");
        return Err(DomainError::invalid(
            "stack_id",
            format!("Stack {} already holds {existing} cards", stack.id),
        ));
    }

    let created = cards_repo::insert_all(conn, stack.id, deck_rows(stack.id, ace)).await?;
    debug!(stack_id = stack.id, ace = %ace, count = created.len(), "deck created");
    Ok(created)
}

#[cfg(test)]
mod tests {
    use sea_orm::ActiveValue;
    use serde_json::json;

    use super::*;

    fn obj(v: Value) -> Map<String, Value> {
        match v {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn ace_defaults_to_low() {
        assert_eq!(ace_policy(&obj(json!({"stack_id": 1}))).unwrap(), AcePolicy::Low);
        assert_eq!(ace_policy(&obj(json!({"ace": "high"}))).unwrap(), AcePolicy::High);
    }

    #[test]
    fn other_ace_values_are_invalid() {
        for bad in [json!("middle"), json!(1), json!(null), json!(true)] {
            let err = ace_policy(&obj(json!({ "ace": bad }))).unwrap_err();
            assert_eq!(err.param_name(), Some("ace"));
        }
    }

    #[test]
    fn rows_are_positioned_face_down() {
        let rows = deck_rows(9, AcePolicy::High);
        assert_eq!(rows.len(), 52);

        for (i, row) in rows.iter().enumerate() {
            assert_eq!(row.stack_id, ActiveValue::Set(9));
            assert_eq!(row.position, ActiveValue::Set(i as i32));
            assert_eq!(row.owner_facing, ActiveValue::Set(Facing::Down));
            assert_eq!(row.other_facing, ActiveValue::Set(Facing::Down));
            assert!(row.id.is_not_set());
        }
        assert_eq!(rows[12].rank, ActiveValue::Set(Some("ace".to_string())));
        assert_eq!(rows[12].rank_value, ActiveValue::Set(Some(14)));
        assert_eq!(rows[51].suit, ActiveValue::Set(Some("spade".to_string())));
    }
}
