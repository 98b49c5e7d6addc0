//! Command dispatcher: turns a stored command row into validated mutations.
//!
//! `execute` runs inside the caller's transaction and never commits or rolls
//! back; any error leaves the rollback to the transaction owner.

pub mod create_deck;
pub mod move_cards;
pub mod shuffle_stack;

use std::fmt;
use std::str::FromStr;

use sea_orm::ConnectionTrait;
use serde_json::{Map, Value};
use tracing::{debug, info};

pub use shuffle_stack::{DrawSource, OsDraws, ScriptedDraws};

use crate::entities::{cards, commands};
use crate::errors::domain::DomainError;

/// The command vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    CreateDeck,
    MoveCards,
    NoOp,
    ShuffleStack,
}

impl Operation {
    pub const ALL: [Operation; 4] = [
        Operation::CreateDeck,
        Operation::MoveCards,
        Operation::NoOp,
        Operation::ShuffleStack,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Operation::CreateDeck => "create-deck",
            Operation::MoveCards => "move-cards",
            Operation::NoOp => "no-op",
            Operation::ShuffleStack => "shuffle-stack",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operation::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| DomainError::unknown_operation(s))
    }
}

/// Decode a command's stored `changes` text into a JSON object.
pub fn decode_changes(changes: Option<&str>) -> Result<Map<String, Value>, DomainError> {
    let text = match changes {
        Some(text) if !text.trim().is_empty() => text,
        _ => return Err(DomainError::missing("changes")),
    };

    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(DomainError::invalid("changes", "Expected a JSON object")),
        Err(_) => Err(DomainError::invalid("changes", "Invalid JSON")),
    }
}

/// Execute a persisted command against `conn`.
///
/// Returns the created cards for `create-deck` and `None` for every other operation.
pub async fn execute<C>(
    conn: &C,
    command: &commands::Model,
    draws: &mut dyn DrawSource,
) -> Result<Option<Vec<cards::Model>>, DomainError>
where
    C: ConnectionTrait + Send + Sync,
{
    let operation: Operation = command.operation.parse().inspect_err(|_| {
        debug!(command_id = command.id, operation = %command.operation, "unknown operation");
    })?;
    let changes = decode_changes(command.changes.as_deref()).inspect_err(|e| {
        debug!(command_id = command.id, error = %e, "undecodable changes");
    })?;

    info!(
        operation = %operation,
        command_id = command.id,
        game_id = command.game_id,
        actor_id = command.actor_id,
        "executing command"
    );

    match operation {
        Operation::CreateDeck => create_deck::run(conn, &changes).await.map(Some),
        Operation::MoveCards => move_cards::run(conn, &changes).await.map(|_| None),
        Operation::NoOp => Ok(None),
        Operation::ShuffleStack => shuffle_stack::run(conn, &changes, draws).await.map(|_| None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operation_names_round_trip() {
        for op in Operation::ALL {
            assert_eq!(op.as_str().parse::<Operation>().unwrap(), op);
        }
    }

    #[test]
    fn unknown_operation_is_rejected() {
        let err = "invalid".parse::<Operation>().unwrap_err();
        assert_eq!(err, DomainError::unknown_operation("invalid"));

        // names are matched exactly
        assert!("noop".parse::<Operation>().is_err());
        assert!("Create-Deck".parse::<Operation>().is_err());
    }

    #[test]
    fn absent_or_empty_changes_are_missing() {
        assert_eq!(decode_changes(None).unwrap_err(), DomainError::missing("changes"));
        assert_eq!(decode_changes(Some("")).unwrap_err(), DomainError::missing("changes"));
        assert_eq!(decode_changes(Some("  ")).unwrap_err(), DomainError::missing("changes"));
    }

    #[test]
    fn unparseable_changes_are_invalid_json() {
        let err = decode_changes(Some("{not json")).unwrap_err();
        assert_eq!(err, DomainError::invalid("changes", "Invalid JSON"));
    }

    #[test]
    fn changes_must_be_an_object() {
        let err = decode_changes(Some("[1, 2]")).unwrap_err();
        assert_eq!(err.param_name(), Some("changes"));

        let map = decode_changes(Some(r#"{"stack_id": 3}"#)).unwrap();
        assert_eq!(map.get("stack_id"), Some(&Value::from(3)));
    }
}
