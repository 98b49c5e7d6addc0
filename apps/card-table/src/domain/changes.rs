//! Merging of client-supplied JSON change-sets onto active models.
//!
//! Callers run `ensure_modifiable` first; these functions only check that
//! each key names a real field and that each value has the right type.
//! Keys listed in `skip` were consumed by the caller (selectors such as a
//! card's `id`) and are ignored.

use sea_orm::ActiveValue::Set;
use serde_json::{Map, Value};

use crate::commands::{decode_changes, Operation};
use crate::entities::{cards, commands, games, stacks, Facing, GameState};
use crate::errors::domain::DomainError;
use crate::validation::parse_record_id;

pub type ChangeSet = Map<String, Value>;

const GAME_FIELDS: &[&str] = &["name", "state"];
const STACK_FIELDS: &[&str] = &["owner_id", "label", "size_visibility", "size_limit"];
const CARD_FIELDS: &[&str] = &[
    "stack_id",
    "position",
    "owner_facing",
    "other_facing",
    "suit",
    "suit_value",
    "rank",
    "rank_value",
];
const COMMAND_FIELDS: &[&str] = &["game_id", "actor_id", "operation", "changes", "memo"];

fn reject_unknown(
    changes: &ChangeSet,
    known: &[&str],
    skip: &[&str],
    entity: &str,
) -> Result<(), DomainError> {
    match changes
        .keys()
        .find(|k| !known.contains(&k.as_str()) && !skip.contains(&k.as_str()))
    {
        Some(key) => Err(DomainError::invalid(key.as_str(), format!("Unknown {entity} field"))),
        None => Ok(()),
    }
}

pub fn apply_game_changes(
    active: &mut games::ActiveModel,
    changes: &ChangeSet,
    skip: &[&str],
) -> Result<(), DomainError> {
    reject_unknown(changes, GAME_FIELDS, skip, "game")?;

    if let Some(v) = changes.get("name") {
        active.name = Set(opt_string("name", v)?);
    }
    if let Some(v) = changes.get("state") {
        active.state = Set(game_state("state", v)?);
    }
    Ok(())
}

pub fn apply_stack_changes(
    active: &mut stacks::ActiveModel,
    changes: &ChangeSet,
    skip: &[&str],
) -> Result<(), DomainError> {
    reject_unknown(changes, STACK_FIELDS, skip, "stack")?;

    if let Some(v) = changes.get("owner_id") {
        active.owner_id = Set(non_negative("owner_id", v)?);
    }
    if let Some(v) = changes.get("label") {
        active.label = Set(opt_string("label", v)?);
    }
    if let Some(v) = changes.get("size_visibility") {
        active.size_visibility = Set(opt_count("size_visibility", v)?);
    }
    if let Some(v) = changes.get("size_limit") {
        active.size_limit = Set(opt_count("size_limit", v)?);
    }
    Ok(())
}

pub fn apply_card_changes(
    active: &mut cards::ActiveModel,
    changes: &ChangeSet,
    skip: &[&str],
) -> Result<(), DomainError> {
    reject_unknown(changes, CARD_FIELDS, skip, "card")?;

    if let Some(v) = changes.get("stack_id") {
        active.stack_id = Set(parse_record_id("stack_id", v)?);
    }
    if let Some(v) = changes.get("position") {
        active.position = Set(count("position", v)?);
    }
    if let Some(v) = changes.get("owner_facing") {
        active.owner_facing = Set(facing("owner_facing", v)?);
    }
    if let Some(v) = changes.get("other_facing") {
        active.other_facing = Set(facing("other_facing", v)?);
    }
    if let Some(v) = changes.get("suit") {
        active.suit = Set(opt_string("suit", v)?);
    }
    if let Some(v) = changes.get("suit_value") {
        active.suit_value = Set(opt_i32("suit_value", v)?);
    }
    if let Some(v) = changes.get("rank") {
        active.rank = Set(opt_string("rank", v)?);
    }
    if let Some(v) = changes.get("rank_value") {
        active.rank_value = Set(opt_i32("rank_value", v)?);
    }
    Ok(())
}

/// `operation` is checked before `changes` so that an unknown operation is
/// reported ahead of a malformed payload.
pub fn apply_command_changes(
    active: &mut commands::ActiveModel,
    changes: &ChangeSet,
    skip: &[&str],
) -> Result<(), DomainError> {
    reject_unknown(changes, COMMAND_FIELDS, skip, "command")?;

    if let Some(v) = changes.get("game_id") {
        active.game_id = Set(parse_record_id("game_id", v)?);
    }
    if let Some(v) = changes.get("actor_id") {
        active.actor_id = Set(parse_record_id("actor_id", v)?);
    }
    if let Some(v) = changes.get("operation") {
        let name = string("operation", v)?;
        let op: Operation = name.parse()?;
        active.operation = Set(op.as_str().to_string());
    }
    if let Some(v) = changes.get("changes") {
        active.changes = Set(encoded_changes(v)?);
    }
    if let Some(v) = changes.get("memo") {
        active.memo = Set(opt_string("memo", v)?);
    }
    Ok(())
}

/// Commands carry their payload as text; accept either that text or the
/// object itself. Text must decode to a JSON object.
fn encoded_changes(value: &Value) -> Result<Option<String>, DomainError> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => {
            decode_changes(Some(s.as_str()))?;
            Ok(Some(s.clone()))
        }
        Value::Object(_) => Ok(Some(value.to_string())),
        _ => Err(DomainError::invalid("changes", "Expected a JSON object")),
    }
}

fn integer(name: &str, value: &Value) -> Result<i64, DomainError> {
    value
        .as_i64()
        .ok_or_else(|| DomainError::invalid(name, "Expected an integer"))
}

fn non_negative(name: &str, value: &Value) -> Result<i64, DomainError> {
    let n = integer(name, value)?;
    if n < 0 {
        return Err(DomainError::invalid(name, "Must not be negative"));
    }
    Ok(n)
}

fn count(name: &str, value: &Value) -> Result<i32, DomainError> {
    let n = non_negative(name, value)?;
    i32::try_from(n).map_err(|_| DomainError::invalid(name, "Out of range"))
}

fn opt_count(name: &str, value: &Value) -> Result<Option<i32>, DomainError> {
    if value.is_null() {
        return Ok(None);
    }
    count(name, value).map(Some)
}

fn opt_i32(name: &str, value: &Value) -> Result<Option<i32>, DomainError> {
    if value.is_null() {
        return Ok(None);
    }
    let n = integer(name, value)?;
    i32::try_from(n)
        .map(Some)
        .map_err(|_| DomainError::invalid(name, "Out of range"))
}

fn string(name: &str, value: &Value) -> Result<String, DomainError> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| DomainError::invalid(name, "Expected a string"))
}

fn opt_string(name: &str, value: &Value) -> Result<Option<String>, DomainError> {
    if value.is_null() {
        return Ok(None);
    }
    string(name, value).map(Some)
}

/// A facing is given by name (`"up"`) or by its stored value (`3`).
fn facing(name: &str, value: &Value) -> Result<Facing, DomainError> {
    let parsed = match value {
        Value::String(s) => Facing::from_name(s),
        Value::Number(n) => n.as_i64().and_then(Facing::from_value),
        _ => None,
    };
    parsed.ok_or_else(|| DomainError::invalid(name, "Expected down, revealed, peeking or up"))
}

fn game_state(name: &str, value: &Value) -> Result<GameState, DomainError> {
    value
        .as_str()
        .and_then(|s| serde_json::from_value::<GameState>(Value::String(s.to_string())).ok())
        .ok_or_else(|| DomainError::invalid(name, "Unknown game state"))
}
