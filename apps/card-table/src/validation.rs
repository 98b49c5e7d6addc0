//! Parameter and record checks shared by the command operations and the REST handlers.

use sea_orm::{ConnectionTrait, EntityTrait, PrimaryKeyTrait};
use serde_json::{Map, Value};
use tracing::debug;

use crate::domain::EntityKind;
use crate::errors::domain::DomainError;

/// Look up `name` in `data`.
///
/// Absent keys are `MissingParameter`; present but falsy values (`null`,
/// `false`, `0`, `""`, `[]`, `{}`) are `InvalidParameter`.
pub fn require_param<'a>(name: &str, data: &'a Map<String, Value>) -> Result<&'a Value, DomainError> {
    let value = data.get(name).ok_or_else(|| DomainError::missing(name))?;
    if is_falsy(value) {
        return Err(DomainError::invalid(name, format!("Got {value}")));
    }
    Ok(value)
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

/// Record ids arrive as JSON integers or as digit strings.
pub fn parse_record_id(name: &str, value: &Value) -> Result<i64, DomainError> {
    let id = match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) => s.parse().ok(),
        _ => None,
    };
    id.ok_or_else(|| DomainError::invalid(name, format!("Expected a record id, got {value}")))
}

/// `require_param` the id under `name`, then load the record it references.
/// A dangling id is `InvalidParameter`, not a 404: the request is at fault.
pub async fn require_record<E, C>(
    conn: &C,
    name: &str,
    data: &Map<String, Value>,
) -> Result<E::Model, DomainError>
where
    E: EntityTrait,
    <E::PrimaryKey as PrimaryKeyTrait>::ValueType: From<i64>,
    C: ConnectionTrait,
{
    let id = parse_record_id(name, require_param(name, data)?)?;

    match E::find_by_id(id).one(conn).await? {
        Some(record) => Ok(record),
        None => {
            debug!(param = name, id, "referenced record does not exist");
            Err(DomainError::invalid(name, format!("No record with id {id}")))
        }
    }
}

/// Reject any key of `props` that is protected for `kind` (or immutable,
/// unless `allow_immutables`), except those listed in `exceptions`.
pub fn ensure_modifiable(
    kind: EntityKind,
    props: &Map<String, Value>,
    exceptions: &[&str],
    allow_immutables: bool,
) -> Result<(), DomainError> {
    let immutables: &[&str] = if allow_immutables {
        &[]
    } else {
        kind.immutable_fields()
    };

    let offending: Vec<&str> = kind
        .protected_fields()
        .iter()
        .chain(immutables)
        .copied()
        .filter(|field| !exceptions.contains(field) && props.contains_key(*field))
        .collect();

    if offending.is_empty() {
        return Ok(());
    }

    debug!(entity = kind.name(), fields = ?offending, "rejected write to unmodifiable fields");
    Err(DomainError::invalid(
        offending.join(", "),
        "One or more properties are not modifiable.",
    ))
}
