//! `move-cards`: apply per-card change-sets (stack, position, facing, ...).

use sea_orm::ConnectionTrait;
use serde_json::{Map, Value};
use tracing::debug;

use crate::domain::EntityKind;
use crate::entities::{cards, stacks};
use crate::errors::domain::DomainError;
use crate::repos::cards as cards_repo;
use crate::validation::{ensure_modifiable, require_param, require_record};

/// Entries are applied in order and each is persisted as it goes; a failing
/// entry leaves earlier writes staged in `conn` for the caller to roll back.
pub async fn run<C>(conn: &C, changes: &Map<String, Value>) -> Result<(), DomainError>
where
    C: ConnectionTrait + Send + Sync,
{
    let entries = require_param("cards", changes)?
        .as_array()
        .ok_or_else(|| DomainError::invalid("cards", "Expected an array of card changes"))?;

    for entry in entries {
        let entry = entry
            .as_object()
            .ok_or_else(|| DomainError::invalid("cards", "Each card change must be an object"))?;

        let card = require_record::<cards::Entity, _>(conn, "id", entry).await?;
        ensure_modifiable(EntityKind::Card, entry, &["id"], false)?;
        if entry.contains_key("stack_id") {
            require_record::<stacks::Entity, _>(conn, "stack_id", entry).await?;
        }

        let card_id = card.id;
        cards_repo::merge(conn, card, entry, &["id"]).await?;
        debug!(card_id, "card moved");
    }

    Ok(())
}
