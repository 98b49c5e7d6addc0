//! Card write services.

use sea_orm::ConnectionTrait;

use crate::domain::changes::{apply_card_changes, ChangeSet};
use crate::domain::EntityKind;
use crate::entities::{cards, stacks};
use crate::errors::domain::DomainError;
use crate::repos::cards as cards_repo;
use crate::validation::{ensure_modifiable, require_record};

#[derive(Debug, Default, Clone, Copy)]
pub struct CardService;

impl CardService {
    pub fn new() -> Self {
        Self
    }

    pub async fn create<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        body: &ChangeSet,
    ) -> Result<cards::Model, DomainError> {
        ensure_modifiable(EntityKind::Card, body, &[], true)?;
        require_record::<stacks::Entity, _>(conn, "stack_id", body).await?;

        let mut active = cards::ActiveModel::default();
        apply_card_changes(&mut active, body, &[])?;
        cards_repo::create(conn, active).await
    }

    pub async fn patch<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        card_id: i64,
        body: &ChangeSet,
    ) -> Result<cards::Model, DomainError> {
        let card = cards_repo::require(conn, card_id).await?;
        ensure_modifiable(EntityKind::Card, body, &[], false)?;
        if body.contains_key("stack_id") {
            require_record::<stacks::Entity, _>(conn, "stack_id", body).await?;
        }

        cards_repo::merge(conn, card, body, &[]).await
    }
}
