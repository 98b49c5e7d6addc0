//! Card repository functions.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, IntoActiveModel, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use serde::Deserialize;
use time::OffsetDateTime;

use crate::domain::changes::{apply_card_changes, ChangeSet};
use crate::entities::cards::{self, Facing};
use crate::errors::domain::{DomainError, NotFoundKind};

#[derive(Debug, Default, Clone, Deserialize)]
pub struct CardFilter {
    pub stack_id: Option<i64>,
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    card_id: i64,
) -> Result<Option<cards::Model>, DomainError> {
    Ok(cards::Entity::find_by_id(card_id).one(conn).await?)
}

pub async fn require<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    card_id: i64,
) -> Result<cards::Model, DomainError> {
    find_by_id(conn, card_id)
        .await?
        .ok_or_else(|| DomainError::not_found(NotFoundKind::Card, format!("Card {card_id} not found")))
}

/// Cards of a stack, top first; ties on position fall back to id.
pub async fn find_by_stack<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    stack_id: i64,
) -> Result<Vec<cards::Model>, DomainError> {
    Ok(cards::Entity::find()
        .filter(cards::Column::StackId.eq(stack_id))
        .order_by_asc(cards::Column::Position)
        .order_by_asc(cards::Column::Id)
        .all(conn)
        .await?)
}

pub async fn list<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    filter: &CardFilter,
) -> Result<Vec<cards::Model>, DomainError> {
    match filter.stack_id {
        Some(stack_id) => find_by_stack(conn, stack_id).await,
        None => Ok(cards::Entity::find()
            .order_by_asc(cards::Column::Id)
            .all(conn)
            .await?),
    }
}

pub async fn create<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    mut card: cards::ActiveModel,
) -> Result<cards::Model, DomainError> {
    let now = OffsetDateTime::now_utc();
    if card.position.is_not_set() {
        card.position = Set(0);
    }
    if card.owner_facing.is_not_set() {
        card.owner_facing = Set(Facing::Down);
    }
    if card.other_facing.is_not_set() {
        card.other_facing = Set(Facing::Down);
    }
    card.created_at = Set(now);
    card.updated_at = Set(now);
    Ok(card.insert(conn).await?)
}

/// Insert `cards` into `stack_id` with one multi-row statement, then return
/// the stack's cards, top first.
pub async fn insert_all<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    stack_id: i64,
    cards: Vec<cards::ActiveModel>,
) -> Result<Vec<cards::Model>, DomainError> {
    if !cards.is_empty() {
        let now = OffsetDateTime::now_utc();
        let rows = cards.into_iter().map(|mut card| {
            card.stack_id = Set(stack_id);
            card.created_at = Set(now);
            card.updated_at = Set(now);
            card
        });
        cards::Entity::insert_many(rows).exec(conn).await?;
    }
    find_by_stack(conn, stack_id).await
}

pub async fn count_in_stack<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    stack_id: i64,
) -> Result<u64, DomainError> {
    Ok(cards::Entity::find()
        .filter(cards::Column::StackId.eq(stack_id))
        .count(conn)
        .await?)
}

pub async fn update<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    mut card: cards::ActiveModel,
) -> Result<cards::Model, DomainError> {
    card.updated_at = Set(OffsetDateTime::now_utc());
    Ok(card.update(conn).await?)
}

/// Apply a change-set onto a loaded card and persist it; fields the
/// change-set does not name keep their stored values.
pub async fn merge<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    card: cards::Model,
    changes: &ChangeSet,
    skip: &[&str],
) -> Result<cards::Model, DomainError> {
    let mut active = card.into_active_model();
    apply_card_changes(&mut active, changes, skip)?;
    update(conn, active).await
}

pub async fn set_position<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    card: cards::Model,
    position: i32,
) -> Result<cards::Model, DomainError> {
    let mut active = card.into_active_model();
    active.position = Set(position);
    update(conn, active).await
}

pub async fn delete<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    card_id: i64,
) -> Result<bool, DomainError> {
    let result = cards::Entity::delete_by_id(card_id).exec(conn).await?;
    Ok(result.rows_affected > 0)
}
