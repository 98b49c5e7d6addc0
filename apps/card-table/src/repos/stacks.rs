//! Stack repository functions.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use serde::Deserialize;
use time::OffsetDateTime;

use crate::entities::stacks;
use crate::errors::domain::{DomainError, NotFoundKind};

#[derive(Debug, Default, Clone, Deserialize)]
pub struct StackFilter {
    pub game_id: Option<i64>,
    pub owner_id: Option<i64>,
    pub label: Option<String>,
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    stack_id: i64,
) -> Result<Option<stacks::Model>, DomainError> {
    Ok(stacks::Entity::find_by_id(stack_id).one(conn).await?)
}

pub async fn require<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    stack_id: i64,
) -> Result<stacks::Model, DomainError> {
    find_by_id(conn, stack_id).await?.ok_or_else(|| {
        DomainError::not_found(NotFoundKind::Stack, format!("Stack {stack_id} not found"))
    })
}

pub async fn list<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    filter: &StackFilter,
) -> Result<Vec<stacks::Model>, DomainError> {
    let mut query = stacks::Entity::find();
    if let Some(game_id) = filter.game_id {
        query = query.filter(stacks::Column::GameId.eq(game_id));
    }
    if let Some(owner_id) = filter.owner_id {
        query = query.filter(stacks::Column::OwnerId.eq(owner_id));
    }
    if let Some(label) = &filter.label {
        query = query.filter(stacks::Column::Label.eq(label.as_str()));
    }
    Ok(query.order_by_asc(stacks::Column::Id).all(conn).await?)
}

pub async fn create<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    mut stack: stacks::ActiveModel,
) -> Result<stacks::Model, DomainError> {
    let now = OffsetDateTime::now_utc();
    if stack.owner_id.is_not_set() {
        stack.owner_id = Set(0);
    }
    stack.created_at = Set(now);
    stack.updated_at = Set(now);
    Ok(stack.insert(conn).await?)
}

pub async fn update<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    mut stack: stacks::ActiveModel,
) -> Result<stacks::Model, DomainError> {
    stack.updated_at = Set(OffsetDateTime::now_utc());
    Ok(stack.update(conn).await?)
}

pub async fn delete<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    stack_id: i64,
) -> Result<bool, DomainError> {
    let result = stacks::Entity::delete_by_id(stack_id).exec(conn).await?;
    Ok(result.rows_affected > 0)
}
