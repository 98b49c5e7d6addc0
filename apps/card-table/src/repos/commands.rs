//! Command log repository functions.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use serde::Deserialize;
use time::OffsetDateTime;

use crate::entities::commands;
use crate::errors::domain::{DomainError, NotFoundKind};

#[derive(Debug, Default, Clone, Deserialize)]
pub struct CommandFilter {
    pub game_id: Option<i64>,
    pub actor_id: Option<i64>,
    pub operation: Option<String>,
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    command_id: i64,
) -> Result<Option<commands::Model>, DomainError> {
    Ok(commands::Entity::find_by_id(command_id).one(conn).await?)
}

pub async fn require<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    command_id: i64,
) -> Result<commands::Model, DomainError> {
    find_by_id(conn, command_id).await?.ok_or_else(|| {
        DomainError::not_found(
            NotFoundKind::Command,
            format!("Command {command_id} not found"),
        )
    })
}

pub async fn list<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    filter: &CommandFilter,
) -> Result<Vec<commands::Model>, DomainError> {
    let mut query = commands::Entity::find();
    if let Some(game_id) = filter.game_id {
        query = query.filter(commands::Column::GameId.eq(game_id));
    }
    if let Some(actor_id) = filter.actor_id {
        query = query.filter(commands::Column::ActorId.eq(actor_id));
    }
    if let Some(operation) = &filter.operation {
        query = query.filter(commands::Column::Operation.eq(operation.as_str()));
    }
    Ok(query.order_by_asc(commands::Column::Id).all(conn).await?)
}

pub async fn create<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    mut command: commands::ActiveModel,
) -> Result<commands::Model, DomainError> {
    let now = OffsetDateTime::now_utc();
    command.created_at = Set(now);
    command.updated_at = Set(now);
    Ok(command.insert(conn).await?)
}

pub async fn update<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    mut command: commands::ActiveModel,
) -> Result<commands::Model, DomainError> {
    command.updated_at = Set(OffsetDateTime::now_utc());
    Ok(command.update(conn).await?)
}

pub async fn delete<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    command_id: i64,
) -> Result<bool, DomainError> {
    let result = commands::Entity::delete_by_id(command_id).exec(conn).await?;
    Ok(result.rows_affected > 0)
}
