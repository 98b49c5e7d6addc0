//! Game repository functions.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use serde::Deserialize;
use time::OffsetDateTime;

use crate::entities::games::{self, GameState};
use crate::errors::domain::{DomainError, NotFoundKind};

/// Equality filters accepted by the game listing
#[derive(Debug, Default, Clone, Deserialize)]
pub struct GameFilter {
    pub state: Option<GameState>,
    pub name: Option<String>,
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Option<games::Model>, DomainError> {
    Ok(games::Entity::find_by_id(game_id).one(conn).await?)
}

/// Load a game addressed by a request path.
pub async fn require<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<games::Model, DomainError> {
    find_by_id(conn, game_id)
        .await?
        .ok_or_else(|| DomainError::not_found(NotFoundKind::Game, format!("Game {game_id} not found")))
}

pub async fn list<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    filter: &GameFilter,
) -> Result<Vec<games::Model>, DomainError> {
    let mut query = games::Entity::find();
    if let Some(state) = filter.state {
        query = query.filter(games::Column::State.eq(state));
    }
    if let Some(name) = &filter.name {
        query = query.filter(games::Column::Name.eq(name.as_str()));
    }
    Ok(query.order_by_asc(games::Column::Id).all(conn).await?)
}

pub async fn create<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    mut game: games::ActiveModel,
) -> Result<games::Model, DomainError> {
    let now = OffsetDateTime::now_utc();
    if game.state.is_not_set() {
        game.state = Set(GameState::default());
    }
    game.created_at = Set(now);
    game.updated_at = Set(now);
    Ok(game.insert(conn).await?)
}

pub async fn update<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    mut game: games::ActiveModel,
) -> Result<games::Model, DomainError> {
    game.updated_at = Set(OffsetDateTime::now_utc());
    Ok(game.update(conn).await?)
}

/// Returns whether a row was removed.
pub async fn delete<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<bool, DomainError> {
    let result = games::Entity::delete_by_id(game_id).exec(conn).await?;
    Ok(result.rows_affected > 0)
}
