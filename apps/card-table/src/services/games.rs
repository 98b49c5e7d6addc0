//! Game write services.

use sea_orm::{ConnectionTrait, IntoActiveModel};

use crate::domain::changes::{apply_game_changes, ChangeSet};
use crate::domain::EntityKind;
use crate::entities::games;
use crate::errors::domain::DomainError;
use crate::repos::games as games_repo;
use crate::validation::ensure_modifiable;

/// Game domain service.
#[derive(Debug, Default, Clone, Copy)]
pub struct GameService;

impl GameService {
    pub fn new() -> Self {
        Self
    }

    pub async fn create<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        body: &ChangeSet,
    ) -> Result<games::Model, DomainError> {
        ensure_modifiable(EntityKind::Game, body, &[], true)?;

        let mut active = games::ActiveModel::default();
        apply_game_changes(&mut active, body, &[])?;
        games_repo::create(conn, active).await
    }

    pub async fn patch<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        game_id: i64,
        body: &ChangeSet,
    ) -> Result<games::Model, DomainError> {
        let game = games_repo::require(conn, game_id).await?;
        ensure_modifiable(EntityKind::Game, body, &[], false)?;

        let mut active = game.into_active_model();
        apply_game_changes(&mut active, body, &[])?;
        games_repo::update(conn, active).await
    }
}
