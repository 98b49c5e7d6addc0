//! Stack write services.

use sea_orm::{ConnectionTrait, IntoActiveModel, Set};

use crate::domain::changes::{apply_stack_changes, ChangeSet};
use crate::domain::EntityKind;
use crate::entities::{games, stacks};
use crate::errors::domain::DomainError;
use crate::repos::stacks as stacks_repo;
use crate::validation::{ensure_modifiable, require_record};

#[derive(Debug, Default, Clone, Copy)]
pub struct StackService;

impl StackService {
    pub fn new() -> Self {
        Self
    }

    /// `game_id` is protected but must be supplied once, here.
    pub async fn create<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        body: &ChangeSet,
    ) -> Result<stacks::Model, DomainError> {
        ensure_modifiable(EntityKind::Stack, body, &["game_id"], true)?;
        let game = require_record::<games::Entity, _>(conn, "game_id", body).await?;

        let mut active = stacks::ActiveModel {
            game_id: Set(game.id),
            ..Default::default()
        };
        apply_stack_changes(&mut active, body, &["game_id"])?;
        stacks_repo::create(conn, active).await
    }

    pub async fn patch<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        stack_id: i64,
        body: &ChangeSet,
    ) -> Result<stacks::Model, DomainError> {
        let stack = stacks_repo::require(conn, stack_id).await?;
        ensure_modifiable(EntityKind::Stack, body, &[], false)?;

        let mut active = stack.into_active_model();
        apply_stack_changes(&mut active, body, &[])?;
        stacks_repo::update(conn, active).await
    }
}
