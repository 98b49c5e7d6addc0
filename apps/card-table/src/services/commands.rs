//! Command creation and execution.

use sea_orm::{ConnectionTrait, IntoActiveModel};
use serde::Serialize;
use serde_json::Value;
use time::OffsetDateTime;

use crate::commands::{execute, DrawSource};
use crate::domain::changes::{apply_command_changes, ChangeSet};
use crate::domain::EntityKind;
use crate::entities::{cards, commands};
use crate::errors::domain::DomainError;
use crate::repos::commands as commands_repo;
use crate::validation::{ensure_modifiable, require_param};

/// A command as returned to clients: `changes` decoded back into JSON
#[derive(Debug, Clone, Serialize)]
pub struct CommandView {
    pub id: i64,
    pub game_id: i64,
    pub actor_id: i64,
    pub operation: String,
    pub changes: Option<Value>,
    pub memo: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<commands::Model> for CommandView {
    fn from(m: commands::Model) -> Self {
        // stored text is validated on write; anything undecodable is passed through as a string
        let changes = m.changes.map(|text| {
            serde_json::from_str::<Value>(&text).unwrap_or(Value::String(text))
        });
        Self {
            id: m.id,
            game_id: m.game_id,
            actor_id: m.actor_id,
            operation: m.operation,
            changes,
            memo: m.memo,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

/// The stored command plus whatever its operation produced
#[derive(Debug, Clone, Serialize)]
pub struct CommandOutcome {
    #[serde(flatten)]
    pub command: CommandView,
    /// Cards created by `create-deck`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cards: Option<Vec<cards::Model>>,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct CommandService;

impl CommandService {
    pub fn new() -> Self {
        Self
    }

    /// Persist a command row, then execute it against the same connection.
    /// A failing execution leaves the inserted row to the caller's rollback.
    pub async fn create<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        body: &ChangeSet,
        draws: &mut dyn DrawSource,
    ) -> Result<CommandOutcome, DomainError> {
        ensure_modifiable(EntityKind::Command, body, &[], true)?;
        for name in ["operation", "game_id", "actor_id"] {
            require_param(name, body)?;
        }

        let mut active = commands::ActiveModel::default();
        apply_command_changes(&mut active, body, &[])?;
        let command = commands_repo::create(conn, active).await?;

        let cards = execute(conn, &command, draws).await?;
        Ok(CommandOutcome {
            command: command.into(),
            cards,
        })
    }

    /// Editing a command never re-executes it.
    pub async fn patch<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        command_id: i64,
        body: &ChangeSet,
    ) -> Result<CommandView, DomainError> {
        let command = commands_repo::require(conn, command_id).await?;
        ensure_modifiable(EntityKind::Command, body, &[], false)?;

        let mut active = command.into_active_model();
        apply_command_changes(&mut active, body, &[])?;
        Ok(commands_repo::update(conn, active).await?.into())
    }
}
