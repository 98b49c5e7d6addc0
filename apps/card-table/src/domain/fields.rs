//! Per-entity field mutability metadata.
//!
//! Protected fields are never writable by clients. Immutable fields may be
//! supplied when a record is created but never changed afterwards.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Game,
    Stack,
    Card,
    Command,
}

const TIMESTAMPED: [&str; 3] = ["id", "created_at", "updated_at"];

impl EntityKind {
    pub fn protected_fields(self) -> &'static [&'static str] {
        match self {
            EntityKind::Game | EntityKind::Card | EntityKind::Command => &TIMESTAMPED,
            EntityKind::Stack => &["id", "game_id", "created_at", "updated_at"],
        }
    }

    pub fn immutable_fields(self) -> &'static [&'static str] {
        match self {
            EntityKind::Game | EntityKind::Stack | EntityKind::Card => &[],
            EntityKind::Command => &["game_id", "actor_id"],
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            EntityKind::Game => "game",
            EntityKind::Stack => "stack",
            EntityKind::Card => "card",
            EntityKind::Command => "command",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_entity_protects_identity_and_timestamps() {
        for kind in [EntityKind::Game, EntityKind::Stack, EntityKind::Card, EntityKind::Command] {
            for field in TIMESTAMPED {
                assert!(kind.protected_fields().contains(&field), "{kind:?} {field}");
            }
        }
    }

    #[test]
    fn stack_game_is_protected_and_command_owner_immutable() {
        assert!(EntityKind::Stack.protected_fields().contains(&"game_id"));
        assert!(!EntityKind::Card.protected_fields().contains(&"stack_id"));
        assert_eq!(EntityKind::Command.immutable_fields(), &["game_id", "actor_id"]);
        assert!(EntityKind::Card.immutable_fields().is_empty());
    }
}
