use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// How a card is shown; `owner_facing` applies to the stack owner, `other_facing` to everyone else
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "i32", db_type = "Integer")]
#[serde(rename_all = "lowercase")]
pub enum Facing {
    #[default]
    #[sea_orm(num_value = 0)]
    Down,
    #[sea_orm(num_value = 1)]
    Revealed,
    #[sea_orm(num_value = 2)]
    Peeking,
    #[sea_orm(num_value = 3)]
    Up,
}

impl Facing {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "down" => Some(Facing::Down),
            "revealed" => Some(Facing::Revealed),
            "peeking" => Some(Facing::Peeking),
            "up" => Some(Facing::Up),
            _ => None,
        }
    }

    pub fn from_value(value: i64) -> Option<Self> {
        match value {
            0 => Some(Facing::Down),
            1 => Some(Facing::Revealed),
            2 => Some(Facing::Peeking),
            3 => Some(Facing::Up),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "cards")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "stack_id")]
    pub stack_id: i64,
    /// 0 is the top (or leftmost) card
    pub position: i32,
    #[sea_orm(column_name = "owner_facing")]
    pub owner_facing: Facing,
    #[sea_orm(column_name = "other_facing")]
    pub other_facing: Facing,
    pub suit: Option<String>,
    #[sea_orm(column_name = "suit_value")]
    pub suit_value: Option<i32>,
    pub rank: Option<String>,
    #[sea_orm(column_name = "rank_value")]
    pub rank_value: Option<i32>,
    #[sea_orm(column_name = "created_at")]
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[sea_orm(column_name = "updated_at")]
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::stacks::Entity",
        from = "Column::StackId",
        to = "super::stacks::Column::Id",
        on_delete = "Cascade"
    )]
    Stack,
}

impl Related<super::stacks::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Stack.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn facing_names_and_values_agree() {
        for (name, value) in [("down", 0), ("revealed", 1), ("peeking", 2), ("up", 3)] {
            assert_eq!(Facing::from_name(name), Facing::from_value(value));
            assert_eq!(
                serde_json::to_value(Facing::from_value(value).unwrap()).unwrap(),
                serde_json::json!(name)
            );
        }
        assert_eq!(Facing::from_name("sideways"), None);
        assert_eq!(Facing::from_value(4), None);
    }
}
