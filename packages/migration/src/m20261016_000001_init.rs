use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::{ColumnDef, Index, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

// ----- Iden enums for tables & columns -----
#[derive(Iden)]
enum Games {
    Table,
    Id,
    Name,
    State,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Stacks {
    Table,
    Id,
    GameId,
    OwnerId,
    Label,
    SizeVisibility,
    SizeLimit,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Cards {
    Table,
    Id,
    StackId,
    Position,
    OwnerFacing,
    OtherFacing,
    Suit,
    SuitValue,
    Rank,
    RankValue,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Commands {
    Table,
    Id,
    GameId,
    ActorId,
    Operation,
    Changes,
    Memo,
    CreatedAt,
    UpdatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // games
        manager
            .create_table(
                Table::create()
                    .table(Games::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Games::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Games::Name).string().null())
                    .col(
                        ColumnDef::new(Games::State)
                            .string_len(16)
                            .not_null()
                            .default("forming"),
                    )
                    .col(
                        ColumnDef::new(Games::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Games::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_games_updated_at")
                    .table(Games::Table)
                    .col(Games::UpdatedAt)
                    .to_owned(),
            )
            .await?;

        // stacks
        manager
            .create_table(
                Table::create()
                    .table(Stacks::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Stacks::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Stacks::GameId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Stacks::OwnerId)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Stacks::Label).string().null())
                    .col(ColumnDef::new(Stacks::SizeVisibility).integer().null())
                    .col(ColumnDef::new(Stacks::SizeLimit).integer().null())
                    .col(
                        ColumnDef::new(Stacks::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Stacks::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_stacks_game_id")
                            .from(Stacks::Table, Stacks::GameId)
                            .to(Games::Table, Games::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_stacks_game_id")
                    .table(Stacks::Table)
                    .col(Stacks::GameId)
                    .to_owned(),
            )
            .await?;

        // cards
        manager
            .create_table(
                Table::create()
                    .table(Cards::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Cards::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Cards::StackId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Cards::Position)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Cards::OwnerFacing)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Cards::OtherFacing)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Cards::Suit).string().null())
                    .col(ColumnDef::new(Cards::SuitValue).integer().null())
                    .col(ColumnDef::new(Cards::Rank).string().null())
                    .col(ColumnDef::new(Cards::RankValue).integer().null())
                    .col(
                        ColumnDef::new(Cards::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Cards::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_cards_stack_id")
                            .from(Cards::Table, Cards::StackId)
                            .to(Stacks::Table, Stacks::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_cards_stack_id_position")
                    .table(Cards::Table)
                    .col(Cards::StackId)
                    .col(Cards::Position)
                    .to_owned(),
            )
            .await?;

        // commands
        manager
            .create_table(
                Table::create()
                    .table(Commands::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Commands::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Commands::GameId).big_integer().not_null())
                    .col(ColumnDef::new(Commands::ActorId).big_integer().not_null())
                    .col(ColumnDef::new(Commands::Operation).string_len(32).not_null())
                    .col(ColumnDef::new(Commands::Changes).text().null())
                    .col(ColumnDef::new(Commands::Memo).text().null())
                    .col(
                        ColumnDef::new(Commands::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Commands::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_commands_game_id")
                    .table(Commands::Table)
                    .col(Commands::GameId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // drop in reverse order + drop index before table
        manager
            .drop_index(
                Index::drop()
                    .name("ix_commands_game_id")
                    .table(Commands::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(Commands::Table).to_owned())
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("ix_cards_stack_id_position")
                    .table(Cards::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(Cards::Table).to_owned())
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("ix_stacks_game_id")
                    .table(Stacks::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(Stacks::Table).to_owned())
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("ix_games_updated_at")
                    .table(Games::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(Games::Table).to_owned())
            .await?;

        Ok(())
    }
}
