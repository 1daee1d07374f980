use sea_orm_migration::{
    prelude::{
        async_trait, DbErr, DeriveIden, DeriveMigrationName, Expr, Index, MigrationTrait,
        SchemaManager, Table,
    },
    schema::{boolean, string, string_uniq, timestamp_with_time_zone, uuid},
};

const INDEX_NAME: &str = "users_id_email_is_active_index";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(User::Table)
                    .if_not_exists()
                    .col(uuid(User::Id).primary_key())
                    .col(string_uniq(User::Email))
                    .col(string(User::Username))
                    .col(string(User::Password))
                    .col(boolean(User::IsActive).default(false))
                    .col(boolean(User::IsStaff).default(false))
                    .col(boolean(User::IsSuperuser).default(false))
                    .col(
                        timestamp_with_time_zone(User::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(User::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name(INDEX_NAME)
                    .table(User::Table)
                    .col(User::Id)
                    .col(User::Email)
                    .col(User::IsActive)
                    .to_owned(),
            )
            .await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name(INDEX_NAME).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(User::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum User {
    Table,
    Id,
    Email,
    Username,
    Password,
    IsActive,
    IsStaff,
    IsSuperuser,
    CreatedAt,
    UpdatedAt,
}
