use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Habit::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Habit::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Habit::Title).string().not_null())
                    .col(
                        ColumnDef::new(Habit::Target)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Habit::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Habit {
    Table,
    Id,
    Title,
    Target,
}
