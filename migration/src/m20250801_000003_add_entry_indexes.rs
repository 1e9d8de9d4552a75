use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Lookup indexes only. The (habit_id, date) index is deliberately
        // non-unique: the one-entry-per-day invariant is enforced by the
        // upsert in the entry service, not by the store.
        manager
            .create_index(
                Index::create()
                    .name("idx_entry_habit_id_date")
                    .table(Entry::Table)
                    .col(Entry::HabitId)
                    .col(Entry::Date)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_entry_date")
                    .table(Entry::Table)
                    .col(Entry::Date)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_entry_date")
                    .table(Entry::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_entry_habit_id_date")
                    .table(Entry::Table)
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum Entry {
    Table,
    HabitId,
    Date,
}
