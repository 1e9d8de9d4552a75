pub use sea_orm_migration::prelude::*;

mod m20250801_000001_create_habit_table;
mod m20250801_000002_create_entry_table;
mod m20250801_000003_add_entry_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250801_000001_create_habit_table::Migration),
            Box::new(m20250801_000002_create_entry_table::Migration),
            Box::new(m20250801_000003_add_entry_indexes::Migration),
        ]
    }
}
