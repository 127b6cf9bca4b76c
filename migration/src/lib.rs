pub use sea_orm_migration::prelude::*;

mod m20250110_000001_create_schema_and_base_tables;
mod m20250601_000001_add_meetings_sorting_index;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250110_000001_create_schema_and_base_tables::Migration),
            Box::new(m20250601_000001_add_meetings_sorting_index::Migration),
        ]
    }
}
