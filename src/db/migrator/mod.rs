use sea_orm_migration::prelude::*;

mod m20260801_initial;
mod m20260812_add_result_list_index;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260801_initial::Migration),
            Box::new(m20260812_add_result_list_index::Migration),
        ]
    }
}
