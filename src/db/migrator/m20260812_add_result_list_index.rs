use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Covering index for the per-session result listing, which always filters
/// by session and sorts by creation time descending.
#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_session_results_session_created")
                    .table(SessionResults::Table)
                    .col(SessionResults::SessionId)
                    .col(SessionResults::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_session_results_session_created")
                    .table(SessionResults::Table)
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum SessionResults {
    Table,
    SessionId,
    CreatedAt,
}
