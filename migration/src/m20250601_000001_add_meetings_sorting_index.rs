use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // The meetings list endpoint always reads one user's rows newest
        // first; give that exact access path an index.
        manager
            .get_connection()
            .execute_unprepared(
                "CREATE INDEX idx_meetings_user_id_created_at
                    ON polyglot_minutes.meetings (user_id, created_at DESC)",
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DROP INDEX IF EXISTS polyglot_minutes.idx_meetings_user_id_created_at")
            .await?;

        Ok(())
    }
}
