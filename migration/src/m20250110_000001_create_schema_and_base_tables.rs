use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("CREATE SCHEMA IF NOT EXISTS polyglot_minutes")
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                "CREATE TABLE polyglot_minutes.users (
                    id bigserial PRIMARY KEY,
                    external_id varchar(255) NOT NULL UNIQUE,
                    display_name varchar(255),
                    created_at timestamptz NOT NULL DEFAULT now(),
                    updated_at timestamptz NOT NULL DEFAULT now()
                )",
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                "CREATE TABLE polyglot_minutes.meetings (
                    id bigserial PRIMARY KEY,
                    user_id bigint NOT NULL REFERENCES polyglot_minutes.users(id)
                        ON DELETE CASCADE,
                    title varchar(255) NOT NULL,
                    original_content text NOT NULL,
                    detected_language varchar(8),
                    image_url text,
                    image_storage_key text,
                    created_at timestamptz NOT NULL DEFAULT now(),
                    updated_at timestamptz NOT NULL DEFAULT now()
                )",
            )
            .await?;

        // Deleting a meeting cascades to its cached translations; a meeting
        // exclusively owns them.
        manager
            .get_connection()
            .execute_unprepared(
                "CREATE TABLE polyglot_minutes.translations (
                    id bigserial PRIMARY KEY,
                    meeting_id bigint NOT NULL REFERENCES polyglot_minutes.meetings(id)
                        ON DELETE CASCADE,
                    target_language varchar(64) NOT NULL,
                    translated_content text NOT NULL,
                    structured_summary jsonb NOT NULL,
                    created_at timestamptz NOT NULL DEFAULT now(),
                    updated_at timestamptz NOT NULL DEFAULT now()
                )",
            )
            .await?;

        // The cache key: at most one translation per (meeting, target
        // language) pair. The workflow's insert-if-absent relies on this
        // index for its ON CONFLICT target.
        manager
            .get_connection()
            .execute_unprepared(
                "CREATE UNIQUE INDEX uq_translations_meeting_language
                    ON polyglot_minutes.translations (meeting_id, target_language)",
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DROP TABLE IF EXISTS polyglot_minutes.translations")
            .await?;
        manager
            .get_connection()
            .execute_unprepared("DROP TABLE IF EXISTS polyglot_minutes.meetings")
            .await?;
        manager
            .get_connection()
            .execute_unprepared("DROP TABLE IF EXISTS polyglot_minutes.users")
            .await?;
        manager
            .get_connection()
            .execute_unprepared("DROP SCHEMA IF EXISTS polyglot_minutes")
            .await?;

        Ok(())
    }
}
