use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(EmailOtps::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(EmailOtps::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(EmailOtps::UserId).uuid().not_null())
                    .col(ColumnDef::new(EmailOtps::Code).string_len(6).not_null())
                    .col(
                        ColumnDef::new(EmailOtps::ExpiresAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EmailOtps::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(EmailOtps::Table, EmailOtps::UserId)
                            .to(Profiles::Table, Profiles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Serves the verify lookup (user_id + code, newest first).
        manager
            .create_index(
                Index::create()
                    .table(EmailOtps::Table)
                    .col(EmailOtps::UserId)
                    .col(EmailOtps::Code)
                    .name("idx_email_otps_user_id_code")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(EmailOtps::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum EmailOtps {
    Table,
    Id,
    UserId,
    Code,
    ExpiresAt,
    CreatedAt,
}

#[derive(Iden)]
enum Profiles {
    Table,
    Id,
}
