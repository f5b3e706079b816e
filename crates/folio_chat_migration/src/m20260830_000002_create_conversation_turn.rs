use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 对话记录表（只追加）
        manager
            .create_table(
                Table::create()
                    .table(ConversationTurn::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ConversationTurn::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ConversationTurn::Question).text().not_null())
                    .col(ColumnDef::new(ConversationTurn::Answer).text().not_null())
                    .col(ColumnDef::new(ConversationTurn::SessionId).string())
                    .col(ColumnDef::new(ConversationTurn::CreatedAt).string().not_null())
                    .to_owned(),
            )
            .await?;

        // 按会话查询上下文窗口用
        manager
            .create_index(
                Index::create()
                    .name("idx_conversation_turn_session_id")
                    .table(ConversationTurn::Table)
                    .col(ConversationTurn::SessionId)
                    .to_owned(),
            )
            .await?;

        // 按时间排序分组用
        manager
            .create_index(
                Index::create()
                    .name("idx_conversation_turn_created_at")
                    .table(ConversationTurn::Table)
                    .col(ConversationTurn::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ConversationTurn::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum ConversationTurn {
    Table,
    Id,
    Question,
    Answer,
    SessionId,
    CreatedAt,
}
