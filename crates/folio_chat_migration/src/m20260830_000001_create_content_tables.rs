use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 知识条目表（提示词拼装只读取 is_active = true 的行）
        manager
            .create_table(
                Table::create()
                    .table(KnowledgeEntry::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(KnowledgeEntry::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(KnowledgeEntry::Content).text().not_null())
                    .col(
                        ColumnDef::new(KnowledgeEntry::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(KnowledgeEntry::CreatedAt).string().not_null())
                    .to_owned(),
            )
            .await?;

        // 项目表
        manager
            .create_table(
                Table::create()
                    .table(Project::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Project::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Project::Title).string().not_null())
                    .col(ColumnDef::new(Project::Period).string().not_null())
                    .col(ColumnDef::new(Project::Subtitle).string().not_null())
                    .col(ColumnDef::new(Project::Summary).text().not_null())
                    .col(
                        ColumnDef::new(Project::Contents)
                            .text()
                            .not_null()
                            .default("[]"),
                    )
                    .col(ColumnDef::new(Project::Tech).string().not_null())
                    .col(ColumnDef::new(Project::Image).string().not_null())
                    .col(ColumnDef::new(Project::MoreLink).string())
                    .col(
                        ColumnDef::new(Project::Width)
                            .string()
                            .not_null()
                            .default("full"),
                    )
                    .col(ColumnDef::new(Project::DetailedContent).text())
                    .col(
                        ColumnDef::new(Project::DisplayOrder)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .to_owned(),
            )
            .await?;

        // 工作经历表
        manager
            .create_table(
                Table::create()
                    .table(Experience::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Experience::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Experience::Company).string().not_null())
                    .col(ColumnDef::new(Experience::Position).string().not_null())
                    .col(ColumnDef::new(Experience::Period).string().not_null())
                    .col(ColumnDef::new(Experience::Location).string().not_null())
                    .col(ColumnDef::new(Experience::Description).text())
                    .col(ColumnDef::new(Experience::Responsibilities).text())
                    .col(ColumnDef::new(Experience::Skills).string())
                    .col(ColumnDef::new(Experience::Website).string())
                    .col(ColumnDef::new(Experience::DetailedContent).text())
                    .col(
                        ColumnDef::new(Experience::DisplayOrder)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .to_owned(),
            )
            .await?;

        // 自我介绍表（只追加，最新一行生效）
        manager
            .create_table(
                Table::create()
                    .table(Introduction::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Introduction::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Introduction::Name).string().not_null())
                    .col(ColumnDef::new(Introduction::Title).string().not_null())
                    .col(ColumnDef::new(Introduction::Location).string().not_null())
                    .col(ColumnDef::new(Introduction::Experience).string().not_null())
                    .col(ColumnDef::new(Introduction::Technologies).string().not_null())
                    .col(ColumnDef::new(Introduction::Content).text().not_null())
                    .col(ColumnDef::new(Introduction::CreatedAt).string().not_null())
                    .to_owned(),
            )
            .await?;

        // 预设问题表
        manager
            .create_table(
                Table::create()
                    .table(PromptExample::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PromptExample::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PromptExample::Question).string().not_null())
                    .col(
                        ColumnDef::new(PromptExample::ResponseType)
                            .string()
                            .not_null()
                            .default("ai"),
                    )
                    .col(
                        ColumnDef::new(PromptExample::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(PromptExample::DisplayOrder)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .to_owned(),
            )
            .await?;

        // 联系方式表（只追加，最新一行生效）
        manager
            .create_table(
                Table::create()
                    .table(Contact::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Contact::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Contact::Email).string().not_null())
                    .col(ColumnDef::new(Contact::Phone).string())
                    .col(ColumnDef::new(Contact::Github).string())
                    .col(ColumnDef::new(Contact::Linkedin).string())
                    .col(ColumnDef::new(Contact::Location).string())
                    .col(ColumnDef::new(Contact::CreatedAt).string().not_null())
                    .to_owned(),
            )
            .await?;

        // 技能分类表
        manager
            .create_table(
                Table::create()
                    .table(SkillCategory::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SkillCategory::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SkillCategory::Name).string().not_null())
                    .col(
                        ColumnDef::new(SkillCategory::Items)
                            .text()
                            .not_null()
                            .default("[]"),
                    )
                    .col(
                        ColumnDef::new(SkillCategory::DisplayOrder)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SkillCategory::Table).to_owned())
            .await?;
        manager.drop_table(Table::drop().table(Contact::Table).to_owned()).await?;
        manager
            .drop_table(Table::drop().table(PromptExample::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Introduction::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Experience::Table).to_owned())
            .await?;
        manager.drop_table(Table::drop().table(Project::Table).to_owned()).await?;
        manager
            .drop_table(Table::drop().table(KnowledgeEntry::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum KnowledgeEntry {
    Table,
    Id,
    Content,
    IsActive,
    CreatedAt,
}

#[derive(DeriveIden)]
pub enum Project {
    Table,
    Id,
    Title,
    Period,
    Subtitle,
    Summary,
    Contents,
    Tech,
    Image,
    MoreLink,
    Width,
    DetailedContent,
    DisplayOrder,
}

#[derive(DeriveIden)]
pub enum Experience {
    Table,
    Id,
    Company,
    Position,
    Period,
    Location,
    Description,
    Responsibilities,
    Skills,
    Website,
    DetailedContent,
    DisplayOrder,
}

#[derive(DeriveIden)]
pub enum Introduction {
    Table,
    Id,
    Name,
    Title,
    Location,
    Experience,
    Technologies,
    Content,
    CreatedAt,
}

#[derive(DeriveIden)]
pub enum PromptExample {
    Table,
    Id,
    Question,
    ResponseType,
    IsActive,
    DisplayOrder,
}

#[derive(DeriveIden)]
pub enum Contact {
    Table,
    Id,
    Email,
    Phone,
    Github,
    Linkedin,
    Location,
    CreatedAt,
}

#[derive(DeriveIden)]
pub enum SkillCategory {
    Table,
    Id,
    Name,
    Items,
    DisplayOrder,
}
