use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 工作经历实体
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "experience")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub company: String,
    pub position: String,
    pub period: String,
    pub location: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    /// JSON 数组字符串（有序的职责条目）
    #[sea_orm(column_type = "Text", nullable)]
    pub responsibilities: Option<String>,
    pub skills: Option<String>,
    pub website: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub detailed_content: Option<String>,
    pub display_order: i32,
}

impl Model {
    /// 解析 responsibilities JSON 数组，缺失或解析失败时返回空列表
    pub fn responsibility_lines(&self) -> Vec<String> {
        self.responsibilities
            .as_deref()
            .and_then(|json| serde_json::from_str(json).ok())
            .unwrap_or_default()
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
