use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 项目实体
///
/// contents 字段存 JSON 数组字符串（有序的项目要点），与前端约定一致
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "project")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub period: String,
    pub subtitle: String,
    #[sea_orm(column_type = "Text")]
    pub summary: String,
    /// JSON 数组字符串，例如 ["要点1", "要点2"]
    #[sea_orm(column_type = "Text")]
    pub contents: String,
    pub tech: String,
    pub image: String,
    pub more_link: Option<String>,
    /// 前端布局宽度（如 "full" / "half"）
    pub width: String,
    /// 追问时才展示的长文内容
    #[sea_orm(column_type = "Text", nullable)]
    pub detailed_content: Option<String>,
    pub display_order: i32,
}

impl Model {
    /// 解析 contents JSON 数组，解析失败时返回空列表
    pub fn content_lines(&self) -> Vec<String> {
        serde_json::from_str(&self.contents).unwrap_or_default()
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
