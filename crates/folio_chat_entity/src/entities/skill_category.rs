use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 技能分类实体，items 字段存 JSON 数组字符串
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "skill_category")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    /// JSON 数组字符串，例如 ["Rust", "TypeScript"]
    #[sea_orm(column_type = "Text")]
    pub items: String,
    pub display_order: i32,
}

impl Model {
    /// 解析 items JSON 数组，解析失败时返回空列表
    pub fn item_list(&self) -> Vec<String> {
        serde_json::from_str(&self.items).unwrap_or_default()
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
