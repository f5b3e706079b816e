use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 预设问题实体
///
/// response_type 取值：ai / projects / experiences / contacts / skills / introduction，
/// display_order 仅用于前端排序，提示词拼装不消费该字段
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "prompt_example")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub question: String,
    pub response_type: String,
    pub is_active: bool,
    pub display_order: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
