use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// 报表字段类型 (列与筛选字段共用的固定词汇表)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldType {
    Link,
    Float,
    Date,
}

/// 报表列描述
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportColumn {
    pub label: String,
    pub fieldname: String,
    pub fieldtype: FieldType,
    pub width: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<String>,
}

impl ReportColumn {
    /// 固定首列: 客户 (Link -> Customer)
    pub fn customer() -> Self {
        Self {
            label: "Customer".to_string(),
            fieldname: "customer".to_string(),
            fieldtype: FieldType::Link,
            width: 150,
            options: Some("Customer".to_string()),
        }
    }

    /// 动态列: 每个商品编码一列 (Float)
    pub fn item(item_code: &str) -> Self {
        Self {
            label: item_code.to_string(),
            fieldname: item_code.to_string(),
            fieldtype: FieldType::Float,
            width: 150,
            options: None,
        }
    }
}

/// 聚合查询返回的事实行: (客户, 商品, 数量合计)
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct SoldQuantityRow {
    pub customer: String,
    pub item: String,
    pub quantity: f64,
}

/// 透视后的客户行: customer + 各商品编码的数量
///
/// 客户没有购买过的商品编码不出现在行里 (不补零)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatrixRow {
    pub customer: String,
    #[serde(flatten)]
    pub quantities: IndexMap<String, f64>,
}

/// 报表结果: (columns, data) 对
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatrixReport {
    pub columns: Vec<ReportColumn>,
    pub data: Vec<MatrixRow>,
}
