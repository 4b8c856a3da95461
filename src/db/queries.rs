use crate::models::{ReportFilters, SoldQuantityRow};
use async_trait::async_trait;
use sqlx::PgPool;

/// 查询符合条件发票中出现过的商品编码 (去重, 顺序由查询引擎决定)
///
/// 只按单据状态/回款状态过滤, 不套用日期与销售员筛选
pub async fn distinct_item_codes(
    pool: &PgPool,
    collect_status: &str,
) -> Result<Vec<String>, sqlx::Error> {
    sqlx::query_scalar::<_, String>(
        r#"
        SELECT DISTINCT sii.item_code
        FROM sales_invoice_item sii
        JOIN sales_invoice si ON sii.parent = si.name
        WHERE si.docstatus = 1
          AND si.outstanding_amount = 0
          AND si.is_return = FALSE
          AND si.collect_status = $1
        "#,
    )
    .bind(collect_status)
    .fetch_all(pool)
    .await
}

/// 按客户×商品聚合销量 (WHERE 条件动态拼接)
pub async fn sold_quantities(
    pool: &PgPool,
    filters: &ReportFilters,
    collect_status: &str,
) -> Result<Vec<SoldQuantityRow>, sqlx::Error> {
    let mut query_builder = sqlx::QueryBuilder::new(
        r#"
        SELECT si.customer_name AS customer,
               sii.item_code AS item,
               SUM(sii.qty)::float8 AS quantity
        FROM sales_invoice_item sii
        JOIN sales_invoice si ON sii.parent = si.name
        JOIN sales_team st ON si.name = st.parent
        WHERE si.docstatus = 1
          AND si.is_return = FALSE
        "#,
    );

    // 日期条件仅在提供时拼接 (校验层已保证存在)
    if let Some(from_date) = filters.from_date {
        query_builder
            .push(" AND si.posting_date >= ")
            .push_bind(from_date);
    }
    if let Some(to_date) = filters.to_date {
        query_builder
            .push(" AND si.posting_date <= ")
            .push_bind(to_date);
    }

    query_builder
        .push(" AND st.sales_person = ")
        .push_bind(filters.salesperson.clone().unwrap_or_default());
    query_builder.push(" AND si.outstanding_amount = 0");
    query_builder
        .push(" AND si.collect_status = ")
        .push_bind(collect_status.to_string());
    query_builder.push(" GROUP BY si.customer_name, sii.item_code");

    query_builder
        .build_query_as::<SoldQuantityRow>()
        .fetch_all(pool)
        .await
}

/// 报表查询能力 (生产实现挂在 PgPool 上, 测试用内存实现替换)
#[async_trait]
pub trait MatrixQuerySource: Send + Sync {
    /// 列发现: 去重后的商品编码
    async fn distinct_item_codes(&self, collect_status: &str) -> Result<Vec<String>, sqlx::Error>;

    /// 数据抓取: 聚合后的 (客户, 商品, 数量) 行
    async fn sold_quantities(
        &self,
        filters: &ReportFilters,
        collect_status: &str,
    ) -> Result<Vec<SoldQuantityRow>, sqlx::Error>;
}

#[async_trait]
impl MatrixQuerySource for PgPool {
    async fn distinct_item_codes(&self, collect_status: &str) -> Result<Vec<String>, sqlx::Error> {
        distinct_item_codes(self, collect_status).await
    }

    async fn sold_quantities(
        &self,
        filters: &ReportFilters,
        collect_status: &str,
    ) -> Result<Vec<SoldQuantityRow>, sqlx::Error> {
        sold_quantities(self, filters, collect_status).await
    }
}
