use crate::db::MatrixQuerySource;
use crate::models::{MatrixReport, MatrixRow, ReportColumn, ReportFilters, SoldQuantityRow};
use indexmap::IndexMap;
use thiserror::Error;

/// 只统计等待回款的发票
pub const COLLECT_STATUS_UNCOLLECTED: &str = "UnCollected";

/// 必填筛选键 (按校验顺序)
pub const REQUIRED_FILTERS: [&str; 3] = ["salesperson", "from_date", "to_date"];

/// 报表错误: 校验失败直接面向用户; 数据库错误只在列发现阶段向外传播
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("The {0} filter is mandatory")]
    MissingFilter(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// 按下划线分段首字母大写 (from_date -> From_Date)
fn title_case(fieldname: &str) -> String {
    fieldname
        .split('_')
        .map(|seg| {
            let mut chars = seg.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join("_")
}

/// 校验必填筛选项, 报出第一个缺失的键
pub fn validate_filters(filters: &ReportFilters) -> Result<(), ReportError> {
    for f in REQUIRED_FILTERS {
        if !filters.is_set(f) {
            return Err(ReportError::MissingFilter(title_case(f)));
        }
    }
    Ok(())
}

/// 由商品编码组装列描述: 固定客户列 + 每个编码一个 Float 列 (保持查询返回顺序)
fn build_columns(item_codes: Vec<String>) -> Vec<ReportColumn> {
    let mut columns = vec![ReportColumn::customer()];
    for code in item_codes {
        columns.push(ReportColumn::item(&code));
    }
    columns
}

/// 把 (客户, 商品, 数量) 行透视成客户×商品矩阵
///
/// 两层都保持首次出现顺序; 重复的 (客户, 商品) 组合数量累加
pub fn transform_to_matrix(results: Vec<SoldQuantityRow>) -> Vec<MatrixRow> {
    let mut matrix: IndexMap<String, IndexMap<String, f64>> = IndexMap::new();

    for row in results {
        *matrix
            .entry(row.customer)
            .or_default()
            .entry(row.item)
            .or_insert(0.0) += row.quantity;
    }

    matrix
        .into_iter()
        .map(|(customer, quantities)| MatrixRow {
            customer,
            quantities,
        })
        .collect()
}

/// 将报表渲染为 CSV (表头取列 label, 客户没有的商品输出空单元格)
pub fn export_to_csv(
    report: &MatrixReport,
) -> Result<Vec<u8>, Box<dyn std::error::Error + Send + Sync>> {
    use csv::Writer;

    let mut writer = Writer::from_writer(Vec::new());

    let header: Vec<&str> = report.columns.iter().map(|c| c.label.as_str()).collect();
    writer.write_record(&header)?;

    for row in &report.data {
        let mut record = vec![row.customer.clone()];
        for column in report.columns.iter().skip(1) {
            let cell = row
                .quantities
                .get(&column.fieldname)
                .map(|q| q.to_string())
                .unwrap_or_default();
            record.push(cell);
        }
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(writer.into_inner()?)
}

/// 客户×商品销量矩阵报表服务
pub struct MatrixReportService<Q> {
    source: Q,
}

impl<Q: MatrixQuerySource> MatrixReportService<Q> {
    pub fn new(source: Q) -> Self {
        Self { source }
    }

    /// 报表入口: 校验 -> 列发现 -> 数据抓取 -> 透视
    pub async fn execute(
        &self,
        filters: Option<ReportFilters>,
    ) -> Result<MatrixReport, ReportError> {
        let filters = filters.unwrap_or_default();

        // 1. 校验必填筛选项
        validate_filters(&filters)?;

        // 2. 列发现 (查询失败向上传播)
        let columns = self.get_columns(&filters).await?;

        // 3. 数据抓取 + 透视 (查询失败记日志并降级为空数据)
        let data = self.get_data(&filters).await;

        Ok(MatrixReport { columns, data })
    }

    /// 动态列: 符合条件发票中出现过的商品编码, 每个一列
    ///
    /// 列发现不套用日期/销售员筛选, 与数据查询的条件集并不一致
    pub async fn get_columns(
        &self,
        _filters: &ReportFilters,
    ) -> Result<Vec<ReportColumn>, ReportError> {
        let item_codes = self
            .source
            .distinct_item_codes(COLLECT_STATUS_UNCOLLECTED)
            .await?;
        Ok(build_columns(item_codes))
    }

    /// 按筛选条件抓取聚合行并透视; 查询失败时降级为空列表
    pub async fn get_data(&self, filters: &ReportFilters) -> Vec<MatrixRow> {
        let results = match self
            .source
            .sold_quantities(filters, COLLECT_STATUS_UNCOLLECTED)
            .await
        {
            Ok(rows) => rows,
            Err(e) => {
                tracing::error!("✗ Customer item matrix report: 数据查询失败, 错误: {:?}", e);
                return Vec::new();
            }
        };

        transform_to_matrix(results)
    }
}
