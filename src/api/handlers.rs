use crate::models::{report_filter_fields, FilterField, MatrixReport, ReportFilters};
use crate::service::{export_to_csv, MatrixReportService, ReportError};
use axum::{
    extract::{Json, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::sync::Arc;

/// 请求体: 报表筛选条件 (filters 可缺省)
#[derive(Debug, Deserialize)]
pub struct RunReportRequest {
    pub filters: Option<ReportFilters>,
}

/// 响应体
#[derive(Debug, Serialize)]
pub struct RunReportResponse {
    pub success: bool,
    pub message: String,
    pub report: Option<MatrixReport>,
}

/// 健康检查
pub async fn health_check() -> &'static str {
    "OK"
}

/// 筛选字段元数据 (供通用前端渲染筛选表单)
pub async fn report_filters() -> Json<Vec<FilterField>> {
    Json(report_filter_fields())
}

/// 生成客户×商品销量矩阵报表
pub async fn run_report(
    State(service): State<Arc<MatrixReportService<PgPool>>>,
    Json(req): Json<RunReportRequest>,
) -> Response {
    match service.execute(req.filters).await {
        Ok(report) => {
            let response = RunReportResponse {
                success: true,
                message: format!("Report generated with {} rows", report.data.len()),
                report: Some(report),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => error_response(e),
    }
}

/// 按同一套筛选条件导出 CSV 附件
pub async fn export_report_csv(
    State(service): State<Arc<MatrixReportService<PgPool>>>,
    Json(req): Json<RunReportRequest>,
) -> Response {
    let report = match service.execute(req.filters).await {
        Ok(report) => report,
        Err(e) => return error_response(e),
    };

    match export_to_csv(&report) {
        Ok(bytes) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
                (
                    header::CONTENT_DISPOSITION,
                    "attachment; filename=\"customer_item_matrix.csv\"",
                ),
            ],
            bytes,
        )
            .into_response(),
        Err(e) => {
            let response = RunReportResponse {
                success: false,
                message: format!("Error: {}", e),
                report: None,
            };
            (StatusCode::INTERNAL_SERVER_ERROR, Json(response)).into_response()
        }
    }
}

/// 校验失败返回 400, 列发现查询失败返回 500
fn error_response(e: ReportError) -> Response {
    let status = match e {
        ReportError::MissingFilter(_) => StatusCode::BAD_REQUEST,
        ReportError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let response = RunReportResponse {
        success: false,
        message: e.to_string(),
        report: None,
    };
    (status, Json(response)).into_response()
}
