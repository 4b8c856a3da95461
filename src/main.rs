use axum::{
    routing::{get, post},
    Router,
};
use customer_item_matrix_rust::{api, create_pool, AppConfig, MatrixReportService};
use std::sync::Arc;
use tower::ServiceBuilder;
use tracing::info;
use tracing_subscriber::fmt::time::ChronoLocal;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 初始化日志 - 使用本地时间格式
    tracing_subscriber::fmt()
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S".to_string()))
        .with_target(true)
        .with_level(true)
        .init();

    // 加载配置
    let config = AppConfig::from_env();
    info!("Starting server with config: {:?}", config);

    // 创建数据库连接池
    let pool = create_pool(&config.database).await?;
    info!("Database pool created");

    // 创建报表服务
    let report_service = Arc::new(MatrixReportService::new(pool));

    // 构建路由
    let report_routes = Router::new()
        .route("/api/reports/customer-item-matrix", post(api::run_report))
        .route(
            "/api/reports/customer-item-matrix/filters",
            get(api::report_filters),
        )
        .route(
            "/api/reports/customer-item-matrix/export",
            post(api::export_report_csv),
        )
        .with_state(report_service);

    let app = Router::new()
        .route("/health", get(api::health_check))
        .merge(report_routes)
        .layer(ServiceBuilder::new());

    // 启动服务器
    let addr = format!("{}:{}", config.server.host, config.server.port);
    info!("Server listening on {}", addr);
    info!("API Endpoints:");
    info!("  POST /api/reports/customer-item-matrix          - Run report");
    info!("  GET  /api/reports/customer-item-matrix/filters  - Filter field metadata");
    info!("  POST /api/reports/customer-item-matrix/export   - CSV download");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
