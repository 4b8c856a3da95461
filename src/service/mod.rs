pub mod matrix;

pub use matrix::{
    export_to_csv, transform_to_matrix, validate_filters, MatrixReportService, ReportError,
    COLLECT_STATUS_UNCOLLECTED, REQUIRED_FILTERS,
};
