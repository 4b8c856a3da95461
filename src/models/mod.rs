pub mod filters;
pub mod report;

pub use filters::{report_filter_fields, FilterField, ReportFilters};
pub use report::{FieldType, MatrixReport, MatrixRow, ReportColumn, SoldQuantityRow};
