use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::report::FieldType;

/// 报表筛选条件 (三个键均为必填, 由 validate_filters 统一校验)
///
/// 请求里出现的多余键由 serde 直接忽略
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportFilters {
    /// 销售员 (Sales Person 名称)
    pub salesperson: Option<String>,
    /// 过账日期下限 (含)
    pub from_date: Option<NaiveDate>,
    /// 过账日期上限 (含)
    pub to_date: Option<NaiveDate>,
}

impl ReportFilters {
    /// 判断筛选键是否已提供 (销售员为空字符串视为未提供)
    pub fn is_set(&self, fieldname: &str) -> bool {
        match fieldname {
            "salesperson" => self.salesperson.as_deref().is_some_and(|s| !s.is_empty()),
            "from_date" => self.from_date.is_some(),
            "to_date" => self.to_date.is_some(),
            _ => false,
        }
    }
}

/// 筛选字段描述 (供通用前端渲染筛选表单)
#[derive(Debug, Clone, Serialize)]
pub struct FilterField {
    pub label: &'static str,
    pub fieldname: &'static str,
    pub fieldtype: FieldType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<&'static str>,
    pub reqd: bool,
}

/// 报表的筛选字段清单: 销售员 + 起止日期, 全部必填
pub fn report_filter_fields() -> Vec<FilterField> {
    vec![
        FilterField {
            label: "Salesperson",
            fieldname: "salesperson",
            fieldtype: FieldType::Link,
            options: Some("Sales Person"),
            reqd: true,
        },
        FilterField {
            label: "From Date",
            fieldname: "from_date",
            fieldtype: FieldType::Date,
            options: None,
            reqd: true,
        },
        FilterField {
            label: "To Date",
            fieldname: "to_date",
            fieldtype: FieldType::Date,
            options: None,
            reqd: true,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_salesperson_counts_as_missing() {
        let filters = ReportFilters {
            salesperson: Some(String::new()),
            ..Default::default()
        };
        assert!(!filters.is_set("salesperson"));

        let filters = ReportFilters {
            salesperson: Some("Alice".to_string()),
            ..Default::default()
        };
        assert!(filters.is_set("salesperson"));
        assert!(!filters.is_set("from_date"));
        assert!(!filters.is_set("unknown_key"));
    }

    #[test]
    fn deserializes_ignoring_unknown_keys() {
        let filters: ReportFilters = serde_json::from_str(
            r#"{"salesperson":"Alice","from_date":"2024-01-01","to_date":"2024-12-31","company":"Acme"}"#,
        )
        .unwrap();

        assert_eq!(filters.salesperson.as_deref(), Some("Alice"));
        assert_eq!(filters.from_date, NaiveDate::from_ymd_opt(2024, 1, 1));
        assert_eq!(filters.to_date, NaiveDate::from_ymd_opt(2024, 12, 31));
    }

    #[test]
    fn filter_fields_match_report_definition() {
        let fields = report_filter_fields();

        assert_eq!(fields.len(), 3);
        assert_eq!(fields[0].fieldname, "salesperson");
        assert_eq!(fields[0].label, "Salesperson");
        assert_eq!(fields[0].fieldtype, FieldType::Link);
        assert_eq!(fields[0].options, Some("Sales Person"));
        assert_eq!(fields[1].fieldname, "from_date");
        assert_eq!(fields[1].fieldtype, FieldType::Date);
        assert_eq!(fields[2].fieldname, "to_date");
        assert!(fields.iter().all(|f| f.reqd));
    }
}
