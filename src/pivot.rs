//! Report Pivots
//!
//! Report payloads and their conversion into table layouts: the two-level
//! category → waste grid and the company → waste → operation listing.

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::models::{lenient_f64, number_or_zero, optional_number_from_any};

/// Category colours, cycled by header position
pub const CATEGORY_PALETTE: [&str; 10] = [
    "#bbdefb", "#c8e6c9", "#ffecb3", "#f8bbd0", "#d1c4e9", "#b2dfdb", "#ffccbc", "#d7ccc8", "#cfd8dc", "#e1bee7",
];

/// Operation colours, cycled by operation position
pub const OPERATION_PALETTE: [&str; 5] = ["#bbdefb", "#c8e6c9", "#ffecb3", "#f8bbd0", "#d1c4e9"];

pub const NO_DATA: &str = "Нет данных для отображения";

/// `"0"` for zero, otherwise two decimals in cubic metres
pub fn format_volume(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else {
        format!("{:.2} м³", value)
    }
}

// ========================
// Payloads
// ========================

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ReportSummary {
    #[serde(default, deserialize_with = "number_or_zero")]
    pub current_month: f64,
    #[serde(default, deserialize_with = "number_or_zero")]
    pub total: f64,
    #[serde(default, deserialize_with = "number_or_zero")]
    pub reports_count: f64,
}

/// Category report; `headers` keeps the server's key order
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CategoryReport {
    #[serde(default)]
    pub headers: Map<String, Value>,
    #[serde(default)]
    pub companies: Vec<Map<String, Value>>,
    #[serde(default)]
    pub summary: Option<ReportSummary>,
}

#[derive(Debug, Clone, Deserialize)]
struct CategoryHeader {
    #[serde(default)]
    name: String,
    #[serde(default)]
    wastes: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct OperationBucket {
    #[serde(default)]
    pub wastes: HashMap<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct OperationsCompany {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub operations: HashMap<String, OperationBucket>,
    #[serde(default, deserialize_with = "optional_number_from_any")]
    pub total: Option<f64>,
}

/// Final-processing report (`view_type=operations`)
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct OperationsReport {
    #[serde(default)]
    pub operations: Vec<String>,
    #[serde(default)]
    pub wastes: Vec<String>,
    #[serde(default)]
    pub companies: Vec<OperationsCompany>,
}

// ========================
// Category pivot
// ========================

#[derive(Debug, Clone, PartialEq)]
pub struct PivotColumn {
    /// Key of the value in a company row
    pub key: String,
    pub label: String,
    pub is_total: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PivotGroup {
    pub name: String,
    pub color: &'static str,
    pub columns: Vec<PivotColumn>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PivotCell {
    pub value: f64,
    pub color: &'static str,
    pub is_total: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PivotRow {
    pub company: String,
    pub cells: Vec<PivotCell>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryPivot {
    pub groups: Vec<PivotGroup>,
    pub rows: Vec<PivotRow>,
}

impl CategoryPivot {
    pub fn build(report: &CategoryReport) -> Self {
        let groups: Vec<PivotGroup> = report
            .headers
            .iter()
            .enumerate()
            .map(|(index, (key, header))| {
                let header: CategoryHeader = serde_json::from_value(header.clone()).unwrap_or(CategoryHeader {
                    name: key.clone(),
                    wastes: Vec::new(),
                });
                let mut columns: Vec<PivotColumn> = header
                    .wastes
                    .iter()
                    .map(|waste| PivotColumn {
                        key: waste.clone(),
                        label: waste_label(waste).to_string(),
                        is_total: false,
                    })
                    .collect();
                columns.push(PivotColumn {
                    key: format!("{}_total", key),
                    label: "Итого".to_string(),
                    is_total: true,
                });
                PivotGroup {
                    name: header.name,
                    color: CATEGORY_PALETTE[index % CATEGORY_PALETTE.len()],
                    columns,
                }
            })
            .collect();

        let rows = report
            .companies
            .iter()
            .map(|company| {
                let cells = groups
                    .iter()
                    .flat_map(|group| {
                        group.columns.iter().map(move |column| PivotCell {
                            value: company.get(&column.key).and_then(lenient_f64).unwrap_or(0.0),
                            color: group.color,
                            is_total: column.is_total,
                        })
                    })
                    .collect();
                PivotRow {
                    company: company.get("name").and_then(Value::as_str).unwrap_or_default().to_string(),
                    cells,
                }
            })
            .collect();

        Self { groups, rows }
    }

    /// No company rows; a report with companies but no categories still lists the companies
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Column label: the text after the first space (drops the code prefix)
pub fn waste_label(waste: &str) -> &str {
    match waste.split_once(' ') {
        Some((_, rest)) => rest,
        None => waste,
    }
}

// ========================
// Operations pivot
// ========================

#[derive(Debug, Clone, PartialEq)]
pub struct OperationRow {
    pub waste: String,
    pub quantity: f64,
    pub operation: String,
    pub color: &'static str,
}

/// All rows of one company, rendered with a shared company cell
#[derive(Debug, Clone, PartialEq)]
pub struct CompanyRows {
    pub company: String,
    pub rows: Vec<OperationRow>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OperationsPivot {
    pub legend: Vec<(String, &'static str)>,
    pub companies: Vec<CompanyRows>,
    pub grand_total: f64,
}

impl OperationsPivot {
    pub fn build(report: &OperationsReport) -> Self {
        let legend = report
            .operations
            .iter()
            .enumerate()
            .map(|(index, op)| (op.clone(), OPERATION_PALETTE[index % OPERATION_PALETTE.len()]))
            .collect::<Vec<_>>();

        let mut companies: Vec<CompanyRows> = Vec::new();
        for company in &report.companies {
            for waste in &report.wastes {
                for (operation, color) in &legend {
                    let quantity = company
                        .operations
                        .get(operation)
                        .and_then(|bucket| bucket.wastes.get(waste))
                        .and_then(lenient_f64)
                        .unwrap_or(0.0);
                    if quantity <= 0.0 {
                        continue;
                    }
                    let row = OperationRow {
                        waste: waste.clone(),
                        quantity,
                        operation: operation.clone(),
                        color: *color,
                    };
                    match companies.iter_mut().find(|group| group.company == company.name) {
                        Some(group) => group.rows.push(row),
                        None => companies.push(CompanyRows {
                            company: company.name.clone(),
                            rows: vec![row],
                        }),
                    }
                }
            }
        }

        Self {
            legend,
            companies,
            grand_total: report.companies.iter().filter_map(|c| c.total).sum(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.companies.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Envelope;
    use serde_json::json;

    fn category_report() -> CategoryReport {
        serde_json::from_value(json!({
            "headers": {
                "plastik": {"name": "Пластик", "wastes": ["01 ПЭТ", "02 Пленка"]},
                "bumaga": {"name": "Бумага", "wastes": ["Картон"]}
            },
            "companies": [
                {"id": 1, "name": "ТОО Чистота", "01 ПЭТ": 2.5, "plastik_total": 2.5, "Картон": "1.25", "bumaga_total": 1.25},
                {"name": "ИП Жанна"}
            ],
            "summary": {"current_month": "3.75", "total": 10}
        }))
        .unwrap()
    }

    #[test]
    fn test_category_groups_keep_server_order() {
        let pivot = CategoryPivot::build(&category_report());

        let names: Vec<&str> = pivot.groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["Пластик", "Бумага"]);
        assert_eq!(pivot.groups[0].color, "#bbdefb");
        assert_eq!(pivot.groups[1].color, "#c8e6c9");

        let labels: Vec<&str> = pivot.groups[0].columns.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["ПЭТ", "Пленка", "Итого"]);
        assert_eq!(pivot.groups[0].columns[2].key, "plastik_total");
    }

    #[test]
    fn test_category_cells_default_to_zero() {
        let pivot = CategoryPivot::build(&category_report());

        let first: Vec<f64> = pivot.rows[0].cells.iter().map(|c| c.value).collect();
        assert_eq!(first, vec![2.5, 0.0, 2.5, 1.25, 1.25]);

        assert!(pivot.rows[1].cells.iter().all(|c| c.value == 0.0));
        assert_eq!(pivot.rows[1].company, "ИП Жанна");
    }

    #[test]
    fn test_summary_accepts_strings() {
        let summary = category_report().summary.unwrap();
        assert_eq!(summary.current_month, 3.75);
        assert_eq!(summary.total, 10.0);
    }

    #[test]
    fn test_null_summary_values_read_as_zero() {
        let report: Envelope<CategoryReport> = serde_json::from_value(json!({
            "headers": {},
            "companies": [],
            "summary": {"current_month": null, "total": 12.5, "reports_count": ""}
        }))
        .unwrap();

        let summary = report.into_inner().summary.unwrap();
        assert_eq!(summary.current_month, 0.0);
        assert_eq!(summary.total, 12.5);
        assert_eq!(summary.reports_count, 0.0);
    }

    #[test]
    fn test_companies_without_categories_still_listed() {
        let report: CategoryReport = serde_json::from_value(json!({
            "headers": {},
            "companies": [{"id": 4, "name": "ТОО Чистота"}]
        }))
        .unwrap();

        let pivot = CategoryPivot::build(&report);

        assert!(!pivot.is_empty());
        assert_eq!(pivot.rows[0].company, "ТОО Чистота");
        assert!(pivot.rows[0].cells.is_empty());
    }

    #[test]
    fn test_palette_cycles() {
        let headers: Map<String, Value> = (0..11)
            .map(|i| (format!("c{}", i), json!({"name": format!("C{}", i), "wastes": []})))
            .collect();
        let pivot = CategoryPivot::build(&CategoryReport { headers, ..Default::default() });
        assert_eq!(pivot.groups[10].color, CATEGORY_PALETTE[0]);
        assert!(pivot.is_empty());
    }

    #[test]
    fn test_waste_label() {
        assert_eq!(waste_label("1.1 Пластик ПЭТ"), "Пластик ПЭТ");
        assert_eq!(waste_label("Стекло"), "Стекло");
    }

    #[test]
    fn test_format_volume() {
        assert_eq!(format_volume(0.0), "0");
        assert_eq!(format_volume(1.0), "1.00 м³");
        assert_eq!(format_volume(2.345), "2.35 м³");
    }

    #[test]
    fn test_operations_rows_order_and_filtering() {
        let report: OperationsReport = serde_json::from_value(json!({
            "operations": ["Переработка", "Захоронение"],
            "wastes": ["Пластик", "Стекло"],
            "companies": [
                {
                    "name": "ТОО Чистота",
                    "operations": {
                        "Переработка": {"wastes": {"Пластик": 3, "Стекло": 0}},
                        "Захоронение": {"wastes": {"Пластик": "1.5", "Стекло": 2}}
                    },
                    "total": 6.5
                },
                {"name": "ИП Пусто", "operations": {}, "total": 0}
            ]
        }))
        .unwrap();

        let pivot = OperationsPivot::build(&report);

        assert_eq!(pivot.companies.len(), 1);
        let rows = &pivot.companies[0].rows;
        let flat: Vec<(&str, &str, f64)> = rows
            .iter()
            .map(|r| (r.waste.as_str(), r.operation.as_str(), r.quantity))
            .collect();
        assert_eq!(
            flat,
            vec![
                ("Пластик", "Переработка", 3.0),
                ("Пластик", "Захоронение", 1.5),
                ("Стекло", "Захоронение", 2.0),
            ]
        );
        assert_eq!(rows[1].color, "#c8e6c9");
        assert_eq!(pivot.grand_total, 6.5);
    }

    #[test]
    fn test_operations_same_name_grouped() {
        let report: OperationsReport = serde_json::from_value(json!({
            "operations": ["Переработка"],
            "wastes": ["Пластик"],
            "companies": [
                {"name": "А", "operations": {"Переработка": {"wastes": {"Пластик": 1}}}, "total": 1},
                {"name": "Б", "operations": {"Переработка": {"wastes": {"Пластик": 2}}}, "total": 2},
                {"name": "А", "operations": {"Переработка": {"wastes": {"Пластик": 4}}}, "total": 4}
            ]
        }))
        .unwrap();

        let pivot = OperationsPivot::build(&report);
        assert_eq!(pivot.companies.len(), 2);
        assert_eq!(pivot.companies[0].rows.len(), 2);
        assert_eq!(pivot.grand_total, 7.0);
    }

    #[test]
    fn test_empty_operations_report() {
        assert!(OperationsPivot::build(&OperationsReport::default()).is_empty());
    }
}
