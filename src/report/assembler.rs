// ==========================================
// CoolCraft TDS - 报表组装
// ==========================================
// 职责: 选定组合 + 元数据 → 输出表
// 列顺序: 元数据列 → Instance → 目录列（目录顺序）
// ==========================================

use crate::domain::catalog::{Catalog, CellValue};
use crate::domain::combo::EnrichedCombo;
use crate::domain::types::{round3, UnitKind};
use crate::report::error::{ReportError, ReportResult};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// 实例序号列
pub const INSTANCE_COLUMN: &str = "Instance";

// ==========================================
// ReportMetadata - 报表元数据
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub client: String,
    pub manufacturer: String,
    pub billing_sales: String,
    pub report_date: NaiveDate,
}

impl Default for ReportMetadata {
    fn default() -> Self {
        Self {
            client: "Client".to_string(),
            manufacturer: String::new(),
            billing_sales: String::new(),
            report_date: Local::now().date_naive(),
        }
    }
}

// ==========================================
// ReportTable - 输出表
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl ReportTable {
    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    /// 按列名取单元格
    pub fn cell(&self, row: usize, column: &str) -> Option<&CellValue> {
        let idx = self.column_index(column)?;
        self.rows.get(row).and_then(|r| r.get(idx))
    }

    /// 预览用文本: 缺失值显示 N/A
    pub fn display_value(value: &CellValue) -> String {
        if value.is_empty() {
            "N/A".to_string()
        } else {
            value.to_string()
        }
    }
}

// ==========================================
// ReportAssembler - 报表组装器
// ==========================================
pub struct ReportAssembler {
    unit_kind: UnitKind,
}

impl ReportAssembler {
    pub fn new(unit_kind: UnitKind) -> Self {
        Self { unit_kind }
    }

    /// 元数据列名（容量合计列带单位后缀）
    pub fn meta_columns(&self) -> Vec<String> {
        vec![
            "Client".to_string(),
            "Manufacturer".to_string(),
            "BillingSales".to_string(),
            "ReportDate".to_string(),
            "SelectedCombo".to_string(),
            format!("ComboTotal{}", self.unit_kind.capacity_label()),
            "ComboUnits".to_string(),
        ]
    }

    /// 组装输出表
    ///
    /// - 每台设备一行, 元数据列在每行重复
    /// - 目录列仅在至少一台设备匹配到目录行时输出
    /// - 与元数据列同名的目录列不输出
    pub fn assemble(
        &self,
        catalog: &Catalog,
        selection: &EnrichedCombo,
        metadata: &ReportMetadata,
    ) -> ReportResult<ReportTable> {
        if selection.rows.is_empty() {
            return Err(ReportError::EmptySelection);
        }

        let meta_columns = self.meta_columns();
        let any_resolved = selection.rows.iter().any(|r| r.row.is_some());
        let catalog_columns: Vec<String> = if any_resolved {
            catalog
                .columns()
                .iter()
                .filter(|c| !meta_columns.contains(*c) && c.as_str() != INSTANCE_COLUMN)
                .cloned()
                .collect()
        } else {
            Vec::new()
        };

        let meta_values = vec![
            CellValue::from(metadata.client.as_str()),
            CellValue::from(metadata.manufacturer.as_str()),
            CellValue::from(metadata.billing_sales.as_str()),
            CellValue::Text(metadata.report_date.format("%Y-%m-%d").to_string()),
            CellValue::Text(
                selection
                    .combo
                    .describe(self.unit_kind.capacity_label()),
            ),
            CellValue::Number(round3(selection.total_capacity)),
            CellValue::Number(selection.units as f64),
        ];

        let rows: Vec<Vec<CellValue>> = selection
            .rows
            .iter()
            .map(|resolved| {
                let mut cells = meta_values.clone();
                cells.push(CellValue::Number(resolved.instance as f64));
                cells.extend(catalog_columns.iter().map(|col| {
                    resolved
                        .row
                        .as_ref()
                        .and_then(|row| row.get(col))
                        .cloned()
                        .unwrap_or(CellValue::Empty)
                }));
                cells
            })
            .collect();

        let mut columns = meta_columns;
        columns.push(INSTANCE_COLUMN.to_string());
        columns.extend(catalog_columns);

        debug!(columns = columns.len(), rows = rows.len(), "报表组装完成");
        Ok(ReportTable { columns, rows })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::combo::{Combo, ResolvedRow};

    fn catalog() -> Catalog {
        Catalog::from_records(
            vec!["model".to_string(), "HP".to_string(), "Client".to_string()],
            vec![
                vec![
                    CellValue::from("MMY-10"),
                    CellValue::from("10"),
                    CellValue::from("ignored"),
                ],
                vec![
                    CellValue::from("MMY-8"),
                    CellValue::from("8"),
                    CellValue::Empty,
                ],
            ],
        )
    }

    fn metadata() -> ReportMetadata {
        ReportMetadata {
            client: "Acme Tower".to_string(),
            manufacturer: "Toshiba".to_string(),
            billing_sales: "".to_string(),
            report_date: NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
        }
    }

    fn selection(catalog: &Catalog) -> EnrichedCombo {
        EnrichedCombo {
            combo: Combo::from_counts([(10.0, 1), (8.0, 1)]),
            rows: vec![
                ResolvedRow {
                    instance: 1,
                    requested_size: 10.0,
                    row: Some(catalog.rows()[0].clone()),
                },
                ResolvedRow {
                    instance: 2,
                    requested_size: 8.0,
                    row: None,
                },
            ],
            total_capacity: 10.0,
            units: 2,
        }
    }

    #[test]
    fn test_column_order() {
        let catalog = catalog();
        let table = ReportAssembler::new(UnitKind::Outdoor)
            .assemble(&catalog, &selection(&catalog), &metadata())
            .unwrap();

        assert_eq!(
            table.columns,
            vec![
                "Client",
                "Manufacturer",
                "BillingSales",
                "ReportDate",
                "SelectedCombo",
                "ComboTotalHP",
                "ComboUnits",
                "Instance",
                "model",
                "HP",
            ]
        );
    }

    #[test]
    fn test_meta_values_repeated_per_instance() {
        let catalog = catalog();
        let table = ReportAssembler::new(UnitKind::Outdoor)
            .assemble(&catalog, &selection(&catalog), &metadata())
            .unwrap();

        assert_eq!(table.rows.len(), 2);
        for row in 0..2 {
            assert_eq!(
                table.cell(row, "Client"),
                Some(&CellValue::Text("Acme Tower".to_string()))
            );
            assert_eq!(
                table.cell(row, "SelectedCombo"),
                Some(&CellValue::Text("1×10HP + 1×8HP".to_string()))
            );
            assert_eq!(
                table.cell(row, "ReportDate"),
                Some(&CellValue::Text("2025-03-14".to_string()))
            );
        }
        assert_eq!(table.cell(0, "BillingSales"), Some(&CellValue::Empty));
        assert_eq!(table.cell(1, "Instance"), Some(&CellValue::Number(2.0)));
    }

    #[test]
    fn test_unresolved_instance_renders_empty() {
        let catalog = catalog();
        let table = ReportAssembler::new(UnitKind::Outdoor)
            .assemble(&catalog, &selection(&catalog), &metadata())
            .unwrap();

        assert_eq!(table.cell(1, "model"), Some(&CellValue::Empty));
        assert_eq!(
            ReportTable::display_value(table.cell(1, "model").unwrap()),
            "N/A"
        );
        assert_eq!(
            table.cell(0, "model"),
            Some(&CellValue::Text("MMY-10".to_string()))
        );
    }

    #[test]
    fn test_indoor_total_column_label() {
        let assembler = ReportAssembler::new(UnitKind::Indoor);
        assert!(assembler.meta_columns().contains(&"ComboTotalkW".to_string()));
    }

    #[test]
    fn test_empty_selection_rejected() {
        let catalog = catalog();
        let empty = EnrichedCombo {
            combo: Combo::from_counts([]),
            rows: vec![],
            total_capacity: 0.0,
            units: 0,
        };
        let result = ReportAssembler::new(UnitKind::Outdoor).assemble(&catalog, &empty, &metadata());
        assert!(matches!(result, Err(ReportError::EmptySelection)));
    }
}
