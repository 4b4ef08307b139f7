// ==========================================
// CoolCraft TDS - 设备目录实体
// ==========================================
// 职责: 表格化目录的只读视图（列顺序 + 行顺序保持原样）
// 红线: 目录加载后只读, 数值转换不改写原始单元格
// ==========================================

use crate::domain::types::format_size;
use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// CellValue - 单元格值
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Text(String),
    Empty,
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            CellValue::Number(_) => false,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Number(v) => write!(f, "{}", format_size(*v)),
            CellValue::Text(s) => write!(f, "{}", s),
            CellValue::Empty => Ok(()),
        }
    }
}

impl From<f64> for CellValue {
    fn from(v: f64) -> Self {
        CellValue::Number(v)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        if s.trim().is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(s.to_string())
        }
    }
}

// ==========================================
// CatalogRow - 目录行
// ==========================================
/// 一行目录数据, 按目录列顺序保存 (列名, 值)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CatalogRow {
    cells: Vec<(String, CellValue)>,
}

impl CatalogRow {
    pub fn new(cells: Vec<(String, CellValue)>) -> Self {
        Self { cells }
    }

    /// 按列名取值（列不存在返回 None）
    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.cells
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    pub fn cells(&self) -> &[(String, CellValue)] {
        &self.cells
    }

    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|(_, v)| v.is_empty())
    }
}

// ==========================================
// Catalog - 设备目录
// ==========================================
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Catalog {
    columns: Vec<String>,
    rows: Vec<CatalogRow>,
}

impl Catalog {
    /// 由列名与按列对齐的单元格构建目录
    ///
    /// 行内单元格少于列数时补 Empty, 多余单元格丢弃
    pub fn from_records(columns: Vec<String>, records: Vec<Vec<CellValue>>) -> Self {
        let rows = records
            .into_iter()
            .map(|record| {
                let mut values = record.into_iter();
                let cells = columns
                    .iter()
                    .map(|col| (col.clone(), values.next().unwrap_or(CellValue::Empty)))
                    .collect();
                CatalogRow::new(cells)
            })
            .collect();

        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[CatalogRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }
}
