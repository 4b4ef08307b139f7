// ==========================================
// CoolCraft TDS - 报表导出
// ==========================================
// 支持: CSV (csv crate) / JSON (serde_json)
// 缺失值: CSV 写空串, JSON 写 null
// ==========================================

use crate::report::assembler::ReportTable;
use crate::report::error::ReportResult;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;
use tracing::info;

// ==========================================
// ExportFormat - 导出格式
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            other => Err(format!("未知导出格式: {}", other)),
        }
    }
}

// ==========================================
// ReportExporter - 报表导出器
// ==========================================
pub struct ReportExporter;

impl ReportExporter {
    /// 默认文件名: TDS_{客户名(空格→_)}_{YYYYMMDD_HHMMSS}.{ext}
    pub fn default_file_name(client: &str, now: NaiveDateTime, format: ExportFormat) -> String {
        format!(
            "TDS_{}_{}.{}",
            client.trim().replace(' ', "_"),
            now.format("%Y%m%d_%H%M%S"),
            format.extension()
        )
    }

    pub fn write<P: AsRef<Path>>(
        &self,
        table: &ReportTable,
        path: P,
        format: ExportFormat,
    ) -> ReportResult<()> {
        match format {
            ExportFormat::Csv => self.write_csv(table, path),
            ExportFormat::Json => self.write_json(table, path),
        }
    }

    /// 写出 CSV（表头 + 数据行）
    pub fn write_csv<P: AsRef<Path>>(&self, table: &ReportTable, path: P) -> ReportResult<()> {
        let file = File::create(path.as_ref())?;
        self.write_csv_to(table, file)?;
        info!(path = %path.as_ref().display(), rows = table.rows.len(), "CSV 报表已导出");
        Ok(())
    }

    /// 写出 CSV 到任意 writer
    pub fn write_csv_to<W: Write>(&self, table: &ReportTable, writer: W) -> ReportResult<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(&table.columns)?;
        for row in &table.rows {
            csv_writer.write_record(row.iter().map(|cell| cell.to_string()))?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    /// 写出 JSON（{"columns": [...], "rows": [[...]]}）
    pub fn write_json<P: AsRef<Path>>(&self, table: &ReportTable, path: P) -> ReportResult<()> {
        let file = File::create(path.as_ref())?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, table)?;
        writer.flush()?;
        info!(path = %path.as_ref().display(), rows = table.rows.len(), "JSON 报表已导出");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::CellValue;
    use chrono::NaiveDate;
    use tempfile::tempdir;

    fn table() -> ReportTable {
        ReportTable {
            columns: vec!["Client".to_string(), "Instance".to_string(), "model".to_string()],
            rows: vec![
                vec![
                    CellValue::Text("Acme".to_string()),
                    CellValue::Number(1.0),
                    CellValue::Text("MMY-10".to_string()),
                ],
                vec![
                    CellValue::Text("Acme".to_string()),
                    CellValue::Number(2.0),
                    CellValue::Empty,
                ],
            ],
        }
    }

    #[test]
    fn test_write_csv_to_buffer() {
        let mut buf = Vec::new();
        ReportExporter.write_csv_to(&table(), &mut buf).unwrap();

        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "Client,Instance,model\nAcme,1,MMY-10\nAcme,2,\n");
    }

    #[test]
    fn test_write_json_nulls_missing_cells() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("report.json");
        ReportExporter.write_json(&table(), &path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["columns"][2], "model");
        assert_eq!(value["rows"][0][1], 1.0);
        assert!(value["rows"][1][2].is_null());
    }

    #[test]
    fn test_write_dispatches_on_format() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("report.csv");
        ReportExporter
            .write(&table(), &path, ExportFormat::Csv)
            .unwrap();
        assert!(std::fs::read_to_string(&path)
            .unwrap()
            .starts_with("Client,Instance,model"));
    }

    #[test]
    fn test_default_file_name() {
        let now = NaiveDate::from_ymd_opt(2025, 3, 14)
            .unwrap()
            .and_hms_opt(9, 5, 7)
            .unwrap();
        assert_eq!(
            ReportExporter::default_file_name("Acme Tower Ltd", now, ExportFormat::Csv),
            "TDS_Acme_Tower_Ltd_20250314_090507.csv"
        );
    }

    #[test]
    fn test_export_format_from_str() {
        assert_eq!("JSON".parse::<ExportFormat>(), Ok(ExportFormat::Json));
        assert!("xlsx".parse::<ExportFormat>().is_err());
    }
}
