// ==========================================
// CoolCraft TDS - 文件解析器实现
// ==========================================
// 支持: Excel (.xlsx/.xls) / CSV (.csv)
// 输出: Catalog（列顺序 = 表头顺序, 行顺序 = 文件顺序）
// ==========================================

use crate::domain::catalog::{Catalog, CellValue};
use crate::importer::catalog_parser_trait::FileParser;
use crate::importer::data_cleaner::DataCleaner;
use crate::importer::error::{ImportError, ImportResult};
use calamine::{open_workbook_auto, Data, Reader};
use csv::ReaderBuilder;
use std::fs::File;
use std::path::Path;
use tracing::{debug, instrument};

/// 检查文件存在与扩展名
fn check_file(path: &Path, allowed: &[&str]) -> ImportResult<()> {
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.display().to_string()));
    }

    let ext = file_extension(path);
    if !allowed.contains(&ext.as_str()) {
        return Err(ImportError::UnsupportedFormat(ext));
    }
    Ok(())
}

fn file_extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

// ==========================================
// CSV Parser 实现
// ==========================================
// 可解析为有限浮点数的单元格存为 Number, 其余按文本保存
pub struct CsvParser;

impl FileParser for CsvParser {
    fn sheet_names(&self, file_path: &Path) -> ImportResult<Vec<String>> {
        check_file(file_path, &["csv"])?;
        let name = file_path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("Sheet1")
            .to_string();
        Ok(vec![name])
    }

    #[instrument(skip(self), fields(path = %file_path.display()))]
    fn parse_sheet(&self, file_path: &Path, sheet: Option<&str>) -> ImportResult<Catalog> {
        check_file(file_path, &["csv"])?;
        if let Some(name) = sheet {
            let names = self.sheet_names(file_path)?;
            if !names.iter().any(|n| n == name) {
                return Err(ImportError::SheetNotFound(name.to_string()));
            }
        }

        let cleaner = DataCleaner;
        let file = File::open(file_path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(file);

        // 读取表头
        let raw_headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();
        if raw_headers.iter().all(|h| h.trim().is_empty()) {
            return Err(ImportError::EmptySheet(file_path.display().to_string()));
        }
        let headers = cleaner.dedupe_headers(raw_headers);

        // 读取所有行
        let mut records = Vec::new();
        for result in reader.records() {
            let record = result?;
            let cells: Vec<CellValue> = record.iter().map(|v| cleaner.parse_cell(v)).collect();

            // 跳过完全空白的行
            if cells.iter().all(CellValue::is_empty) {
                continue;
            }
            records.push(cells);
        }

        debug!(columns = headers.len(), rows = records.len(), "CSV 目录解析完成");
        Ok(Catalog::from_records(headers, records))
    }
}

// ==========================================
// Excel Parser 实现
// ==========================================
pub struct ExcelParser;

impl ExcelParser {
    /// calamine 单元格 → CellValue
    fn convert_cell(cell: &Data) -> CellValue {
        match cell {
            Data::Int(i) => CellValue::Number(*i as f64),
            Data::Float(f) => CellValue::Number(*f),
            Data::String(s) => DataCleaner.clean_text(s),
            Data::Bool(b) => CellValue::Text(b.to_string()),
            Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
            Data::Error(_) | Data::Empty => CellValue::Empty,
            other => DataCleaner.clean_text(&other.to_string()),
        }
    }
}

impl FileParser for ExcelParser {
    fn sheet_names(&self, file_path: &Path) -> ImportResult<Vec<String>> {
        check_file(file_path, &["xlsx", "xls"])?;
        let workbook = open_workbook_auto(file_path)?;
        Ok(workbook.sheet_names())
    }

    #[instrument(skip(self), fields(path = %file_path.display()))]
    fn parse_sheet(&self, file_path: &Path, sheet: Option<&str>) -> ImportResult<Catalog> {
        check_file(file_path, &["xlsx", "xls"])?;

        // 打开 Excel 文件
        let mut workbook = open_workbook_auto(file_path)?;

        // 未指定时读取第一个 sheet
        let sheet_names = workbook.sheet_names();
        let sheet_name = match sheet {
            Some(name) if sheet_names.iter().any(|n| n == name) => name.to_string(),
            Some(name) => return Err(ImportError::SheetNotFound(name.to_string())),
            None => sheet_names.first().cloned().ok_or_else(|| {
                ImportError::ExcelParseError("Excel 文件无工作表".to_string())
            })?,
        };

        let range = workbook.worksheet_range(&sheet_name)?;

        // 提取表头（第一行）
        let mut rows = range.rows();
        let header_row = rows
            .next()
            .ok_or_else(|| ImportError::EmptySheet(sheet_name.clone()))?;

        let cleaner = DataCleaner;
        let headers = cleaner.dedupe_headers(
            header_row
                .iter()
                .map(|cell| cell.to_string().trim().to_string())
                .collect(),
        );

        // 读取数据行
        let mut records = Vec::new();
        for data_row in rows {
            let cells: Vec<CellValue> = data_row.iter().map(Self::convert_cell).collect();

            // 跳过完全空白的行
            if cells.iter().all(CellValue::is_empty) {
                continue;
            }
            records.push(cells);
        }

        debug!(
            sheet = %sheet_name,
            columns = headers.len(),
            rows = records.len(),
            "Excel 目录解析完成"
        );
        Ok(Catalog::from_records(headers, records))
    }
}

// ==========================================
// 通用文件解析器（根据扩展名自动选择）
// ==========================================
pub struct UniversalFileParser;

impl UniversalFileParser {
    fn parser_for(&self, path: &Path) -> ImportResult<Box<dyn FileParser>> {
        match file_extension(path).as_str() {
            "csv" => Ok(Box::new(CsvParser)),
            "xlsx" | "xls" => Ok(Box::new(ExcelParser)),
            other => Err(ImportError::UnsupportedFormat(other.to_string())),
        }
    }

    pub fn sheet_names<P: AsRef<Path>>(&self, file_path: P) -> ImportResult<Vec<String>> {
        let path = file_path.as_ref();
        self.parser_for(path)?.sheet_names(path)
    }

    pub fn parse<P: AsRef<Path>>(&self, file_path: P, sheet: Option<&str>) -> ImportResult<Catalog> {
        let path = file_path.as_ref();
        self.parser_for(path)?.parse_sheet(path, sheet)
    }
}
