// ==========================================
// CoolCraft TDS - 导入层
// ==========================================
// 职责: 外部表格文件 → 只读设备目录
// 支持: Excel, CSV
// ==========================================

// 模块声明
pub mod catalog_parser_trait;
pub mod data_cleaner;
pub mod error;
pub mod file_parser;

// 重导出核心类型
pub use catalog_parser_trait::FileParser;
pub use data_cleaner::DataCleaner;
pub use error::{ImportError, ImportResult};
pub use file_parser::{CsvParser, ExcelParser, UniversalFileParser};
