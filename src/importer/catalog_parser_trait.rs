// ==========================================
// CoolCraft TDS - 目录解析 Trait
// ==========================================
// 职责: 定义目录文件解析接口（不包含实现）
// ==========================================

use crate::domain::catalog::Catalog;
use crate::importer::error::ImportResult;
use std::path::Path;

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 表格文件 → Catalog
// 实现者: CsvParser, ExcelParser
pub trait FileParser: Send + Sync {
    /// 列出文件中的工作表名称
    ///
    /// # 说明
    /// - CSV 只有一个隐含工作表, 名称取文件名（不含扩展名）
    fn sheet_names(&self, file_path: &Path) -> ImportResult<Vec<String>>;

    /// 解析指定工作表为目录
    ///
    /// # 参数
    /// - file_path: 文件路径
    /// - sheet: 工作表名称; None 表示第一个工作表
    ///
    /// # 返回
    /// - Ok(Catalog): 列顺序与表头一致, 全空白行已跳过
    /// - Err: 文件不存在、格式不支持、工作表不存在等
    fn parse_sheet(&self, file_path: &Path, sheet: Option<&str>) -> ImportResult<Catalog>;
}
