// ==========================================
// CoolCraft TDS - 核心库
// ==========================================
// 职责: 暖通设备目录选型（容量列识别 / 规格发现 / 组合生成 / 目录行匹配 / 报表）
// 系统定位: 选型辅助工具 (人工最终确认)
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 导入层 - 外部表格
pub mod importer;

// 引擎层 - 选型计算
pub mod engine;

// 报表层 - 组装与导出
pub mod report;

// 配置层 - 系统配置
pub mod config;

// 日志系统
pub mod logging;

// API 层 - 选型会话
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{format_size, LoadUnit, UnitKind};

// 领域实体
pub use domain::{Catalog, CatalogRow, CellValue, Combo, EnrichedCombo, ResolvedRow};

// 引擎
pub use engine::{
    CapacityColumnDetector, ComboEnricher, ComboGenerator, GeneratorSettings, ManualComboParser,
    RowResolver, SizeDiscovery,
};

// 报表
pub use report::{ExportFormat, ReportAssembler, ReportExporter, ReportMetadata, ReportTable};

// API
pub use api::{ApiError, ApiResult, ComboApi, SelectionMode};

// 配置
pub use config::{AppConfig, ConfigManager};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "CoolCraft TDS";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
