// ==========================================
// CoolCraft TDS - 领域模型层
// ==========================================
// 职责: 定义目录、组合等领域实体与类型
// 红线: 不含文件读写逻辑, 不含引擎逻辑
// ==========================================

pub mod catalog;
pub mod combo;
pub mod types;

// 重导出核心类型
pub use catalog::{Catalog, CatalogRow, CellValue};
pub use combo::{Combo, EnrichedCombo, ResolvedRow};
pub use types::{format_size, round3, LoadUnit, UnitKind};
