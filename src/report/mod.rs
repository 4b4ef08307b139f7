// ==========================================
// CoolCraft TDS - 报表层
// ==========================================
// 职责: 选定组合 + 元数据 → 输出表 → CSV / JSON
// ==========================================

pub mod assembler;
pub mod error;
pub mod exporter;
pub mod summary;

pub use assembler::{ReportAssembler, ReportMetadata, ReportTable, INSTANCE_COLUMN};
pub use error::{ReportError, ReportResult};
pub use exporter::{ExportFormat, ReportExporter};
pub use summary::option_line;
