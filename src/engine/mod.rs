// ==========================================
// CoolCraft TDS - 引擎层
// ==========================================
// 职责: 容量列识别 / 规格发现 / 组合生成 / 目录行匹配 / 单位换算
// 红线: 纯计算, 不读写文件, 不修改目录
// ==========================================

pub mod capacity_detector;
pub mod combo_enricher;
pub mod combo_generator;
pub mod conversion;
pub mod error;
pub mod manual_combo;
pub mod row_resolver;
pub mod size_discovery;

// 重导出核心引擎
pub use capacity_detector::{CapacityColumnDetector, DetectionTier};
pub use combo_enricher::ComboEnricher;
pub use combo_generator::{ComboGenerator, GeneratorSettings, ScoredCombo};
pub use error::{EngineError, EngineResult};
pub use manual_combo::ManualComboParser;
pub use row_resolver::{resolve_instance, CapacityIndex, RowResolver};
pub use size_discovery::SizeDiscovery;
