// ==========================================
// CoolCraft TDS - API 层
// ==========================================
// 职责: 选型会话接口, 供命令行调用
// ==========================================

pub mod combo_api;
pub mod error;

// 重导出核心类型
pub use combo_api::{ComboApi, SelectionMode, MODEL_COLUMN};
pub use error::{ApiError, ApiResult};
