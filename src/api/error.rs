// ==========================================
// CoolCraft TDS - API层错误类型
// ==========================================
// 职责: 定义API层错误类型，将导入/引擎/报表错误转换为用户可读的错误消息
// ==========================================

use crate::config::ConfigError;
use crate::engine::error::EngineError;
use crate::importer::error::ImportError;
use crate::report::error::ReportError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 会话状态错误
    // ==========================================
    /// 目录缺少容量列或没有有效规格, 只能手工输入组合
    #[error("自动组合不可用: {0}")]
    AutomaticModeUnavailable(String),

    // ==========================================
    // 业务规则错误
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("资源未找到: {0}")]
    NotFound(String),

    // ==========================================
    // 下层错误
    // ==========================================
    #[error("目录导入失败: {0}")]
    ImportError(#[from] ImportError),

    #[error("报表导出失败: {0}")]
    ReportError(#[from] ReportError),

    #[error("配置错误: {0}")]
    ConfigError(#[from] ConfigError),
}

// ==========================================
// 从 EngineError 转换
// 引擎错误均源于调用方输入（负荷、规格、手工组合）
// ==========================================
impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::InvalidInput(msg) => ApiError::InvalidInput(msg),
            EngineError::Parse { token, message } => {
                ApiError::InvalidInput(format!("手工组合 '{}' 解析失败: {}", token, message))
            }
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
