// ==========================================
// CoolCraft TDS - 引擎层错误类型
// ==========================================

use thiserror::Error;

/// 引擎层错误类型
///
/// 均为可恢复错误: 调用方降级为手动模式或提示用户
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("解析失败: token={token}, {message}")]
    Parse { token: String, message: String },
}

/// Result 类型别名
pub type EngineResult<T> = Result<T, EngineError>;
