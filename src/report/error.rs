// ==========================================
// CoolCraft TDS - 报表模块错误类型
// ==========================================

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("报表写入失败: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV 写入失败: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON 序列化失败: {0}")]
    Json(#[from] serde_json::Error),

    #[error("报表为空: 所选组合没有任何设备")]
    EmptySelection,
}

pub type ReportResult<T> = Result<T, ReportError>;
