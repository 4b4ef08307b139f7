// ==========================================
// CoolCraft TDS - 配置层
// ==========================================
// 职责: 组合生成参数、负荷默认值、报表默认值
// 存储: JSON 配置文件, 缺省时全部使用默认值
// ==========================================

pub mod config_manager;

// 重导出核心配置管理器
pub use config_manager::{config_keys, AppConfig, ConfigError, ConfigManager, CONFIG_ENV_VAR};
