// ==========================================
// CoolCraft TDS - 配置管理器
// ==========================================
// 职责: 配置加载、默认值、非法值回退
// 存储: JSON 文件 (key-value)
// 查找顺序: 显式路径 → $COOLCRAFT_TDS_CONFIG → {config_dir}/coolcraft-tds/config.json → 默认值
// ==========================================

use crate::engine::combo_generator::GeneratorSettings;
use crate::report::exporter::ExportFormat;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// 配置文件路径环境变量
pub const CONFIG_ENV_VAR: &str = "COOLCRAFT_TDS_CONFIG";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败 ({path}): {message}")]
    ReadError { path: String, message: String },

    #[error("配置文件格式错误 ({path}): {message}")]
    FormatError { path: String, message: String },
}

// ==========================================
// AppConfig - 应用配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub max_results: usize,
    pub single_size_limit: usize,
    pub closeness_weight: f64,
    pub unit_weight: f64,
    pub exact_decomposition: bool,
    /// 室外机默认负荷 (HP)
    pub default_load_hp: f64,
    /// 室内机默认负荷 (kW)
    pub default_load_kw: f64,
    /// 报表默认厂家
    pub manufacturer: Option<String>,
    pub export_format: ExportFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        let generator = GeneratorSettings::default();
        Self {
            max_results: generator.max_results,
            single_size_limit: generator.single_size_limit,
            closeness_weight: generator.closeness_weight,
            unit_weight: generator.unit_weight,
            exact_decomposition: generator.exact_decomposition,
            default_load_hp: 100.0,
            default_load_kw: 10.0,
            manufacturer: None,
            export_format: ExportFormat::Csv,
        }
    }
}

impl AppConfig {
    /// 组合生成参数
    pub fn generator_settings(&self) -> GeneratorSettings {
        GeneratorSettings {
            max_results: self.max_results,
            single_size_limit: self.single_size_limit,
            closeness_weight: self.closeness_weight,
            unit_weight: self.unit_weight,
            exact_decomposition: self.exact_decomposition,
        }
    }
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager;

impl ConfigManager {
    /// 从指定 JSON 文件加载配置
    ///
    /// 单项缺失或非法时使用默认值（记录 warn）, 文件本身不可读/非 JSON 对象时报错
    pub fn load<P: AsRef<Path>>(path: P) -> Result<AppConfig, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let value: Value = serde_json::from_str(&raw).map_err(|e| ConfigError::FormatError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let map = value.as_object().ok_or_else(|| ConfigError::FormatError {
            path: path.display().to_string(),
            message: "顶层必须为 JSON 对象".to_string(),
        })?;

        debug!(path = %path.display(), keys = map.len(), "配置文件已加载");
        Ok(Self::from_map(map))
    }

    /// 按默认查找顺序加载; 找不到配置文件时返回默认配置
    pub fn load_default() -> Result<AppConfig, ConfigError> {
        match Self::default_path() {
            Some(path) => Self::load(path),
            None => Ok(AppConfig::default()),
        }
    }

    /// 默认配置文件路径（仅返回存在的文件）
    pub fn default_path() -> Option<PathBuf> {
        if let Ok(explicit) = std::env::var(CONFIG_ENV_VAR) {
            let trimmed = explicit.trim();
            if !trimmed.is_empty() {
                return Some(PathBuf::from(trimmed));
            }
        }

        dirs::config_dir()
            .map(|dir| dir.join("coolcraft-tds").join("config.json"))
            .filter(|path| path.exists())
    }

    /// 从 key-value 映射构建配置
    pub fn from_map(map: &Map<String, Value>) -> AppConfig {
        let defaults = AppConfig::default();

        AppConfig {
            max_results: get_usize(map, config_keys::MAX_RESULTS, defaults.max_results, 1),
            single_size_limit: get_usize(
                map,
                config_keys::SINGLE_SIZE_LIMIT,
                defaults.single_size_limit,
                0,
            ),
            closeness_weight: get_non_negative_f64(
                map,
                config_keys::CLOSENESS_WEIGHT,
                defaults.closeness_weight,
            ),
            unit_weight: get_non_negative_f64(map, config_keys::UNIT_WEIGHT, defaults.unit_weight),
            exact_decomposition: get_bool(
                map,
                config_keys::EXACT_DECOMPOSITION,
                defaults.exact_decomposition,
            ),
            default_load_hp: get_positive_f64(
                map,
                config_keys::DEFAULT_LOAD_HP,
                defaults.default_load_hp,
            ),
            default_load_kw: get_positive_f64(
                map,
                config_keys::DEFAULT_LOAD_KW,
                defaults.default_load_kw,
            ),
            manufacturer: map
                .get(config_keys::MANUFACTURER)
                .and_then(Value::as_str)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            export_format: match map.get(config_keys::EXPORT_FORMAT).and_then(Value::as_str) {
                None => defaults.export_format,
                Some(raw) => raw.parse().unwrap_or_else(|_| {
                    warn!(config_key = config_keys::EXPORT_FORMAT, raw_value = %raw, "导出格式配置非法，使用默认值");
                    defaults.export_format
                }),
            },
        }
    }
}

// ==========================================
// 取值辅助函数（非法值回退默认值）
// ==========================================

fn get_usize(map: &Map<String, Value>, key: &str, default: usize, min: usize) -> usize {
    match map.get(key) {
        None => default,
        Some(v) => match v.as_u64().map(|n| n as usize).filter(|n| *n >= min) {
            Some(n) => n,
            None => {
                warn!(config_key = key, raw_value = %v, "配置值非法，使用默认值");
                default
            }
        },
    }
}

fn get_f64_where(
    map: &Map<String, Value>,
    key: &str,
    default: f64,
    valid: impl Fn(f64) -> bool,
) -> f64 {
    match map.get(key) {
        None => default,
        Some(v) => match v.as_f64().filter(|n| n.is_finite() && valid(*n)) {
            Some(n) => n,
            None => {
                warn!(config_key = key, raw_value = %v, "配置值非法，使用默认值");
                default
            }
        },
    }
}

fn get_non_negative_f64(map: &Map<String, Value>, key: &str, default: f64) -> f64 {
    get_f64_where(map, key, default, |n| n >= 0.0)
}

fn get_positive_f64(map: &Map<String, Value>, key: &str, default: f64) -> f64 {
    get_f64_where(map, key, default, |n| n > 0.0)
}

fn get_bool(map: &Map<String, Value>, key: &str, default: bool) -> bool {
    match map.get(key) {
        None => default,
        Some(v) => v.as_bool().unwrap_or_else(|| {
            warn!(config_key = key, raw_value = %v, "配置值非法，使用默认值");
            default
        }),
    }
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // 组合生成
    pub const MAX_RESULTS: &str = "max_results";
    pub const SINGLE_SIZE_LIMIT: &str = "single_size_limit";
    pub const CLOSENESS_WEIGHT: &str = "closeness_weight";
    pub const UNIT_WEIGHT: &str = "unit_weight";
    pub const EXACT_DECOMPOSITION: &str = "exact_decomposition";

    // 负荷默认值
    pub const DEFAULT_LOAD_HP: &str = "default_load_hp";
    pub const DEFAULT_LOAD_KW: &str = "default_load_kw";

    // 报表
    pub const MANUFACTURER: &str = "manufacturer";
    pub const EXPORT_FORMAT: &str = "export_format";
}
