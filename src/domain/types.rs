// ==========================================
// CoolCraft TDS - 领域类型定义
// ==========================================
// 职责: 机组类型 / 负荷单位 / 数值展示格式
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// 机组类型 (Unit Kind)
// ==========================================
// 同时决定容量列识别规则与容量单位 (kW / HP)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UnitKind {
    Indoor,  // 室内机, 容量单位 kW
    Outdoor, // 室外机, 容量单位 HP
}

impl UnitKind {
    /// 目录容量列所使用的物理单位
    pub fn capacity_unit(&self) -> LoadUnit {
        match self {
            UnitKind::Indoor => LoadUnit::Kw,
            UnitKind::Outdoor => LoadUnit::Hp,
        }
    }

    /// 报表与描述中使用的单位标签
    pub fn capacity_label(&self) -> &'static str {
        self.capacity_unit().label()
    }
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitKind::Indoor => write!(f, "INDOOR"),
            UnitKind::Outdoor => write!(f, "OUTDOOR"),
        }
    }
}

impl FromStr for UnitKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "indoor" => Ok(UnitKind::Indoor),
            "outdoor" => Ok(UnitKind::Outdoor),
            other => Err(format!("未知机组类型: {}", other)),
        }
    }
}

// ==========================================
// 负荷单位 (Load Unit)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LoadUnit {
    Kw,  // 千瓦
    Hp,  // 匹 (马力)
    Ton, // 冷吨
}

impl LoadUnit {
    pub fn label(&self) -> &'static str {
        match self {
            LoadUnit::Kw => "kW",
            LoadUnit::Hp => "HP",
            LoadUnit::Ton => "Ton",
        }
    }
}

impl fmt::Display for LoadUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for LoadUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "kw" => Ok(LoadUnit::Kw),
            "hp" => Ok(LoadUnit::Hp),
            "ton" | "tons" | "tr" => Ok(LoadUnit::Ton),
            other => Err(format!("未知负荷单位: {}", other)),
        }
    }
}

// ==========================================
// 数值展示
// ==========================================

/// 容量值展示: 整数值不带小数部分 (10 而非 10.0)
pub fn format_size(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// 四舍五入到 3 位小数（仅用于展示）
pub fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_kind_label() {
        assert_eq!(UnitKind::Indoor.capacity_label(), "kW");
        assert_eq!(UnitKind::Outdoor.capacity_label(), "HP");
    }

    #[test]
    fn test_unit_kind_from_str() {
        assert_eq!("Indoor".parse::<UnitKind>(), Ok(UnitKind::Indoor));
        assert_eq!(" outdoor ".parse::<UnitKind>(), Ok(UnitKind::Outdoor));
        assert!("roof".parse::<UnitKind>().is_err());
    }

    #[test]
    fn test_load_unit_from_str() {
        assert_eq!("kW".parse::<LoadUnit>(), Ok(LoadUnit::Kw));
        assert_eq!("HP".parse::<LoadUnit>(), Ok(LoadUnit::Hp));
        assert_eq!("ton".parse::<LoadUnit>(), Ok(LoadUnit::Ton));
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(10.0), "10");
        assert_eq!(format_size(2.8), "2.8");
        assert_eq!(format_size(0.5), "0.5");
    }

    #[test]
    fn test_round3() {
        assert_eq!(round3(1.23456), 1.235);
        assert_eq!(round3(18.0), 18.0);
    }
}
