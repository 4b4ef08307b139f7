// ==========================================
// CoolCraft TDS - 容量列识别引擎
// ==========================================
// 职责: 按列名启发式规则定位目录中的容量列
// 输入: 目录列名 + 机组类型
// 输出: 原始列名（未命中返回 None, 调用方降级为手动模式）
// ==========================================
// 规则按层级顺序匹配: 第一个有命中的层级胜出,
// 同层级内按目录列顺序取第一个
// ==========================================

use crate::domain::catalog::Catalog;
use crate::domain::types::UnitKind;
use crate::importer::data_cleaner::DataCleaner;
use tracing::{debug, warn};

/// 单个识别层级: 名称 + 作用于标准化列名的判定函数
pub struct DetectionTier {
    pub name: &'static str,
    pub matches: fn(&str) -> bool,
}

/// 室内机: 容量单位 kW
const INDOOR_TIERS: &[DetectionTier] = &[
    DetectionTier {
        name: "cooling_capacity_kw",
        matches: |n| n.contains("cooling capacity") && n.contains("kw"),
    },
    DetectionTier {
        name: "capacity_kw",
        matches: |n| n.contains("capacity") && n.contains("kw"),
    },
    DetectionTier {
        name: "kw",
        matches: |n| n.contains("kw"),
    },
];

/// 室外机: 容量单位 HP
const OUTDOOR_TIERS: &[DetectionTier] = &[
    DetectionTier {
        name: "hp",
        matches: |n| n.contains("hp") && (n.contains("capacity") || n.contains("hp")),
    },
    DetectionTier {
        name: "horsepower_or_word_hp",
        matches: |n| n.contains("horsepower") || contains_word(n, "hp"),
    },
    DetectionTier {
        name: "capacity_hp",
        matches: |n| n.contains("capacity") && (n.contains("hp") || n.contains("horsepower")),
    },
];

/// 独立单词匹配（等价于正则 `\bword\b`）
fn contains_word(haystack: &str, word: &str) -> bool {
    let is_word_char = |c: char| c.is_alphanumeric() || c == '_';

    haystack.match_indices(word).any(|(start, _)| {
        let before_ok = haystack[..start]
            .chars()
            .next_back()
            .map_or(true, |c| !is_word_char(c));
        let after_ok = haystack[start + word.len()..]
            .chars()
            .next()
            .map_or(true, |c| !is_word_char(c));
        before_ok && after_ok
    })
}

// ==========================================
// CapacityColumnDetector - 容量列识别引擎
// ==========================================
pub struct CapacityColumnDetector {
    cleaner: DataCleaner,
}

impl CapacityColumnDetector {
    pub fn new() -> Self {
        Self {
            cleaner: DataCleaner,
        }
    }

    /// 机组类型对应的识别层级（按优先级排列）
    pub fn tiers(unit_kind: UnitKind) -> &'static [DetectionTier] {
        match unit_kind {
            UnitKind::Indoor => INDOOR_TIERS,
            UnitKind::Outdoor => OUTDOOR_TIERS,
        }
    }

    /// 在列名列表中查找容量列
    ///
    /// # 返回
    /// - Some(列名): 原始（未标准化）列名
    /// - None: 所有层级均未命中
    pub fn find_capacity_column(&self, columns: &[String], unit_kind: UnitKind) -> Option<String> {
        let normalized: Vec<(&String, String)> = columns
            .iter()
            .map(|orig| (orig, self.cleaner.normalize_name(orig)))
            .collect();

        for tier in Self::tiers(unit_kind) {
            if let Some((orig, _)) = normalized.iter().find(|(_, norm)| (tier.matches)(norm)) {
                debug!(
                    unit_kind = %unit_kind,
                    tier = tier.name,
                    column = %orig,
                    "容量列识别命中"
                );
                return Some((*orig).clone());
            }
        }

        warn!(unit_kind = %unit_kind, "未识别到容量列, 自动组合不可用");
        None
    }

    /// 在目录中查找容量列
    pub fn detect(&self, catalog: &Catalog, unit_kind: UnitKind) -> Option<String> {
        self.find_capacity_column(catalog.columns(), unit_kind)
    }
}

impl Default for CapacityColumnDetector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cols(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_indoor_prefers_cooling_capacity() {
        let detector = CapacityColumnDetector::new();
        let columns = cols(&["Power Input (kW)", "Heating Capacity kW", "Cooling  Capacity (kW)"]);

        assert_eq!(
            detector.find_capacity_column(&columns, UnitKind::Indoor),
            Some("Cooling  Capacity (kW)".to_string())
        );
    }

    #[test]
    fn test_indoor_capacity_tier_before_plain_kw() {
        let detector = CapacityColumnDetector::new();
        let columns = cols(&["Power Input (kW)", "Nominal Capacity (kW)"]);

        assert_eq!(
            detector.find_capacity_column(&columns, UnitKind::Indoor),
            Some("Nominal Capacity (kW)".to_string())
        );
    }

    #[test]
    fn test_indoor_plain_kw_fallback() {
        let detector = CapacityColumnDetector::new();
        let columns = cols(&["Model", "Size KW"]);

        assert_eq!(
            detector.find_capacity_column(&columns, UnitKind::Indoor),
            Some("Size KW".to_string())
        );
    }

    #[test]
    fn test_outdoor_hp_column() {
        let detector = CapacityColumnDetector::new();
        let columns = cols(&["Model", "Capacity (kW)", " HP "]);

        assert_eq!(
            detector.find_capacity_column(&columns, UnitKind::Outdoor),
            Some(" HP ".to_string())
        );
    }

    #[test]
    fn test_outdoor_horsepower_column() {
        let detector = CapacityColumnDetector::new();
        let columns = cols(&["Model", "Horsepower"]);

        assert_eq!(
            detector.find_capacity_column(&columns, UnitKind::Outdoor),
            Some("Horsepower".to_string())
        );
    }

    #[test]
    fn test_zero_width_space_stripped() {
        let detector = CapacityColumnDetector::new();
        let columns = cols(&["Model", "H\u{200b}P"]);

        assert_eq!(
            detector.find_capacity_column(&columns, UnitKind::Outdoor),
            Some("H\u{200b}P".to_string())
        );
    }

    #[test]
    fn test_not_found() {
        let detector = CapacityColumnDetector::new();
        let columns = cols(&["Model", "Refrigerant"]);

        assert_eq!(detector.find_capacity_column(&columns, UnitKind::Indoor), None);
        assert_eq!(detector.find_capacity_column(&columns, UnitKind::Outdoor), None);
    }

    #[test]
    fn test_contains_word() {
        assert!(contains_word("rated hp", "hp"));
        assert!(contains_word("hp (nominal)", "hp"));
        assert!(!contains_word("chp", "hp"));
        assert!(!contains_word("hp2", "hp"));
    }
}
