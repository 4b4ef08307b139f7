// ==========================================
// CoolCraft TDS - 组合实体
// ==========================================
// 职责: Combo (规格 → 台数) 与 EnrichedCombo (逐台匹配目录行)
// 红线: 组合创建后不可变; 逐台展开是派生视图, 不单独维护
// ==========================================

use crate::domain::catalog::CatalogRow;
use crate::domain::types::format_size;
use serde::{Deserialize, Serialize};

// ==========================================
// Combo - 设备组合
// ==========================================
/// 规格 → 台数 的多重集合
///
/// 内部按规格降序保存, 规格唯一, 台数均 >= 1
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Combo {
    entries: Vec<(f64, u32)>,
}

impl Combo {
    /// 由 (规格, 台数) 构建组合
    ///
    /// 相同规格台数合并; 台数为 0 的条目丢弃
    pub fn from_counts<I>(counts: I) -> Self
    where
        I: IntoIterator<Item = (f64, u32)>,
    {
        let mut entries: Vec<(f64, u32)> = Vec::new();
        for (size, count) in counts {
            if count == 0 {
                continue;
            }
            match entries.iter_mut().find(|(s, _)| *s == size) {
                Some(entry) => entry.1 += count,
                None => entries.push((size, count)),
            }
        }
        entries.sort_by(|a, b| b.0.total_cmp(&a.0));
        Self { entries }
    }

    /// 单一规格组合
    pub fn single(size: f64, count: u32) -> Self {
        Self::from_counts([(size, count)])
    }

    /// (规格, 台数), 规格降序
    pub fn entries(&self) -> &[(f64, u32)] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn count_of(&self, size: f64) -> u32 {
        self.entries
            .iter()
            .find(|(s, _)| *s == size)
            .map(|(_, c)| *c)
            .unwrap_or(0)
    }

    /// 总容量 = Σ 规格 × 台数
    pub fn total_capacity(&self) -> f64 {
        self.entries.iter().map(|(s, c)| s * f64::from(*c)).sum()
    }

    /// 总台数 = Σ 台数
    pub fn unit_count(&self) -> u32 {
        self.entries.iter().map(|(_, c)| c).sum()
    }

    /// 逐台展开: 规格降序, 每个规格按台数重复
    pub fn instances(&self) -> Vec<f64> {
        self.entries
            .iter()
            .flat_map(|(s, c)| std::iter::repeat(*s).take(*c as usize))
            .collect()
    }

    /// 去重键: 与生成来源无关, 只取决于 (规格, 台数) 内容
    pub(crate) fn content_key(&self) -> Vec<(u64, u32)> {
        self.entries.iter().map(|(s, c)| (s.to_bits(), *c)).collect()
    }

    /// 可读描述: "{台数}×{规格}{单位}" 以 " + " 连接
    pub fn describe(&self, unit_label: &str) -> String {
        self.entries
            .iter()
            .map(|(s, c)| format!("{}×{}{}", c, format_size(*s), unit_label))
            .collect::<Vec<_>>()
            .join(" + ")
    }
}

// ==========================================
// ResolvedRow - 单台匹配结果
// ==========================================
/// 一台设备的目录匹配结果
///
/// `instance` 为 1 起始的台序号; 匹配不到目录行时 `row` 为 None, 台序号仍保留
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedRow {
    pub instance: usize,
    pub requested_size: f64,
    pub row: Option<CatalogRow>,
}

// ==========================================
// EnrichedCombo - 带目录行的组合
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedCombo {
    pub combo: Combo,
    pub rows: Vec<ResolvedRow>,
    /// 已匹配目录行的容量合计（未匹配按 0 计）
    pub total_capacity: f64,
    pub units: usize,
}
