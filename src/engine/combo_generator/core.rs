// ==========================================
// CoolCraft TDS - 组合生成引擎
// ==========================================
// 生成步骤（顺序即生成顺序）:
// 1) 整除候选: 目标为某规格整数倍时 {s: target/s}
// 2) 贪心候选: 规格降序逐个取整, 余量用最小规格补一台
// 3) 单规格候选: 输入顺序前 N 个规格, 台数 = ceil(target / s)
// 4) 按内容去重 → 截断 → 评分 → 稳定降序排序
// ==========================================

use super::scoring::compute_score;
use crate::domain::combo::Combo;
use crate::engine::error::{EngineError, EngineResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, instrument};

/// 浮点容差（整除判定 / 贪心余量）
const EPSILON: f64 = 1e-9;

// ==========================================
// GeneratorSettings - 生成参数
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorSettings {
    /// 截断后保留的候选数量上限
    pub max_results: usize,
    /// 单规格候选覆盖的规格数量（输入顺序前 N 个）
    pub single_size_limit: usize,
    /// 容量接近度权重
    pub closeness_weight: f64,
    /// 台数惩罚权重
    pub unit_weight: f64,
    /// 是否生成整除候选
    pub exact_decomposition: bool,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            max_results: 12,
            single_size_limit: 6,
            closeness_weight: 0.6,
            unit_weight: 0.4,
            exact_decomposition: true,
        }
    }
}

/// 带评分的候选组合（评分仅用于诊断/日志）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCombo {
    pub combo: Combo,
    pub score: f64,
}

// ==========================================
// ComboGenerator - 组合生成引擎
// ==========================================
pub struct ComboGenerator {
    settings: GeneratorSettings,
}

impl ComboGenerator {
    pub fn new() -> Self {
        Self {
            settings: GeneratorSettings::default(),
        }
    }

    pub fn with_settings(settings: GeneratorSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &GeneratorSettings {
        &self.settings
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 生成候选组合（最优在前）
    ///
    /// # 参数
    /// - `target`: 目标容量（目录单位, > 0）
    /// - `sizes`: 可用规格（> 0, 非空）; 单规格步骤按此顺序取前 N 个
    ///
    /// # 返回
    /// - Ok(Vec<Combo>): 至少一个候选
    /// - Err(InvalidInput): 规格为空 / 非正数 / 目标非正数
    pub fn generate_candidates(&self, target: f64, sizes: &[f64]) -> EngineResult<Vec<Combo>> {
        Ok(self
            .generate_scored(target, sizes)?
            .into_iter()
            .map(|scored| scored.combo)
            .collect())
    }

    /// 生成候选组合并保留评分
    #[instrument(skip(self, sizes), fields(size_count = sizes.len()))]
    pub fn generate_scored(&self, target: f64, sizes: &[f64]) -> EngineResult<Vec<ScoredCombo>> {
        self.validate(target, sizes)?;

        let mut raw: Vec<Combo> = Vec::new();

        // 1. 整除候选
        if self.settings.exact_decomposition {
            raw.extend(self.exact_candidates(target, sizes));
        }

        // 2. 贪心候选
        let greedy = self.greedy_candidate(target, sizes);
        if !greedy.is_empty() {
            raw.push(greedy);
        }

        // 3. 单规格候选
        raw.extend(self.single_size_candidates(target, sizes));

        // 4. 去重 + 截断（保持生成顺序）
        let mut seen = HashSet::new();
        let survivors: Vec<Combo> = raw
            .into_iter()
            .filter(|combo| seen.insert(combo.content_key()))
            .take(self.settings.max_results)
            .collect();

        // 5. 评分 + 稳定排序（同分保持生成顺序）
        let mut scored: Vec<ScoredCombo> = survivors
            .into_iter()
            .map(|combo| {
                let score = compute_score(&combo, target, &self.settings);
                ScoredCombo { combo, score }
            })
            .collect();
        scored.sort_by(|a, b| b.score.total_cmp(&a.score));

        debug!(target, candidates = scored.len(), "候选组合生成完成");
        Ok(scored)
    }

    // ==========================================
    // 生成步骤
    // ==========================================

    /// 整除候选: 每个能整除目标的规格各生成一个单规格组合
    pub fn exact_candidates(&self, target: f64, sizes: &[f64]) -> Vec<Combo> {
        sizes
            .iter()
            .filter_map(|&size| {
                let multiple = (target / size).round();
                let exact = (multiple * size - target).abs() <= EPSILON * target.max(1.0);
                if multiple >= 1.0 && exact {
                    Some(Combo::single(size, multiple as u32))
                } else {
                    None
                }
            })
            .collect()
    }

    /// 贪心候选
    ///
    /// 余量初值为 round(target)（银行家舍入）; 规格降序取整;
    /// 最终仍有余量时补一台最小规格, 保证总容量 >= round(target)
    pub fn greedy_candidate(&self, target: f64, sizes: &[f64]) -> Combo {
        let mut descending = sizes.to_vec();
        descending.sort_by(|a, b| b.total_cmp(a));

        let mut remainder = target.round_ties_even();
        let mut counts: Vec<(f64, u32)> = Vec::new();

        for &size in &descending {
            let count = (remainder / size).floor();
            if count >= 1.0 {
                counts.push((size, count as u32));
                remainder -= size * count;
            }
        }

        if remainder > EPSILON {
            if let Some(&smallest) = descending.last() {
                counts.push((smallest, 1));
            }
        }

        Combo::from_counts(counts)
    }

    /// 单规格候选: 输入顺序前 N 个规格, 台数 = ceil(target / size)
    pub fn single_size_candidates(&self, target: f64, sizes: &[f64]) -> Vec<Combo> {
        sizes
            .iter()
            .take(self.settings.single_size_limit)
            .map(|&size| Combo::single(size, (target / size).ceil() as u32))
            .filter(|combo| !combo.is_empty())
            .collect()
    }

    // ==========================================
    // 输入校验
    // ==========================================

    fn validate(&self, target: f64, sizes: &[f64]) -> EngineResult<()> {
        if sizes.is_empty() {
            return Err(EngineError::InvalidInput(
                "可用规格为空, 无法自动生成组合".to_string(),
            ));
        }
        if let Some(bad) = sizes.iter().find(|s| !s.is_finite() || **s <= 0.0) {
            return Err(EngineError::InvalidInput(format!("规格必须为正数: {}", bad)));
        }
        if !target.is_finite() || target <= 0.0 {
            return Err(EngineError::InvalidInput(format!(
                "目标容量必须为正数: {}",
                target
            )));
        }
        if self.settings.max_results == 0 {
            return Err(EngineError::InvalidInput(
                "max_results 必须大于 0".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for ComboGenerator {
    fn default() -> Self {
        Self::new()
    }
}
