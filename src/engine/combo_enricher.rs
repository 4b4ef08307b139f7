// ==========================================
// CoolCraft TDS - 组合补全引擎
// ==========================================
// 职责: Combo → EnrichedCombo（逐台展开 + 目录行匹配 + 合计）
// 红线: 每台设备都保留台序号, 匹配失败也不丢台
// ==========================================

use crate::domain::catalog::Catalog;
use crate::domain::combo::{Combo, EnrichedCombo, ResolvedRow};
use crate::engine::row_resolver::RowResolver;
use tracing::{debug, instrument, warn};

pub struct ComboEnricher<'a> {
    resolver: RowResolver<'a>,
}

impl<'a> ComboEnricher<'a> {
    pub fn new(catalog: &'a Catalog, capacity_column: &str) -> Self {
        Self {
            resolver: RowResolver::new(catalog, capacity_column),
        }
    }

    /// 补全单个组合
    ///
    /// 台序号从 1 开始, 顺序与 `Combo::instances` 一致（规格降序）
    #[instrument(skip(self, combo), fields(units = combo.unit_count()))]
    pub fn enrich(&self, combo: &Combo) -> EnrichedCombo {
        let rows: Vec<ResolvedRow> = combo
            .instances()
            .into_iter()
            .enumerate()
            .map(|(idx, size)| {
                let row = self.resolver.resolve(size).cloned();
                if row.is_none() {
                    warn!(instance = idx + 1, size, "目录中无可匹配的行");
                }
                ResolvedRow {
                    instance: idx + 1,
                    requested_size: size,
                    row,
                }
            })
            .collect();

        let total_capacity = self.total_of(&rows);
        let units = rows.len();
        debug!(total_capacity, units, "组合补全完成");

        EnrichedCombo {
            combo: combo.clone(),
            rows,
            total_capacity,
            units,
        }
    }

    /// 批量补全
    pub fn enrich_all(&self, combos: &[Combo]) -> Vec<EnrichedCombo> {
        combos.iter().map(|combo| self.enrich(combo)).collect()
    }

    /// 已匹配行容量合计（未匹配或容量缺失按 0 计）
    pub fn total_of(&self, rows: &[ResolvedRow]) -> f64 {
        rows.iter()
            .filter_map(|r| r.row.as_ref())
            .filter_map(|row| self.resolver.capacity_of(row))
            .sum()
    }
}
