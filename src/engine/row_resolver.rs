// ==========================================
// CoolCraft TDS - 目录行匹配引擎
// ==========================================
// 职责: 为组合中的每台设备匹配目录行
// 规则:
// 1) 精确匹配: 容量值数值相等的第一行（目录顺序）
// 2) 最近邻: |容量值 - 规格| 最小的行, 距离相同取目录顺序靠前者
// 3) 目录无可用容量值: 无匹配（由调用方保留台序号）
// 红线: 纯查询, 不修改目录
// ==========================================

use crate::domain::catalog::{Catalog, CatalogRow};
use crate::importer::data_cleaner::DataCleaner;

/// 线性扫描实现（单次查询）
///
/// 与 `RowResolver` 结果一致; 适合只查一次的场景
pub fn resolve_instance(catalog: &Catalog, size: f64, capacity_column: &str) -> Option<CatalogRow> {
    let cleaner = DataCleaner;
    let values: Vec<(usize, f64)> = catalog
        .rows()
        .iter()
        .enumerate()
        .filter_map(|(idx, row)| {
            row.get(capacity_column)
                .and_then(|v| cleaner.coerce_number(v))
                .map(|v| (idx, v))
        })
        .collect();

    let exact = values.iter().find(|(_, v)| *v == size);
    let chosen = exact.or_else(|| {
        values.iter().fold(None, |best: Option<&(usize, f64)>, candidate| match best {
            Some(b) if (b.1 - size).abs() <= (candidate.1 - size).abs() => Some(b),
            _ => Some(candidate),
        })
    });

    chosen.map(|(idx, _)| catalog.rows()[*idx].clone())
}

// ==========================================
// CapacityIndex - 容量有序索引
// ==========================================
/// (容量值, 行号) 按容量升序、行号升序排列
#[derive(Debug, Clone, Default)]
pub struct CapacityIndex {
    entries: Vec<(f64, usize)>,
}

impl CapacityIndex {
    pub fn build(catalog: &Catalog, capacity_column: &str) -> Self {
        let cleaner = DataCleaner;
        let mut entries: Vec<(f64, usize)> = catalog
            .rows()
            .iter()
            .enumerate()
            .filter_map(|(idx, row)| {
                row.get(capacity_column)
                    .and_then(|v| cleaner.coerce_number(v))
                    .map(|v| (v, idx))
            })
            .collect();
        entries.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 某容量值分组的第一个条目（行号最小）
    fn group_start(&self, value: f64) -> usize {
        self.entries.partition_point(|(c, _)| *c < value)
    }

    /// 查找最佳匹配行号
    pub fn lookup(&self, size: f64) -> Option<usize> {
        if self.entries.is_empty() || !size.is_finite() {
            return None;
        }

        // 第一个容量 >= size 的条目（同值分组内行号最小）
        let upper_pos = self.group_start(size);
        let upper = self.entries.get(upper_pos).copied();

        // 精确匹配
        if let Some((c, idx)) = upper {
            if c == size {
                return Some(idx);
            }
        }

        // 最近的较小容量分组, 取分组内行号最小者
        let lower = upper_pos
            .checked_sub(1)
            .map(|pos| self.entries[self.group_start(self.entries[pos].0)]);

        match (lower, upper) {
            (Some((lc, li)), Some((uc, ui))) => {
                let d_lower = size - lc;
                let d_upper = uc - size;
                if d_lower < d_upper || (d_lower == d_upper && li < ui) {
                    Some(li)
                } else {
                    Some(ui)
                }
            }
            (Some((_, li)), None) => Some(li),
            (None, Some((_, ui))) => Some(ui),
            (None, None) => None,
        }
    }
}

// ==========================================
// RowResolver - 目录行匹配引擎
// ==========================================
pub struct RowResolver<'a> {
    catalog: &'a Catalog,
    capacity_column: String,
    index: CapacityIndex,
}

impl<'a> RowResolver<'a> {
    /// 构建匹配器（一次性建立容量索引）
    pub fn new(catalog: &'a Catalog, capacity_column: &str) -> Self {
        Self {
            catalog,
            capacity_column: capacity_column.to_string(),
            index: CapacityIndex::build(catalog, capacity_column),
        }
    }

    pub fn capacity_column(&self) -> &str {
        &self.capacity_column
    }

    /// 匹配单台设备
    pub fn resolve(&self, size: f64) -> Option<&'a CatalogRow> {
        self.index
            .lookup(size)
            .and_then(|idx| self.catalog.rows().get(idx))
    }

    /// 已匹配行的容量值（缺失返回 None）
    pub fn capacity_of(&self, row: &CatalogRow) -> Option<f64> {
        row.get(&self.capacity_column)
            .and_then(|v| DataCleaner.coerce_number(v))
    }
}
