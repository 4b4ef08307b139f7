// ==========================================
// CoolCraft TDS - 规格发现
// ==========================================
// 职责: 从容量列提取可用规格（去重 + 升序）
// 红线: 非数值 / 空单元格视为缺失, 不报错, 不删除目录行
// ==========================================

use crate::domain::catalog::Catalog;
use crate::importer::data_cleaner::DataCleaner;
use tracing::debug;

pub struct SizeDiscovery {
    cleaner: DataCleaner,
}

impl SizeDiscovery {
    pub fn new() -> Self {
        Self {
            cleaner: DataCleaner,
        }
    }

    /// 容量列的所有可用数值（按目录行顺序, 缺失值为 None）
    pub fn capacity_values<'a>(
        &'a self,
        catalog: &'a Catalog,
        column: &'a str,
    ) -> impl Iterator<Item = Option<f64>> + 'a {
        catalog.rows().iter().map(move |row| {
            row.get(column)
                .and_then(|value| self.cleaner.coerce_number(value))
        })
    }

    /// 提取去重后的规格列表（升序）
    pub fn discover(&self, catalog: &Catalog, column: &str) -> Vec<f64> {
        let mut sizes: Vec<f64> = self.capacity_values(catalog, column).flatten().collect();
        sizes.sort_by(|a, b| a.total_cmp(b));
        sizes.dedup();

        debug!(column = %column, count = sizes.len(), "规格发现完成");
        sizes
    }
}

impl Default for SizeDiscovery {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::CellValue;

    fn catalog(values: &[&str]) -> Catalog {
        Catalog::from_records(
            vec!["model".to_string(), "HP".to_string()],
            values
                .iter()
                .enumerate()
                .map(|(i, v)| vec![CellValue::Text(format!("M{}", i)), CellValue::from(*v)])
                .collect(),
        )
    }

    #[test]
    fn test_discover_sorted_distinct() {
        let catalog = catalog(&["10", "8", "10", "12.5", "8"]);
        let sizes = SizeDiscovery::new().discover(&catalog, "HP");
        assert_eq!(sizes, vec![8.0, 10.0, 12.5]);
    }

    #[test]
    fn test_discover_skips_non_numeric() {
        let catalog = catalog(&["10", "n/a", "", "8"]);
        let sizes = SizeDiscovery::new().discover(&catalog, "HP");
        assert_eq!(sizes, vec![8.0, 10.0]);
        // 目录行不删除
        assert_eq!(catalog.len(), 4);
    }

    #[test]
    fn test_discover_missing_column() {
        let catalog = catalog(&["10"]);
        assert!(SizeDiscovery::new().discover(&catalog, "kW").is_empty());
    }

    #[test]
    fn test_discover_mixed_cell_types() {
        let catalog = Catalog::from_records(
            vec!["HP".to_string()],
            vec![
                vec![CellValue::Number(16.0)],
                vec![CellValue::Text("16".to_string())],
                vec![CellValue::Number(14.0)],
            ],
        );
        assert_eq!(SizeDiscovery::new().discover(&catalog, "HP"), vec![14.0, 16.0]);
    }
}
