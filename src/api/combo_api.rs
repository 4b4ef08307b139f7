// ==========================================
// CoolCraft TDS - 组合选型API
// ==========================================
// 职责: 一次选型会话（目录 → 容量列 → 规格 → 候选 → 选定 → 报表）
// 红线: 目录加载后只读; 候选列表每次生成整体替换
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::catalog::{Catalog, CatalogRow};
use crate::domain::combo::{Combo, EnrichedCombo, ResolvedRow};
use crate::domain::types::{LoadUnit, UnitKind};
use crate::engine::capacity_detector::CapacityColumnDetector;
use crate::engine::combo_enricher::ComboEnricher;
use crate::engine::combo_generator::{ComboGenerator, GeneratorSettings};
use crate::engine::conversion::target_capacity;
use crate::engine::manual_combo::ManualComboParser;
use crate::engine::size_discovery::SizeDiscovery;
use crate::importer::data_cleaner::DataCleaner;
use crate::importer::file_parser::UniversalFileParser;
use crate::report::assembler::{ReportAssembler, ReportMetadata, ReportTable};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;
use tracing::{debug, info, instrument, warn};

/// 型号列名
pub const MODEL_COLUMN: &str = "model";

// ==========================================
// SelectionMode - 选型模式
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionMode {
    /// 已识别容量列且至少有一个有效规格
    Automatic,
    /// 只能手工输入组合
    ManualOnly { reason: String },
}

impl SelectionMode {
    pub fn is_automatic(&self) -> bool {
        matches!(self, SelectionMode::Automatic)
    }
}

// ==========================================
// ComboApi - 选型会话
// ==========================================
pub struct ComboApi {
    catalog: Catalog,
    unit_kind: UnitKind,
    capacity_column: Option<String>,
    sizes: Vec<f64>,
    generator: ComboGenerator,
    candidates: Vec<EnrichedCombo>,
}

impl ComboApi {
    /// 读取目录文件并建立会话
    ///
    /// # 参数
    /// - path: .csv / .xlsx / .xls 文件
    /// - sheet: 工作表名（None 取第一个）
    pub fn load<P: AsRef<Path>>(
        path: P,
        sheet: Option<&str>,
        unit_kind: UnitKind,
        settings: GeneratorSettings,
    ) -> ApiResult<Self> {
        let catalog = UniversalFileParser.parse(path.as_ref(), sheet)?;
        info!(
            path = %path.as_ref().display(),
            rows = catalog.len(),
            columns = catalog.columns().len(),
            "目录已加载"
        );
        Ok(Self::from_catalog(catalog, unit_kind, settings))
    }

    /// 列出文件中的工作表
    pub fn sheet_names<P: AsRef<Path>>(path: P) -> ApiResult<Vec<String>> {
        Ok(UniversalFileParser.sheet_names(path.as_ref())?)
    }

    /// 由已加载目录建立会话（容量列识别 + 规格发现）
    pub fn from_catalog(catalog: Catalog, unit_kind: UnitKind, settings: GeneratorSettings) -> Self {
        let capacity_column = CapacityColumnDetector::new().detect(&catalog, unit_kind);
        // 非正数容量（配件/占位行）不进入规格列表
        let sizes: Vec<f64> = capacity_column
            .as_deref()
            .map(|column| SizeDiscovery::new().discover(&catalog, column))
            .unwrap_or_default()
            .into_iter()
            .filter(|s| s.is_finite() && *s > 0.0)
            .collect();

        debug!(
            capacity_column = ?capacity_column,
            size_count = sizes.len(),
            unit_kind = %unit_kind,
            "选型会话已建立"
        );

        let api = Self {
            catalog,
            unit_kind,
            capacity_column,
            sizes,
            generator: ComboGenerator::with_settings(settings),
            candidates: Vec::new(),
        };
        if let SelectionMode::ManualOnly { reason } = api.mode() {
            warn!(%reason, "自动组合不可用，降级为手工组合");
        }
        api
    }

    // ==========================================
    // 会话状态
    // ==========================================

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn unit_kind(&self) -> UnitKind {
        self.unit_kind
    }

    pub fn capacity_column(&self) -> Option<&str> {
        self.capacity_column.as_deref()
    }

    /// 已发现的正数规格（升序）
    pub fn sizes(&self) -> &[f64] {
        &self.sizes
    }

    /// 最近一次生成的候选
    pub fn candidates(&self) -> &[EnrichedCombo] {
        &self.candidates
    }

    pub fn mode(&self) -> SelectionMode {
        match &self.capacity_column {
            None => SelectionMode::ManualOnly {
                reason: format!("未识别到{}容量列", self.unit_kind.capacity_label()),
            },
            Some(column) if self.sizes.is_empty() => SelectionMode::ManualOnly {
                reason: format!("容量列 '{}' 中没有正数容量值", column),
            },
            Some(_) => SelectionMode::Automatic,
        }
    }

    // ==========================================
    // 候选生成
    // ==========================================

    /// 按负荷自动生成候选（最优在前）
    ///
    /// 负荷先换算为目录单位（室内 kW / 室外 HP）, 规格按降序传入生成器
    #[instrument(skip(self))]
    pub fn generate(&mut self, load_value: f64, load_unit: LoadUnit) -> ApiResult<&[EnrichedCombo]> {
        // 失败时不保留上一次的候选
        self.candidates.clear();

        if let SelectionMode::ManualOnly { reason } = self.mode() {
            return Err(ApiError::AutomaticModeUnavailable(reason));
        }
        let column = self
            .capacity_column
            .as_deref()
            .ok_or_else(|| ApiError::AutomaticModeUnavailable("未识别到容量列".to_string()))?;

        if !load_value.is_finite() || load_value <= 0.0 {
            return Err(ApiError::InvalidInput(format!(
                "负荷必须为正数: {}",
                load_value
            )));
        }

        let target = target_capacity(load_value, load_unit, self.unit_kind);
        let sizes_desc: Vec<f64> = self.sizes.iter().rev().copied().collect();
        let combos = self.generator.generate_candidates(target, &sizes_desc)?;

        let enricher = ComboEnricher::new(&self.catalog, column);
        self.candidates = enricher.enrich_all(&combos);

        info!(
            target,
            candidates = self.candidates.len(),
            "候选组合已生成"
        );
        Ok(&self.candidates)
    }

    /// 手工输入组合（如 "10+8+8"）
    ///
    /// 结果作为唯一候选保存; 无容量列时各台均不匹配目录行
    pub fn manual(&mut self, input: &str) -> ApiResult<EnrichedCombo> {
        let combo = ManualComboParser.parse(input)?;
        let enriched = match self.capacity_column.as_deref() {
            Some(column) => ComboEnricher::new(&self.catalog, column).enrich(&combo),
            None => unresolved(&combo),
        };

        self.candidates = vec![enriched.clone()];
        Ok(enriched)
    }

    /// 选定候选（1 起始）
    pub fn select(&self, option: usize) -> ApiResult<EnrichedCombo> {
        option
            .checked_sub(1)
            .and_then(|idx| self.candidates.get(idx))
            .cloned()
            .ok_or_else(|| {
                ApiError::InvalidInput(format!(
                    "方案序号超出范围: {}（共 {} 个候选）",
                    option,
                    self.candidates.len()
                ))
            })
    }

    // ==========================================
    // 型号替换
    // ==========================================

    /// 某台设备可替换的型号列表（去重, 升序）
    ///
    /// 优先列出与该行容量相同的型号; 没有同容量型号时列出全部型号。
    /// 目录无 model 列、无容量列或该台未匹配时返回空列表。
    pub fn model_choices(&self, resolved: &ResolvedRow) -> Vec<String> {
        if !self.catalog.has_column(MODEL_COLUMN) {
            return Vec::new();
        }
        let Some(column) = self.capacity_column.as_deref() else {
            return Vec::new();
        };
        let Some(capacity) = resolved
            .row
            .as_ref()
            .and_then(|row| row.get(column))
            .and_then(|v| DataCleaner.coerce_number(v))
        else {
            return Vec::new();
        };

        let same_capacity: BTreeSet<String> = self
            .catalog
            .rows()
            .iter()
            .filter(|row| {
                row.get(column).and_then(|v| DataCleaner.coerce_number(v)) == Some(capacity)
            })
            .filter_map(model_of)
            .collect();

        if !same_capacity.is_empty() {
            return same_capacity.into_iter().collect();
        }

        self.catalog
            .rows()
            .iter()
            .filter_map(model_of)
            .collect::<BTreeSet<String>>()
            .into_iter()
            .collect()
    }

    /// 将某台设备替换为指定型号（取目录中该型号的第一行, 台序号不变）
    ///
    /// 组合与容量合计保持不变
    pub fn override_instance(
        &self,
        enriched: &mut EnrichedCombo,
        instance: usize,
        model: &str,
    ) -> ApiResult<()> {
        if !self.catalog.has_column(MODEL_COLUMN) {
            return Err(ApiError::NotFound(format!(
                "目录中没有 '{}' 列",
                MODEL_COLUMN
            )));
        }

        let wanted = model.trim();
        let replacement = self
            .catalog
            .rows()
            .iter()
            .find(|row| model_of(row).as_deref() == Some(wanted))
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("型号不存在: {}", wanted)))?;

        let slot = enriched
            .rows
            .iter_mut()
            .find(|r| r.instance == instance)
            .ok_or_else(|| ApiError::NotFound(format!("设备序号不存在: {}", instance)))?;

        debug!(instance, model = wanted, "设备型号已替换");
        slot.row = Some(replacement);
        Ok(())
    }

    // ==========================================
    // 报表
    // ==========================================

    pub fn assemble_report(
        &self,
        selection: &EnrichedCombo,
        metadata: &ReportMetadata,
    ) -> ApiResult<ReportTable> {
        Ok(ReportAssembler::new(self.unit_kind).assemble(&self.catalog, selection, metadata)?)
    }
}

/// 目录行的型号文本（空值跳过）
fn model_of(row: &CatalogRow) -> Option<String> {
    let value = row.get(MODEL_COLUMN)?;
    if value.is_empty() {
        return None;
    }
    Some(value.to_string().trim().to_string())
}

/// 不匹配目录的逐台展开（无容量列时使用）
fn unresolved(combo: &Combo) -> EnrichedCombo {
    let rows: Vec<ResolvedRow> = combo
        .instances()
        .into_iter()
        .enumerate()
        .map(|(idx, size)| ResolvedRow {
            instance: idx + 1,
            requested_size: size,
            row: None,
        })
        .collect();
    let units = rows.len();

    EnrichedCombo {
        combo: combo.clone(),
        rows,
        total_capacity: 0.0,
        units,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::CellValue;

    fn outdoor_catalog() -> Catalog {
        let rows = [
            ("MMY-8", "8"),
            ("MMY-8B", "8"),
            ("MMY-10", "10"),
            ("MMY-12", "12"),
        ];
        Catalog::from_records(
            vec!["model".to_string(), "HP".to_string()],
            rows.iter()
                .map(|(m, hp)| vec![CellValue::from(*m), CellValue::from(*hp)])
                .collect(),
        )
    }

    fn session() -> ComboApi {
        ComboApi::from_catalog(
            outdoor_catalog(),
            UnitKind::Outdoor,
            GeneratorSettings::default(),
        )
    }

    fn model_at(enriched: &EnrichedCombo, idx: usize) -> Option<String> {
        enriched.rows[idx].row.as_ref().and_then(model_of)
    }

    #[test]
    fn test_session_detects_column_and_sizes() {
        let api = session();
        assert_eq!(api.capacity_column(), Some("HP"));
        assert_eq!(api.sizes(), &[8.0, 10.0, 12.0]);
        assert_eq!(api.mode(), SelectionMode::Automatic);
    }

    #[test]
    fn test_generate_ranks_and_enriches() {
        let mut api = session();
        let candidates = api.generate(20.0, LoadUnit::Hp).unwrap().to_vec();

        let combos: Vec<Combo> = candidates.iter().map(|c| c.combo.clone()).collect();
        assert_eq!(
            combos,
            vec![
                Combo::single(10.0, 2),
                Combo::from_counts([(12.0, 1), (8.0, 1)]),
                Combo::single(12.0, 2),
                Combo::single(8.0, 3),
            ]
        );

        let second = &candidates[1];
        assert_eq!(second.units, 2);
        assert_eq!(second.total_capacity, 20.0);
        assert_eq!(model_at(second, 0).as_deref(), Some("MMY-12"));
        assert_eq!(model_at(second, 1).as_deref(), Some("MMY-8"));
    }

    #[test]
    fn test_select_is_one_based() {
        let mut api = session();
        api.generate(20.0, LoadUnit::Hp).unwrap();

        assert_eq!(api.select(1).unwrap().combo, Combo::single(10.0, 2));
        assert!(matches!(api.select(0), Err(ApiError::InvalidInput(_))));
        assert!(matches!(api.select(99), Err(ApiError::InvalidInput(_))));
    }

    #[test]
    fn test_non_positive_capacities_are_excluded() {
        let catalog = Catalog::from_records(
            vec!["model".to_string(), "HP".to_string()],
            [("KIT-0", "0"), ("MMY-8", "8"), ("MMY-10", "10")]
                .iter()
                .map(|(m, hp)| vec![CellValue::from(*m), CellValue::from(*hp)])
                .collect(),
        );
        let mut api = ComboApi::from_catalog(catalog, UnitKind::Outdoor, GeneratorSettings::default());

        assert_eq!(api.sizes(), &[8.0, 10.0]);
        assert_eq!(api.mode(), SelectionMode::Automatic);

        let candidates = api.generate(20.0, LoadUnit::Hp).unwrap();
        assert_eq!(candidates[0].combo, Combo::single(10.0, 2));
    }

    #[test]
    fn test_only_zero_capacities_is_manual_only() {
        let catalog = Catalog::from_records(
            vec!["model".to_string(), "HP".to_string()],
            vec![vec![CellValue::from("KIT-0"), CellValue::from("0")]],
        );
        let mut api = ComboApi::from_catalog(catalog, UnitKind::Outdoor, GeneratorSettings::default());

        assert_eq!(api.capacity_column(), Some("HP"));
        assert!(api.sizes().is_empty());
        assert!(!api.mode().is_automatic());
        assert!(matches!(
            api.generate(20.0, LoadUnit::Hp),
            Err(ApiError::AutomaticModeUnavailable(_))
        ));
    }

    #[test]
    fn test_failed_generate_clears_previous_candidates() {
        let mut api = session();
        api.generate(20.0, LoadUnit::Hp).unwrap();
        assert!(api.select(1).is_ok());

        assert!(api.generate(-5.0, LoadUnit::Hp).is_err());
        assert!(api.candidates().is_empty());
        assert!(matches!(api.select(1), Err(ApiError::InvalidInput(_))));
    }

    #[test]
    fn test_generate_rejects_non_positive_load() {
        let mut api = session();
        assert!(matches!(
            api.generate(0.0, LoadUnit::Hp),
            Err(ApiError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_manual_only_without_capacity_column() {
        let catalog = Catalog::from_records(
            vec!["model".to_string(), "notes".to_string()],
            vec![vec![CellValue::from("X"), CellValue::from("quiet")]],
        );
        let mut api = ComboApi::from_catalog(catalog, UnitKind::Indoor, GeneratorSettings::default());

        assert!(!api.mode().is_automatic());
        assert!(matches!(
            api.generate(10.0, LoadUnit::Kw),
            Err(ApiError::AutomaticModeUnavailable(_))
        ));

        let manual = api.manual("5+2.5").unwrap();
        assert_eq!(manual.units, 2);
        assert!(manual.rows.iter().all(|r| r.row.is_none()));
        assert_eq!(api.select(1).unwrap(), manual);
    }

    #[test]
    fn test_manual_combo_resolves_rows() {
        let mut api = session();
        let manual = api.manual("10+8").unwrap();
        assert_eq!(manual.total_capacity, 18.0);
        assert_eq!(model_at(&manual, 0).as_deref(), Some("MMY-10"));
        assert_eq!(model_at(&manual, 1).as_deref(), Some("MMY-8"));
    }

    #[test]
    fn test_model_choices_same_capacity() {
        let mut api = session();
        let selection = api.manual("8").unwrap();
        assert_eq!(
            api.model_choices(&selection.rows[0]),
            vec!["MMY-8".to_string(), "MMY-8B".to_string()]
        );
    }

    #[test]
    fn test_model_choices_unresolved_is_empty() {
        let api = session();
        let row = ResolvedRow {
            instance: 1,
            requested_size: 8.0,
            row: None,
        };
        assert!(api.model_choices(&row).is_empty());
    }

    #[test]
    fn test_override_instance_keeps_index() {
        let mut api = session();
        let mut selection = api.manual("12+8").unwrap();

        api.override_instance(&mut selection, 2, "MMY-8B").unwrap();
        assert_eq!(selection.rows[1].instance, 2);
        assert_eq!(model_at(&selection, 1).as_deref(), Some("MMY-8B"));
        assert_eq!(model_at(&selection, 0).as_deref(), Some("MMY-12"));
        assert_eq!(selection.total_capacity, 20.0);
    }

    #[test]
    fn test_override_unknown_targets() {
        let mut api = session();
        let mut selection = api.manual("12").unwrap();

        assert!(matches!(
            api.override_instance(&mut selection, 1, "NOPE"),
            Err(ApiError::NotFound(_))
        ));
        assert!(matches!(
            api.override_instance(&mut selection, 5, "MMY-8"),
            Err(ApiError::NotFound(_))
        ));
    }

    #[test]
    fn test_assemble_report_from_selection() {
        let mut api = session();
        let selection = api.manual("10+8").unwrap();
        let table = api
            .assemble_report(&selection, &ReportMetadata::default())
            .unwrap();

        assert_eq!(table.rows.len(), 2);
        assert_eq!(
            table.cell(0, "SelectedCombo"),
            Some(&CellValue::Text("1×10HP + 1×8HP".to_string()))
        );
        assert_eq!(table.cell(1, "model"), Some(&CellValue::Text("MMY-8".to_string())));
    }
}
