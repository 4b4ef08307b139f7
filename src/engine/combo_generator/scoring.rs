use super::core::GeneratorSettings;
use crate::domain::combo::Combo;

/// 候选组合评分（越大越好）
///
/// - closeness = 1 / (1 + |total - target| / max(1, target))
/// - unit_penalty = 1 / (1 + units)
/// - score = closeness_weight * closeness + unit_weight * unit_penalty
pub(super) fn compute_score(combo: &Combo, target: f64, settings: &GeneratorSettings) -> f64 {
    let total = combo.total_capacity();
    let units = f64::from(combo.unit_count());

    let closeness = 1.0 / (1.0 + (total - target).abs() / target.max(1.0));
    let unit_penalty = 1.0 / (1.0 + units);

    settings.closeness_weight * closeness + settings.unit_weight * unit_penalty
}
