// ==========================================
// CoolCraft TDS - 候选方案摘要
// ==========================================

use crate::domain::combo::EnrichedCombo;
use crate::domain::types::{format_size, round3, UnitKind};

/// 单个候选方案的一行摘要
///
/// 例: "Option 1: 2×8HP + 1×2HP | Units: 3 | Total: 18 HP"
pub fn option_line(option: usize, enriched: &EnrichedCombo, unit_kind: UnitKind) -> String {
    let label = unit_kind.capacity_label();
    format!(
        "Option {}: {} | Units: {} | Total: {} {}",
        option,
        enriched.combo.describe(label),
        enriched.units,
        format_size(round3(enriched.total_capacity)),
        label
    )
}
