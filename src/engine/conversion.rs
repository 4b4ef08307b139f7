// ==========================================
// CoolCraft TDS - 负荷单位换算
// ==========================================
// 固定换算系数:
// - 1 HP  = 0.745699872 kW
// - 1 Ton = 3.517 kW
// 纯线性换算, 内部全精度, 仅展示时舍入
// ==========================================

use crate::domain::types::{LoadUnit, UnitKind};

/// 1 HP 对应的 kW
pub const KW_PER_HP: f64 = 0.745699872;

/// 1 冷吨对应的 kW
pub const KW_PER_TON: f64 = 3.517;

/// 1 kW 对应的 HP
pub const KW_TO_HP: f64 = 1.0 / KW_PER_HP;

/// 1 冷吨对应的 HP
pub const TON_TO_HP: f64 = KW_PER_TON / KW_PER_HP;

pub fn kw_to_hp(kw: f64) -> f64 {
    kw * KW_TO_HP
}

pub fn hp_to_kw(hp: f64) -> f64 {
    hp * KW_PER_HP
}

pub fn ton_to_kw(ton: f64) -> f64 {
    ton * KW_PER_TON
}

pub fn ton_to_hp(ton: f64) -> f64 {
    ton * TON_TO_HP
}

/// 任意两种负荷单位之间换算
pub fn convert(value: f64, from: LoadUnit, to: LoadUnit) -> f64 {
    match (from, to) {
        (a, b) if a == b => value,
        (LoadUnit::Kw, LoadUnit::Hp) => kw_to_hp(value),
        (LoadUnit::Hp, LoadUnit::Kw) => hp_to_kw(value),
        (LoadUnit::Ton, LoadUnit::Kw) => ton_to_kw(value),
        (LoadUnit::Ton, LoadUnit::Hp) => ton_to_hp(value),
        (LoadUnit::Kw, LoadUnit::Ton) => value / KW_PER_TON,
        (LoadUnit::Hp, LoadUnit::Ton) => value / TON_TO_HP,
        _ => value,
    }
}

/// 将用户输入的负荷换算为目录容量单位（室内 kW / 室外 HP）
pub fn target_capacity(load_value: f64, load_unit: LoadUnit, unit_kind: UnitKind) -> f64 {
    convert(load_value, load_unit, unit_kind.capacity_unit())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_rel_close(a: f64, b: f64) {
        assert!(
            (a - b).abs() <= 1e-9 * b.abs().max(1e-12),
            "{} != {}",
            a,
            b
        );
    }

    #[test]
    fn test_constants() {
        assert_rel_close(KW_TO_HP, 1.3410220888438076);
        assert_rel_close(TON_TO_HP, 4.716374686463672);
        assert_rel_close(ton_to_kw(1.0), 3.517);
    }

    #[test]
    fn test_round_trip() {
        for x in [0.1, 1.0, 2.8, 10.0, 123.456, 1000.0] {
            assert_rel_close(kw_to_hp(hp_to_kw(x)), x);
            assert_rel_close(hp_to_kw(kw_to_hp(x)), x);
        }
    }

    #[test]
    fn test_target_capacity_outdoor() {
        assert_eq!(target_capacity(100.0, LoadUnit::Hp, UnitKind::Outdoor), 100.0);
        assert_rel_close(
            target_capacity(10.0, LoadUnit::Kw, UnitKind::Outdoor),
            10.0 * KW_TO_HP,
        );
        assert_rel_close(
            target_capacity(2.0, LoadUnit::Ton, UnitKind::Outdoor),
            2.0 * TON_TO_HP,
        );
    }

    #[test]
    fn test_target_capacity_indoor() {
        assert_eq!(target_capacity(10.0, LoadUnit::Kw, UnitKind::Indoor), 10.0);
        assert_rel_close(
            target_capacity(4.0, LoadUnit::Hp, UnitKind::Indoor),
            4.0 * 0.745699872,
        );
        assert_rel_close(
            target_capacity(2.0, LoadUnit::Ton, UnitKind::Indoor),
            7.034,
        );
    }
}
