// ==========================================
// CoolCraft TDS - 组合生成引擎
// ==========================================
// 职责: (目标容量, 可用规格) → 排序后的候选组合
// 输入: 目标容量（目录单位）+ 规格列表
// 输出: 最优在前的 Combo 列表
// ==========================================
// 注: 确定性启发式, 不做回溯搜索, 不求最优解
// ==========================================

mod core;
mod scoring;


pub use self::core::{ComboGenerator, GeneratorSettings, ScoredCombo};
