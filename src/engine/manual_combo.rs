// ==========================================
// CoolCraft TDS - 手动组合解析
// ==========================================
// 职责: "10 + 8 + 8" → Combo {10:1, 8:2}
// 红线: 任一 token 非法即整体拒绝, 不静默丢弃
// ==========================================

use crate::domain::combo::Combo;
use crate::engine::error::{EngineError, EngineResult};

/// 手动输入的分隔符
pub const MANUAL_SEPARATOR: char = '+';

pub struct ManualComboParser;

impl ManualComboParser {
    /// 解析以 '+' 分隔的容量列表
    ///
    /// # 返回
    /// - Ok(Combo): 与自动生成的组合走同一补全流程
    /// - Err(Parse): 空输入 / 空 token / 非数值 / 非正数
    pub fn parse(&self, input: &str) -> EngineResult<Combo> {
        if input.trim().is_empty() {
            return Err(EngineError::Parse {
                token: String::new(),
                message: "手动组合为空".to_string(),
            });
        }

        let sizes = input
            .split(MANUAL_SEPARATOR)
            .map(|token| self.parse_token(token))
            .collect::<EngineResult<Vec<f64>>>()?;

        Ok(Combo::from_counts(sizes.into_iter().map(|s| (s, 1))))
    }

    fn parse_token(&self, raw: &str) -> EngineResult<f64> {
        let token = raw.trim();
        let value = token.parse::<f64>().map_err(|_| EngineError::Parse {
            token: token.to_string(),
            message: "不是有效数值".to_string(),
        })?;

        if !value.is_finite() || value <= 0.0 {
            return Err(EngineError::Parse {
                token: token.to_string(),
                message: "容量必须为正数".to_string(),
            });
        }
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_merges_repeated_sizes() {
        let combo = ManualComboParser.parse("10 + 8 + 8").unwrap();
        assert_eq!(combo, Combo::from_counts([(10.0, 1), (8.0, 2)]));
        assert_eq!(combo.instances(), vec![10.0, 8.0, 8.0]);
    }

    #[test]
    fn test_parse_decimal_sizes() {
        let combo = ManualComboParser.parse("2.8+3.6").unwrap();
        assert_eq!(combo.total_capacity(), 2.8 + 3.6);
    }

    #[test]
    fn test_parse_rejects_non_numeric_token() {
        let err = ManualComboParser.parse("10 + ten + 8").unwrap_err();
        assert_eq!(
            err,
            EngineError::Parse {
                token: "ten".to_string(),
                message: "不是有效数值".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_rejects_empty_token() {
        assert!(matches!(
            ManualComboParser.parse("10 + + 8"),
            Err(EngineError::Parse { .. })
        ));
        assert!(matches!(
            ManualComboParser.parse("   "),
            Err(EngineError::Parse { .. })
        ));
    }

    #[test]
    fn test_parse_rejects_non_positive() {
        assert!(matches!(
            ManualComboParser.parse("10 + 0"),
            Err(EngineError::Parse { .. })
        ));
        assert!(matches!(
            ManualComboParser.parse("-4"),
            Err(EngineError::Parse { .. })
        ));
    }
}
