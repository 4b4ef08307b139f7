// ==========================================
// CoolCraft TDS - 数据清洗器
// ==========================================
// 职责: 列名标准化 / 表头去重 / 单元格数值转换
// 红线: 只读转换, 不改写目录中的原始单元格
// ==========================================

use crate::domain::catalog::CellValue;
use std::collections::HashMap;

pub struct DataCleaner;

impl DataCleaner {
    /// 列名标准化（用于匹配, 不用于展示）
    ///
    /// 规则: TRIM → 小写 → 连续空白折叠为单个空格 → 去除零宽空格
    pub fn normalize_name(&self, name: &str) -> String {
        name.trim()
            .to_lowercase()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .replace('\u{200b}', "")
    }

    /// 单元格 → 浮点数
    ///
    /// - Number: 有限值原样返回
    /// - Text: TRIM 后解析
    /// - Empty / 非数值文本 / NaN / 无穷: 视为缺失
    pub fn coerce_number(&self, value: &CellValue) -> Option<f64> {
        let parsed = match value {
            CellValue::Number(v) => Some(*v),
            CellValue::Text(s) => s.trim().parse::<f64>().ok(),
            CellValue::Empty => None,
        };
        parsed.filter(|v| v.is_finite())
    }

    /// 文本单元格: TRIM 后为空视为 Empty
    pub fn clean_text(&self, value: &str) -> CellValue {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(trimmed.to_string())
        }
    }

    /// CSV 原始文本 → 带类型单元格
    ///
    /// 空白 → Empty; 可解析为有限浮点数 → Number; 其余 → Text（TRIM 后）
    pub fn parse_cell(&self, value: &str) -> CellValue {
        match self.clean_text(value) {
            CellValue::Text(text) => match text.parse::<f64>() {
                Ok(number) if number.is_finite() => CellValue::Number(number),
                _ => CellValue::Text(text),
            },
            other => other,
        }
    }

    /// 表头去重
    ///
    /// - 空表头 → "Unnamed: {列序号}"
    /// - 重复表头 → "{名称}.{n}"（n 从 1 开始）
    pub fn dedupe_headers(&self, headers: Vec<String>) -> Vec<String> {
        let mut seen: HashMap<String, usize> = HashMap::new();
        let mut result = Vec::with_capacity(headers.len());

        for (idx, header) in headers.into_iter().enumerate() {
            let base = match header.trim() {
                "" => format!("Unnamed: {}", idx),
                trimmed => trimmed.to_string(),
            };

            let mut name = base.clone();
            while let Some(n) = seen.get_mut(&name) {
                *n += 1;
                name = format!("{}.{}", base, n);
            }
            seen.insert(name.clone(), 0);
            result.push(name);
        }

        result
    }
}
