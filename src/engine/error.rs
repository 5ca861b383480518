// ==========================================
// 季节款机会损失预测系统 - 引擎层错误类型
// ==========================================
// 计算错误只影响单个 SeriesKey: 记录原因后归入 error 分桶,不中断批次
// 工具: thiserror 派生宏
// ==========================================

use chrono::NaiveDate;
use thiserror::Error;

/// 引擎层错误类型
#[derive(Error, Debug)]
pub enum ForecastError {
    // ===== 前置条件错误 =====
    #[error("观测周数不足: 实际 {observations} 周, 至少需要 {minimum} 周")]
    InsufficientData { observations: usize, minimum: usize },

    #[error("序列日期未严格递增 (位置 {index}): {date}")]
    UnorderedSeries { index: usize, date: NaiveDate },

    #[error("断货位置越界: index={index}, len={len}")]
    IndexOutOfRange { index: usize, len: usize },

    // ===== 数值计算错误 =====
    #[error("数值非有限 (field={field}): {value}")]
    NonFiniteValue { field: &'static str, value: f64 },

    #[error("预测数量溢出: {0}")]
    QuantityOverflow(f64),
}

/// Result 类型别名
pub type ForecastResult<T> = Result<T, ForecastError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_carry_location() {
        let err = ForecastError::UnorderedSeries {
            index: 5,
            date: NaiveDate::from_ymd_opt(2025, 4, 6).unwrap(),
        };
        assert_eq!(err.to_string(), "序列日期未严格递增 (位置 5): 2025-04-06");

        let err = ForecastError::IndexOutOfRange { index: 9, len: 4 };
        assert_eq!(err.to_string(), "断货位置越界: index=9, len=4");
    }
}
