// ==========================================
// 季节款机会损失预测系统 - 周度序列领域模型
// ==========================================
// 红线: 同一 SeriesKey 内日期严格递增,不允许重复周
// 用途: 外部加载器写入,引擎层只读
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// SeriesKey - 款号 + 色号
// ==========================================
// 所有预测按 SeriesKey 独立进行，不存在跨键状态
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SeriesKey {
    pub style_code: String, // 款号
    pub color_code: String, // 色号
}

impl SeriesKey {
    pub fn new(style_code: impl Into<String>, color_code: impl Into<String>) -> Self {
        Self {
            style_code: style_code.into(),
            color_code: color_code.into(),
        }
    }
}

impl fmt::Display for SeriesKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.style_code, self.color_code)
    }
}

// ==========================================
// WeeklyObservation - 单周观测
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyObservation {
    pub date: NaiveDate,  // 周结束日（排序键）
    pub inbound_qty: u32, // 本周入库数量
    pub sale_qty: u32,    // 本周销售数量
}

impl WeeklyObservation {
    pub fn new(date: NaiveDate, inbound_qty: u32, sale_qty: u32) -> Self {
        Self {
            date,
            inbound_qty,
            sale_qty,
        }
    }
}

// ==========================================
// WeeklyRow - 加载器输出的扁平行
// ==========================================
// 尚未按 SeriesKey 分组，字段名与源数据导出一致
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyRow {
    pub style_code: String,
    pub color_code: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub inbound_qty: u32,
    #[serde(default)]
    pub sale_qty: u32,
}

impl WeeklyRow {
    /// 拆分为 (SeriesKey, WeeklyObservation)
    pub fn into_parts(self) -> (SeriesKey, WeeklyObservation) {
        (
            SeriesKey::new(self.style_code, self.color_code),
            WeeklyObservation::new(self.date, self.inbound_qty, self.sale_qty),
        )
    }
}

// ==========================================
// WeeklySeries - 单个 SeriesKey 的完整时间序列
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklySeries {
    pub key: SeriesKey,
    pub observations: Vec<WeeklyObservation>,
}

impl WeeklySeries {
    pub fn new(key: SeriesKey, observations: Vec<WeeklyObservation>) -> Self {
        Self { key, observations }
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// 全季累计销售
    pub fn total_sale(&self) -> u64 {
        self.observations.iter().map(|o| u64::from(o.sale_qty)).sum()
    }

    /// 第一个日期未严格递增的位置
    ///
    /// # 返回
    /// - None: 序列有序
    /// - Some(i): observations[i].date <= observations[i-1].date
    pub fn first_unordered_index(&self) -> Option<usize> {
        self.observations
            .windows(2)
            .position(|w| w[1].date <= w[0].date)
            .map(|i| i + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, day).unwrap()
    }

    #[test]
    fn test_first_unordered_index() {
        let key = SeriesKey::new("S1", "BK");
        let sorted = WeeklySeries::new(
            key.clone(),
            vec![
                WeeklyObservation::new(d(3, 2), 10, 1),
                WeeklyObservation::new(d(3, 9), 0, 2),
            ],
        );
        assert_eq!(sorted.first_unordered_index(), None);
        assert_eq!(sorted.total_sale(), 3);

        let duplicated = WeeklySeries::new(
            key,
            vec![
                WeeklyObservation::new(d(3, 2), 10, 1),
                WeeklyObservation::new(d(3, 9), 0, 2),
                WeeklyObservation::new(d(3, 9), 0, 2),
            ],
        );
        assert_eq!(duplicated.first_unordered_index(), Some(2));
    }

    #[test]
    fn test_row_defaults_missing_quantities_to_zero() {
        let row: WeeklyRow = serde_json::from_str(
            r#"{"style_code":"S1","color_code":"BK","date":"2025-03-02","sale_qty":4}"#,
        )
        .unwrap();
        let (key, obs) = row.into_parts();
        assert_eq!(key.to_string(), "S1/BK");
        assert_eq!(obs.inbound_qty, 0);
        assert_eq!(obs.sale_qty, 4);
    }
}
