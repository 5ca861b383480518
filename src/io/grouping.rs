// ==========================================
// 季节款机会损失预测系统 - 按 SeriesKey 分组
// ==========================================
// 规则: 按 (款号, 色号) 分组, 组内按日期升序
// 重复日期保留, 由编排器将该序列归入 error 分桶
// ==========================================

use crate::domain::series::{SeriesKey, WeeklyObservation, WeeklyRow, WeeklySeries};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// 将扁平行分组为序列（键升序，结果确定）
pub fn group_rows(rows: Vec<WeeklyRow>) -> Vec<WeeklySeries> {
    let row_count = rows.len();
    let mut groups: BTreeMap<SeriesKey, Vec<WeeklyObservation>> = BTreeMap::new();

    for row in rows {
        let (key, obs) = row.into_parts();
        groups.entry(key).or_default().push(obs);
    }

    let series: Vec<WeeklySeries> = groups
        .into_iter()
        .map(|(key, mut observations)| {
            observations.sort_by_key(|o| o.date);
            let series = WeeklySeries::new(key, observations);
            if let Some(index) = series.first_unordered_index() {
                warn!(
                    key = %series.key,
                    date = %series.observations[index].date,
                    "序列存在重复周"
                );
            }
            series
        })
        .collect();

    debug!(row_count, series_count = series.len(), "周度数据分组完成");
    series
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn row(style: &str, color: &str, day: u32, sale: u32) -> WeeklyRow {
        WeeklyRow {
            style_code: style.to_string(),
            color_code: color.to_string(),
            date: NaiveDate::from_ymd_opt(2025, 4, day).unwrap(),
            inbound_qty: 0,
            sale_qty: sale,
        }
    }

    #[test]
    fn test_groups_and_sorts_by_date() {
        let rows = vec![
            row("S2", "BK", 13, 3),
            row("S1", "WH", 20, 2),
            row("S1", "WH", 6, 1),
            row("S1", "BK", 6, 9),
        ];

        let series = group_rows(rows);
        let keys: Vec<String> = series.iter().map(|s| s.key.to_string()).collect();
        assert_eq!(keys, vec!["S1/BK", "S1/WH", "S2/BK"]);

        let white = &series[1];
        assert_eq!(white.observations[0].sale_qty, 1);
        assert_eq!(white.observations[1].sale_qty, 2);
    }

    #[test]
    fn test_duplicate_dates_are_kept() {
        let series = group_rows(vec![row("S1", "BK", 6, 1), row("S1", "BK", 6, 2)]);
        assert_eq!(series[0].len(), 2);
        assert_eq!(series[0].first_unordered_index(), Some(1));
    }
}
